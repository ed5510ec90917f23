//! This module defines [natural_join] and [JoinBinding].

use hashbrown::HashMap;

use crate::tabular::{
    relation::{Relation, Value},
    schema::Schema,
};

/// Helper structure which identifies the input column
/// an output column of a join takes its value from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnSource {
    /// Column of the left relation
    Left(usize),
    /// Column of the right relation
    Right(usize),
}

/// Helper structure which identifies a pair of columns
/// that has to agree on its values in a join
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SharedColumn {
    /// The index of the column in the left relation
    left: usize,
    /// The index of the column in the right relation
    right: usize,
}

/// Describes how the tuples of two relations are combined by a natural join.
#[derive(Debug, Clone)]
pub struct JoinBinding {
    /// Schema of the join result:
    /// all attributes of the left relation followed by the remaining attributes of the right one
    output: Schema,
    /// In the order of the output columns,
    /// contains the input column each value is copied from
    sources: Vec<ColumnSource>,
    /// Columns that are shared between both relations, in left column order
    shared: Vec<SharedColumn>,
}

impl JoinBinding {
    /// Create a new [JoinBinding] for joining relations with the given schemas.
    pub fn new(left: &Schema, right: &Schema) -> Self {
        let shared = left
            .shared_attributes(right)
            .into_iter()
            .filter_map(|attribute| {
                Some(SharedColumn {
                    left: left.column_index(attribute)?,
                    right: right.column_index(attribute)?,
                })
            })
            .collect::<Vec<_>>();

        let mut output = left.clone();
        let mut sources = (0..left.arity())
            .map(ColumnSource::Left)
            .collect::<Vec<_>>();

        for (column, attribute) in right.iter().enumerate() {
            if output.push(attribute) {
                sources.push(ColumnSource::Right(column));
            }
        }

        Self {
            output,
            sources,
            shared,
        }
    }

    /// Return whether the relations have at least one attribute in common.
    pub fn is_joinable(&self) -> bool {
        !self.shared.is_empty()
    }

    /// Return the number of attributes the relations have in common.
    pub fn num_shared(&self) -> usize {
        self.shared.len()
    }

    /// Return the schema of the join result.
    pub fn output_schema(&self) -> &Schema {
        &self.output
    }

    /// The pair of columns used as key of the hash index.
    fn key(&self) -> Option<SharedColumn> {
        self.shared.first().copied()
    }

    /// Return whether two tuples agree on all shared attributes.
    fn matches(&self, left: &[Value], right: &[Value]) -> bool {
        self.shared
            .iter()
            .all(|column| left[column.left] == right[column.right])
    }

    /// Write the combination of two matching tuples into `output`.
    fn merge(&self, left: &[Value], right: &[Value], output: &mut Vec<Value>) {
        output.clear();
        output.extend(self.sources.iter().map(|source| match *source {
            ColumnSource::Left(column) => left[column],
            ColumnSource::Right(column) => right[column],
        }));
    }
}

/// Associates each value of a column with the rows it occurs in.
fn build_index(relation: &Relation, column: usize) -> HashMap<Value, Vec<usize>> {
    let mut index = HashMap::<Value, Vec<usize>>::new();

    for (row, tuple) in relation.tuples().enumerate() {
        index.entry(tuple[column]).or_default().push(row);
    }

    index
}

/// Compute the natural join of two relations.
///
/// The result contains every combination of a left and a right tuple
/// which agree on all attributes both relations have in common.
/// Its columns are the columns of `left` followed by the columns of `right`
/// which do not occur in `left`.
///
/// The join is computed by building a hash index on one of the shared attributes
/// of `right` and probing it with every tuple of `left`.
/// Result tuples are ordered by the left row first and the right row second.
///
/// If the relations have no attribute in common, the result is the empty relation;
/// no cartesian product is computed.
pub fn natural_join(left: &Relation, right: &Relation) -> Relation {
    let binding = JoinBinding::new(left.schema(), right.schema());

    let Some(key) = binding.key() else {
        log::debug!(
            "natural join of {:?} and {:?} without shared attributes is empty",
            left.attribute_names(),
            right.attribute_names()
        );

        return Relation::default();
    };

    let index = build_index(right, key.right);

    let mut result = Relation::from_schema(binding.output_schema().clone());
    let mut merged = Vec::<Value>::with_capacity(binding.sources.len());

    for left_tuple in left.tuples() {
        let Some(candidates) = index.get(&left_tuple[key.left]) else {
            continue;
        };

        for &right_row in candidates {
            let right_tuple = right.row(right_row);

            if binding.matches(left_tuple, right_tuple) {
                binding.merge(left_tuple, right_tuple, &mut merged);
                result.push_row(&merged);
            }
        }
    }

    log::trace!(
        "natural join on {} shared attribute(s): {} x {} -> {} tuples",
        binding.num_shared(),
        left.row_count(),
        right.row_count(),
        result.row_count()
    );

    result
}

#[cfg(test)]
mod test {
    use super::{natural_join, JoinBinding};
    use crate::tabular::{relation::Relation, schema::Schema};
    use quickcheck_macros::quickcheck;
    use test_log::test;

    #[test]
    fn binding_output_schema() {
        let left = Schema::from_attributes(["A", "B", "C"]);
        let right = Schema::from_attributes(["D", "C", "A"]);
        let binding = JoinBinding::new(&left, &right);

        assert!(binding.is_joinable());
        assert_eq!(binding.num_shared(), 2);
        assert_eq!(
            binding.output_schema().attribute_names(),
            vec!["A", "B", "C", "D"]
        );

        let binding = JoinBinding::new(&left, &Schema::from_attributes(["X"]));
        assert!(!binding.is_joinable());
    }

    #[test]
    fn join_two_relations() {
        let r1 = Relation::from_rows(["A", "B"], [[1, 2], [4, 5], [7, 8], [1, 3]]);
        let r2 = Relation::from_rows(["B", "C"], [[2, 4], [5, 2], [1, 3], [3, 7]]);

        let result = natural_join(&r1, &r2);

        assert_eq!(result.attribute_names(), vec!["A", "B", "C"]);
        assert_eq!(
            result.tuples().collect::<Vec<_>>(),
            vec![&[1, 2, 4][..], &[4, 5, 2][..], &[1, 3, 7][..]]
        );

        // inputs are left untouched
        assert_eq!(r1.row_count(), 4);
        assert_eq!(r2.row_count(), 4);
    }

    #[test]
    fn join_checks_all_shared_attributes() {
        let left = Relation::from_rows(["A", "B", "C"], [[1, 2, 3], [1, 2, 4], [1, 5, 3]]);
        let right = Relation::from_rows(["C", "B", "D"], [[3, 2, 10], [4, 5, 11], [3, 5, 12]]);

        let result = natural_join(&left, &right);

        assert_eq!(result.attribute_names(), vec!["A", "B", "C", "D"]);
        assert_eq!(
            result.tuples().collect::<Vec<_>>(),
            vec![&[1, 2, 3, 10][..], &[1, 5, 3, 12][..]]
        );
    }

    #[test]
    fn join_without_shared_attributes() {
        let left = Relation::from_rows(["A", "B"], [[1, 2]]);
        let right = Relation::from_rows(["C", "D"], [[1, 2]]);

        let result = natural_join(&left, &right);

        assert_eq!(result.column_count(), 0);
        assert_eq!(result.row_count(), 0);
    }

    #[test]
    fn self_join_with_duplicates() {
        let relation = Relation::from_rows(["A", "B"], [[1, 2], [1, 2], [3, 4]]);

        let result = natural_join(&relation, &relation);

        assert_eq!(result.attribute_names(), vec!["A", "B"]);
        assert_eq!(
            result.tuples().collect::<Vec<_>>(),
            vec![
                &[1, 2][..],
                &[1, 2][..],
                &[1, 2][..],
                &[1, 2][..],
                &[3, 4][..]
            ]
        );
    }

    #[test]
    fn join_order_is_left_major() {
        let left = Relation::from_rows(["A", "B"], [[2, 1], [1, 1]]);
        let right = Relation::from_rows(["B", "C"], [[1, 7], [1, 8]]);

        let result = natural_join(&left, &right);

        assert_eq!(
            result.tuples().collect::<Vec<_>>(),
            vec![&[2, 1, 7][..], &[2, 1, 8][..], &[1, 1, 7][..], &[1, 1, 8][..]]
        );
    }

    #[quickcheck]
    #[cfg_attr(miri, ignore)]
    fn join_is_commutative(left: Vec<(u8, u8)>, right: Vec<(u8, u8, u8)>) -> bool {
        let left = Relation::from_rows(
            ["A", "B"],
            left.iter().map(|&(a, b)| [i64::from(a), i64::from(b % 5)]),
        );
        let right = Relation::from_rows(
            ["C", "B", "D"],
            right
                .iter()
                .map(|&(c, b, d)| [i64::from(c % 3), i64::from(b % 5), i64::from(d)]),
        );

        let left_right = natural_join(&left, &right);
        let right_left = natural_join(&right, &left);

        // Bring the columns of `right_left` into the order of `left_right`
        let reordered = right_left.project(&left_right.attribute_names());

        left_right.row_count() == right_left.row_count()
            && left_right.tuple_set() == reordered.tuple_set()
    }
}
