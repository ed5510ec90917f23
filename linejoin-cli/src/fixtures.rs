//! Fixed relations used by the `pairwise`, `reduced` and `chained` experiments.

use linejoin_physical::tabular::relation::{Relation, Value};

/// Tuples of `R1(A, B)`
const R1: [[Value; 2]; 10] = [
    [1, 2],
    [4, 5],
    [7, 8],
    [10, 9],
    [1, 3],
    [2, 2],
    [11, 3],
    [6, 7],
    [11, 5],
    [12, 15],
];

/// Tuples of `R2(B, C)`
const R2: [[Value; 2]; 10] = [
    [2, 4],
    [5, 2],
    [7, 8],
    [13, 9],
    [1, 3],
    [5, 9],
    [15, 6],
    [3, 7],
    [3, 5],
    [9, 4],
];

/// Tuples of `R3(C, D)`
const R3: [[Value; 2]; 10] = [
    [4, 8],
    [5, 2],
    [8, 9],
    [6, 21],
    [1, 3],
    [10, 2],
    [9, 20],
    [3, 8],
    [3, 12],
    [9, 15],
];

/// Tuples of `R4(D, E)`
const R4: [[Value; 2]; 10] = [
    [8, 16],
    [8, 1],
    [7, 12],
    [15, 37],
    [3, 3],
    [12, 7],
    [21, 6],
    [2, 4],
    [3, 5],
    [20, 5],
];

/// Returns `R1(A, B)` and `R2(B, C)`.
pub fn pairwise_relations() -> [Relation; 2] {
    [
        Relation::from_rows(["A", "B"], R1).named("R1"),
        Relation::from_rows(["B", "C"], R2).named("R2"),
    ]
}

/// Returns the line join `R1(A, B), R2(B, C), R3(C, D), R4(D, E)`.
pub fn line_join_relations() -> Vec<Relation> {
    let [r1, r2] = pairwise_relations();

    vec![
        r1,
        r2,
        Relation::from_rows(["C", "D"], R3).named("R3"),
        Relation::from_rows(["D", "E"], R4).named("R4"),
    ]
}

#[cfg(test)]
mod test {
    use super::{line_join_relations, pairwise_relations};
    use linejoin_physical::tabular::operations::validate_line_join;
    use test_log::test;

    #[test]
    fn fixtures_form_line_join() {
        let relations = line_join_relations();

        assert_eq!(relations.len(), 4);
        assert!(relations.iter().all(|relation| relation.row_count() == 10));
        assert_eq!(validate_line_join(&relations), Ok(()));
    }

    #[test]
    fn pairwise_join() {
        let [r1, r2] = pairwise_relations();
        let result = r1.natural_join(&r2);

        assert_eq!(result.attribute_names(), vec!["A", "B", "C"]);
        assert_eq!(result.row_count(), 13);
    }
}
