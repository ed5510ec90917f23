//! This module defines [project].

use hashbrown::HashSet;
use itertools::Itertools;

use crate::tabular::{
    relation::{Relation, Value},
    schema::Schema,
};

/// Project a [Relation] onto the given attributes.
///
/// The columns of the result follow the order of `attributes`.
/// Attributes that do not occur in the relation are skipped,
/// as are repeated mentions of the same attribute.
/// If none of the attributes occur in the relation, the result is the empty relation
/// without any attributes.
///
/// Duplicate tuples are removed from the result;
/// the remaining tuples appear in the order in which they were first encountered.
pub fn project<S: AsRef<str>>(relation: &Relation, attributes: &[S]) -> Relation {
    let (names, columns): (Vec<&str>, Vec<usize>) = attributes
        .iter()
        .map(|attribute| attribute.as_ref())
        .unique()
        .filter_map(|attribute| {
            relation
                .column_index(attribute)
                .map(|column| (attribute, column))
        })
        .unzip();

    if columns.is_empty() {
        return Relation::default();
    }

    let mut result = Relation::from_schema(Schema::from_attributes(names));
    let mut seen = HashSet::<Vec<Value>>::new();
    let mut projected = Vec::<Value>::with_capacity(columns.len());

    for tuple in relation.tuples() {
        projected.clear();
        projected.extend(columns.iter().map(|&column| tuple[column]));

        if !seen.contains(projected.as_slice()) {
            seen.insert(projected.clone());
            result.push_row(&projected);
        }
    }

    log::trace!(
        "projection onto {:?}: {} of {} tuples remain",
        result.attribute_names(),
        result.row_count(),
        relation.row_count()
    );

    result
}
