//! This module defines [semi_join].

use crate::tabular::relation::Relation;

use super::{join::natural_join, project::project};

/// Compute the semi-join of `left` with `right`.
///
/// The result contains the distinct tuples of `left`
/// that have at least one join partner in `right`.
/// It is computed as the natural join of both relations,
/// projected back onto the attributes of `left`.
///
/// If the relations do not share an attribute, the result is the empty relation.
pub fn semi_join(left: &Relation, right: &Relation) -> Relation {
    project(&natural_join(left, right), &left.attribute_names())
}
