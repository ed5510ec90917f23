//! This module defines the evaluation of line join queries
//!
//! A line join query has the form
//! `q(A1, ..., Ak+1) :- R1(A1, A2), R2(A2, A3), ..., Rk(Ak, Ak+1)`,
//! i.e. its join graph is a path.
//! It is given as the list of relations `R1, ..., Rk` in path order,
//! where neighbouring relations share exactly one attribute
//! and relations that are not neighbours share none.
//! The evaluation functions assume but do not check this;
//! use [validate_line_join] for an explicit check.

use std::fmt;

use crate::{error::Error, tabular::relation::Relation};

use super::{join::natural_join, semi_join::semi_join};

/// Check that a list of relations forms a line join.
///
/// # Errors
/// * [Error::DisconnectedLineJoin] if two neighbouring relations share no attribute,
/// * [Error::AmbiguousLineJoin] if two neighbouring relations share more than one attribute,
/// * [Error::CyclicLineJoin] if two relations that are not neighbours share an attribute.
pub fn validate_line_join(relations: &[Relation]) -> Result<(), Error> {
    for (left, pair) in relations.windows(2).enumerate() {
        let shared = pair[0].schema().shared_attributes(pair[1].schema());

        match shared.len() {
            0 => {
                return Err(Error::DisconnectedLineJoin {
                    left,
                    right: left + 1,
                })
            }
            1 => {}
            _ => {
                return Err(Error::AmbiguousLineJoin {
                    left,
                    right: left + 1,
                    shared: shared.into_iter().map(String::from).collect(),
                })
            }
        }
    }

    for (first, relation) in relations.iter().enumerate() {
        for (second, other) in relations.iter().enumerate().skip(first + 2) {
            if let Some(attribute) = relation.schema().shared_attributes(other.schema()).first() {
                return Err(Error::CyclicLineJoin {
                    first,
                    second,
                    attribute: attribute.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Remove all dangling tuples from the relations of a line join.
///
/// This performs a semi-join reduction sweep from the last relation to the first one,
/// followed by a second sweep from the first relation to the last one.
/// Afterwards, every remaining tuple of every relation
/// contributes to at least one tuple of the join result.
///
/// The returned relations are in the same order as the input relations.
pub fn reduce_line_join(relations: &[Relation]) -> Vec<Relation> {
    let mut reduced = relations.to_vec();

    for index in (0..reduced.len().saturating_sub(1)).rev() {
        reduced[index] = semi_join(&reduced[index], &reduced[index + 1]);
    }

    for index in 1..reduced.len() {
        reduced[index] = semi_join(&reduced[index], &reduced[index - 1]);
    }

    log::debug!(
        "line join reduction: {:?} -> {:?} tuples",
        relations.iter().map(Relation::row_count).collect::<Vec<_>>(),
        reduced.iter().map(Relation::row_count).collect::<Vec<_>>()
    );

    reduced
}

/// Evaluate a line join query by a simplified version of the Yannakakis algorithm.
///
/// First removes all dangling tuples via [reduce_line_join]
/// and then joins the reduced relations from the last one to the first one.
/// Because no tuple of the reduced relations is dangling,
/// no intermediate result is larger than the final one,
/// which gives a runtime in `O(N + OUT)`.
///
/// For an empty list of relations the result is the empty relation;
/// a single relation is returned unchanged.
pub fn line_join_reduced(relations: &[Relation]) -> Relation {
    match relations {
        [] => Relation::default(),
        [relation] => relation.clone(),
        _ => reduce_line_join(relations)
            .into_iter()
            .rev()
            .reduce(|joined, relation| natural_join(&relation, &joined))
            .unwrap_or_default(),
    }
}

/// Evaluate a line join query by chaining natural joins from left to right.
///
/// Computes `R1 ⋈ R2`, then `(R1 ⋈ R2) ⋈ R3` and so on.
/// Intermediate results may be much larger than the final one
/// if the relations contain many dangling tuples.
///
/// For an empty list of relations the result is the empty relation;
/// a single relation is returned unchanged.
pub fn line_join_chained(relations: &[Relation]) -> Relation {
    let Some((first, rest)) = relations.split_first() else {
        return Relation::default();
    };

    rest.iter().fold(first.clone(), |joined, relation| {
        let result = natural_join(&joined, relation);
        log::trace!("line join chain: intermediate result with {} tuples", result.row_count());

        result
    })
}

/// Strategies for evaluating line join queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LineJoinStrategy {
    /// Semi-join reduction followed by joins, see [line_join_reduced]
    #[default]
    Reduced,
    /// Left-to-right chain of natural joins, see [line_join_chained]
    Chained,
}

impl LineJoinStrategy {
    /// Evaluate the line join given by `relations` with this strategy.
    pub fn evaluate(self, relations: &[Relation]) -> Relation {
        match self {
            LineJoinStrategy::Reduced => line_join_reduced(relations),
            LineJoinStrategy::Chained => line_join_chained(relations),
        }
    }
}

impl fmt::Display for LineJoinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineJoinStrategy::Reduced => write!(f, "semi-join reduction"),
            LineJoinStrategy::Chained => write!(f, "chained natural joins"),
        }
    }
}
