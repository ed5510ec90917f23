//! This module defines operations over relations.
//!
//! All operations are pure: they borrow their input relations
//! and return a newly constructed [Relation][super::Relation].

pub mod join;
pub mod line_join;
pub mod project;
pub mod semi_join;

pub use join::natural_join;
pub use line_join::{
    line_join_chained, line_join_reduced, reduce_line_join, validate_line_join, LineJoinStrategy,
};
pub use project::project;
pub use semi_join::semi_join;
