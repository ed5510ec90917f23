//! This module collects data structures and operations for relations.

pub mod display;
pub mod operations;
pub mod relation;
pub mod schema;

pub use relation::Relation;
pub use schema::Schema;
