//! This crate defines the in-memory relations and join operations
//! used to evaluate line join queries.
//! Relations are small, row-major tables of signed integers whose
//! columns are addressed by attribute name.
//! A line join query `R1(A1, A2), R2(A2, A3), ..., Rk(Ak, Ak+1)` can be evaluated
//! either by a semi-join reduction sweep (see [tabular::operations::line_join::line_join_reduced])
//! or by chaining pairwise natural joins (see [tabular::operations::line_join::line_join_chained]).

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

pub mod error;
pub mod meta;
pub mod tabular;

#[cfg(test)]
pub(crate) mod util;
