//! Library part of the `lj` binary.
//!
//! Builds example relations, runs the line join experiments
//! and reports how the two evaluation strategies compare.

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
    variant_size_differences
)]

pub mod cli;
pub mod error;
pub mod experiments;
pub mod fixtures;
pub mod generator;
