//! This module defines all the errors that can occur while executing linejoin-cli.

use thiserror::Error;

/// Error that occur during execution of the CLI app
#[allow(variant_size_differences)]
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid parameter
    #[error("invalid parameter: {parameter}")]
    InvalidParameter {
        /// Invalid parameter
        parameter: String,
    },
    /// Error resulting from io operations
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// Error originating from the relation layer
    #[error(transparent)]
    PhysicalError(#[from] linejoin_physical::error::Error),
}
