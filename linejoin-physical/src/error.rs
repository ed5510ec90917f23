//! Error-handling module for the crate

use thiserror::Error;

/// Error-Collection for all the possible Errors occurring in this crate
#[allow(variant_size_differences)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A tuple was requested by a row index that does not exist
    #[error("Row index {index} is out of range for a relation with {row_count} rows.")]
    RowOutOfRange {
        /// The requested row
        index: usize,
        /// Number of rows of the relation
        row_count: usize,
    },
    /// Two neighbouring relations of a line join do not share an attribute
    #[error("Relations {left} and {right} of the line join do not share an attribute.")]
    DisconnectedLineJoin {
        /// Position of the first relation in the line join
        left: usize,
        /// Position of the second relation in the line join
        right: usize,
    },
    /// Two neighbouring relations of a line join share more than one attribute
    #[error("Relations {left} and {right} of the line join share more than one attribute: {shared:?}")]
    AmbiguousLineJoin {
        /// Position of the first relation in the line join
        left: usize,
        /// Position of the second relation in the line join
        right: usize,
        /// The attributes both relations have in common
        shared: Vec<String>,
    },
    /// Two relations that are not neighbours in a line join share an attribute
    #[error("Relations {first} and {second} are not adjacent in the line join but share the attribute \"{attribute}\".")]
    CyclicLineJoin {
        /// Position of the first relation in the line join
        first: usize,
        /// Position of the second relation in the line join
        second: usize,
        /// The shared attribute
        attribute: String,
    },
}
