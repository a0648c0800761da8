//! Errors raised at the document boundary (load, import, palette input).
//!
//! The editing core itself never fails: invalid transitions are no-ops and
//! numeric input is clamped.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// A block type name outside the known set.
    #[error("unknown block type: {0}")]
    UnknownBlockType(String),

    /// The content sub-object of a block did not match its type's schema.
    #[error("invalid content for block {id}: {source}")]
    InvalidContent {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// The document could not be parsed or serialized.
    #[error("invalid document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// A code-mode block without its markup or its visual snapshot.
    #[error("code-mode block {0} is missing htmlContent or lastVisualSnapshot")]
    IncompleteCodeBlock(String),

    /// Two blocks share an id.
    #[error("duplicate block id: {0}")]
    DuplicateBlockId(String),
}
