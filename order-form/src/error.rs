//! Error types for the order form.

use crate::submission::SubmissionError;
use crate::transport::TransportError;
use thiserror::Error;

/// Errors surfaced by the order form outside the reducer.
///
/// The reducer itself never fails: field-format problems are tracked in
/// the invalid-field set and unknown actions are ignored.
#[derive(Error, Debug)]
pub enum OrderFormError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    CatalogIo {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The catalog JSON did not match the band/ticket shape.
    #[error("Invalid catalog data: {0}")]
    CatalogParse(#[source] serde_json::Error),

    /// Two bands in the catalog share an id.
    #[error("Duplicate band id in catalog: {0}")]
    DuplicateBand(String),

    /// A validation pattern failed to compile.
    #[error("Invalid validation pattern for {rule}: {source}")]
    InvalidPattern {
        /// Rule the pattern belongs to
        rule: &'static str,
        /// Regex compilation error
        #[source]
        source: regex::Error,
    },

    /// A field name outside the six contact fields.
    #[error("Unknown contact field: {0}")]
    UnknownField(String),

    /// An action line could not be decoded.
    #[error("Invalid action: {0}")]
    ActionDecode(#[source] serde_json::Error),

    /// The submission gate rejected the order.
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// The order transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OrderFormError>;
