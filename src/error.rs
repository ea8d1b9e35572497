//! Error types for the rating engine
//!
//! Domain failures are modelled with thiserror and surfaced through the
//! anyhow-based `Result` alias used across the crate.

use chrono::NaiveDate;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Malformed match record: {reason}")]
    MalformedRecord { reason: String },

    #[error("Cannot predict a match between {competitor} and themselves")]
    IdenticalCompetitors { competitor: String },

    #[error("Records are not in chronological order: record {index} dated {found} follows {previous}")]
    UnsortedRecords {
        index: usize,
        previous: NaiveDate,
        found: NaiveDate,
    },

    #[error("Source {source_name} is missing required column: {column}")]
    MissingColumn { source_name: String, column: String },

    #[error("Failed to read source {source_name}: {message}")]
    SourceReadFailed {
        source_name: String,
        message: String,
    },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
