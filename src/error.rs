use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, NeoError>;

/// Error type covering the failures that can occur while the tool ingests,
/// links, or exports near-Earth object data.
#[derive(Debug, Error)]
pub enum NeoError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when CSV parsing or serialization fails.
    #[error("{0}")]
    Csv(#[from] csv::Error),

    /// Raised when a non-empty numeric field cannot be parsed.
    #[error("invalid number '{value}' in field {field}")]
    InvalidNumber { field: String, value: String },

    /// Raised when a date string does not follow the expected layout.
    #[error("invalid date '{value}': expected format {format}")]
    InvalidDate { value: String, format: &'static str },

    /// Raised when a source table does not follow the expected structure.
    #[error("malformed table: {0}")]
    MalformedTable(String),

    /// Wraps a construction failure with the record that caused it.
    #[error("{entity} record {index}: {source}")]
    Record {
        entity: &'static str,
        index: usize,
        #[source]
        source: Box<NeoError>,
    },

    /// Raised when a formatted time is requested from an approach without one.
    #[error("close approach of {designation} has no approach time")]
    MissingTime { designation: String },

    /// Raised when an approach is used before it was linked to its NEO.
    #[error("close approach of {designation} is not linked to a near-Earth object")]
    Unlinked { designation: String },

    /// Raised when the output path has no writer for its extension.
    #[error("unsupported output file {0}: expected a .csv or .json extension")]
    UnsupportedOutput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl NeoError {
    /// Tags a construction error with the entity kind and record index.
    pub fn in_record(self, entity: &'static str, index: usize) -> Self {
        NeoError::Record {
            entity,
            index,
            source: Box::new(self),
        }
    }
}
