//! Error types shared by every pipeline stage.

use std::path::PathBuf;

use thiserror::Error;

/// Broad classification of a [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source file or archive member is missing.
    NotFound,
    /// Malformed delimited or structured input.
    Parse,
    /// Expected columns absent or identifier column malformed.
    Schema,
    /// A cell or year could not be coerced.
    Value,
    /// Region code or format selector outside the accepted set.
    Validation,
    /// Filesystem or DataFrame failure not covered above.
    Io,
}

/// Errors that can occur while loading, cleaning or writing a dataset.
#[derive(Debug, Error)]
pub enum PipelineError {
    // === Not Found ===
    /// Source file does not exist.
    #[error("source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Archive exists but does not contain the requested member.
    #[error("member '{member}' not found in archive {archive}")]
    MemberNotFound { archive: PathBuf, member: String },

    // === Parse ===
    /// Delimited text or JSON payload could not be parsed.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    // === Schema ===
    /// A required column is absent.
    #[error("required column '{column}' not found")]
    MissingColumn { column: String },

    /// Compound identifier cell did not split into exactly four parts.
    #[error("identifier '{value}' in row {row} has {parts} part(s), expected 4")]
    CompoundSplit {
        row: usize,
        value: String,
        parts: usize,
    },

    /// Two columns share a name once surrounding whitespace is trimmed.
    #[error("column '{column}' appears more than once after trimming headers")]
    DuplicateColumn { column: String },

    /// Compound identifier cell is empty.
    #[error("identifier in row {row} is missing")]
    NullIdentifier { row: usize },

    // === Value ===
    /// A year-value cell is not numeric, even after dropping its annotation.
    #[error("cannot convert '{value}' in column '{column}', row {row} to a number")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },

    /// A year label is not a whole number. `row` indexes the long table before filtering.
    #[error("cannot convert year '{value}' in row {row} to an integer")]
    InvalidYear { row: usize, value: String },

    // === Validation ===
    /// Region code is not part of the closed region set.
    #[error("unknown region code '{code}'")]
    UnknownRegion { code: String },

    /// Source format selector is not `csv` or `zip`.
    #[error("unknown source format '{value}' (expected 'csv' or 'zip')")]
    UnknownFormat { value: String },

    // === I/O ===
    /// Filesystem operation failed.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl PipelineError {
    /// Returns the broad class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceNotFound { .. } | Self::MemberNotFound { .. } => ErrorKind::NotFound,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::MissingColumn { .. }
            | Self::DuplicateColumn { .. }
            | Self::CompoundSplit { .. }
            | Self::NullIdentifier { .. } => ErrorKind::Schema,
            Self::InvalidNumber { .. } | Self::InvalidYear { .. } => ErrorKind::Value,
            Self::UnknownRegion { .. } | Self::UnknownFormat { .. } => ErrorKind::Validation,
            Self::Io { .. } | Self::DataFrame { .. } => ErrorKind::Io,
        }
    }

    /// Maps an I/O error on `path`, turning `NotFound` into [`PipelineError::SourceNotFound`].
    pub fn from_io(operation: &'static str, path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::SourceNotFound { path }
        } else {
            Self::Io {
                operation,
                path,
                source: err,
            }
        }
    }
}

impl From<polars::prelude::PolarsError> for PipelineError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
