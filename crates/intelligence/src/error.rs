//! Error types.
//!
//! None of these escape the recommendation entry points: malformed records are
//! skipped and logged, and catalog errors only surface when a caller builds or
//! loads a custom catalog.

use thiserror::Error;

/// A raw calendar record that could not be turned into a [`crate::TimeSeriesRecord`].
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum RecordError {
    /// A required field was absent or blank.
    #[error("record is missing required field '{field}'")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// The date was not a `YYYY-MM-DD` calendar day.
    #[error("unparseable record date '{value}'")]
    InvalidDate { value: String },

    /// The category label was not one the engine knows.
    #[error("unknown record category '{value}'")]
    InvalidCategory { value: String },

    /// The flow label was not light, medium or heavy.
    #[error("unknown flow intensity '{value}'")]
    InvalidFlow { value: String },

    /// Pain was outside 0-10 or not a whole number.
    #[error("pain level {value} is not a whole number between 0 and 10")]
    PainOutOfRange { value: f64 },
}

/// Errors raised while building or loading a recommendation catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// Two entries share an id.
    #[error("duplicate catalog id '{id}'")]
    DuplicateId { id: String },

    /// Static priority must be within 0-100.
    #[error("catalog entry '{id}' has priority {priority} outside 0-100")]
    PriorityOutOfRange { id: String, priority: f64 },

    /// A condition range has min greater than max.
    #[error("catalog entry '{id}' has an inverted {dimension} range")]
    InvalidRange { id: String, dimension: &'static str },

    /// The catalog document could not be parsed.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}
