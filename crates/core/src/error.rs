use thiserror::Error;

/// Rejections raised while turning a write request into a [`crate::NewHistoryRecord`].
///
/// None of these ever reach the database: validation runs before a
/// connection is opened.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty body, malformed JSON, or JSON that is not an object.
    #[error("No data received or invalid JSON format.")]
    InvalidBody,

    /// The body parsed as an object but a field had the wrong JSON type.
    #[error("Invalid payload: {0}")]
    Malformed(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A measurement was neither a number nor the `N/A` sentinel.
    #[error("Invalid value for {field}: {value}")]
    InvalidMeasurement { field: &'static str, value: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
