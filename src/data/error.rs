use thiserror::Error;

/// Schema and value problems found while loading a launch table.
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: payload mass '{value}' is not a non-negative number")]
    InvalidPayload { row: usize, value: String },

    #[error("row {row}: outcome '{value}' is neither 0/1 nor true/false")]
    InvalidOutcome { row: usize, value: String },

    #[error("row {row}: column '{column}' has unsupported type {data_type}")]
    UnsupportedType {
        row: usize,
        column: &'static str,
        data_type: String,
    },
}
