use thiserror::Error;

/// Failures that abandon a parse. Unknown chunk IDs are never errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid container: expected RIFF/WAVE, found {tag:?}/{format:?}")]
    InvalidContainer { tag: String, format: String },

    #[error("Out of bounds: {requested} bytes requested at offset {offset}, readable up to {limit}")]
    OutOfBounds {
        offset: usize,
        requested: usize,
        limit: usize,
    },

    #[error("Division by zero: {0}")]
    DivideByZero(&'static str),
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
