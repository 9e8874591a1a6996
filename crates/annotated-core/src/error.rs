//! Error types.

use thiserror::Error;

/// Rejected text from the value prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueParseError {
    #[error("Empty value")]
    Empty,
    #[error("Not a number: {0:?}")]
    NotANumber(String),
    #[error("Value is not finite: {0:?}")]
    NotFinite(String),
}

/// Result type for prompt parsing.
pub type ParseResult<T> = Result<T, ValueParseError>;

/// Parse prompt text as a plain decimal number.
///
/// Surrounding whitespace is ignored. Expressions are not evaluated, and
/// infinities and NaN are rejected.
pub fn parse_value(text: &str) -> ParseResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValueParseError::Empty);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValueParseError::NotANumber(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(ValueParseError::NotFinite(trimmed.to_string()));
    }
    Ok(value)
}
