//! Line-level parse diagnostics.

use serde::Serialize;
use thiserror::Error;

/// A structural problem found on one input line.
///
/// The parser records these and keeps going; only
/// [`LogParser::parse_strict`](crate::parser::LogParser::parse_strict)
/// turns the first one into a failure.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("line {line_num}: {message}")]
pub struct ParsingError {
    /// Human-readable description.
    pub message: String,
    /// 1-based line number.
    pub line_num: usize,
    /// Raw text of the offending line.
    pub line: String,
}

impl ParsingError {
    /// Builds a diagnostic from a 0-based line index.
    pub fn at(index: usize, line: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line_num: index + 1,
            line: line.to_string(),
        }
    }
}
