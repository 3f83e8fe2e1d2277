//! Classification of a comment-stripped line into the action it drives.

use crate::core::header::{HeaderMatch, match_header};

/// Words that, alone on a line, retract the previous contact.
pub const CORRECTION_WORDS: [&str; 3] = ["delete", "drop", "error"];

/// What one log line asks the parser to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOp {
    /// Blank or `#` line; nothing happens.
    Skip,
    /// `delete`, `drop` or `error`; removes the last row.
    Correction,
    /// Session header directive.
    Header(HeaderMatch),
    /// Anything else is treated as a contact line.
    Qso,
}

impl LineOp {
    /// True for blank and `#` lines. Checked on the raw line as well, so
    /// braces inside them never open or close a comment.
    pub fn skips(line: &str) -> bool {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    }

    /// Classifies a comment-stripped line; surrounding whitespace is ignored.
    pub fn classify(line: &str) -> Self {
        let line = line.trim();
        if Self::skips(line) {
            return Self::Skip;
        }
        if CORRECTION_WORDS
            .iter()
            .any(|w| w.eq_ignore_ascii_case(line))
        {
            return Self::Correction;
        }
        match match_header(line) {
            Some(header) => Self::Header(header),
            None => Self::Qso,
        }
    }
}
