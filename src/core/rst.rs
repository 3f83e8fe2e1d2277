//! Signal report shorthand expansion.

use crate::types::Mode;

/// Default report for `mode` when a line gives none.
pub fn default_rst(mode: Option<Mode>) -> &'static str {
    match mode {
        Some(m) if m.uses_tone_report() => "599",
        _ => "59",
    }
}

/// Expands a shorthand report into its full form for `mode`.
///
/// For CW-family modes a leading digit of 5 or less is the readability
/// (`5` -> `599`, `4` -> `499`) and 6 to 8 is the strength (`7` -> `579`).
/// Phone modes read a lone 5 to 8 as the strength (`5` -> `55`) and a lower
/// digit as the readability (`4` -> `49`). Signed reports, full-length
/// reports, and reports for other modes pass through.
pub fn normalize_rst(raw: &str, mode: Option<Mode>) -> String {
    let Some(first) = raw.chars().next() else {
        return String::new();
    };
    if matches!(first, '+' | '-') || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }
    let Some(mode) = mode else {
        return raw.to_string();
    };
    let lead = first.to_digit(10).unwrap_or(9);

    if mode.uses_tone_report() {
        match (raw.len(), lead) {
            (1, 0..=5) => format!("{raw}99"),
            (1, 6..=8) => format!("5{raw}9"),
            (2, 0..=5) => format!("{raw}9"),
            (2, 6..=8) => format!("5{raw}"),
            _ => raw.to_string(),
        }
    } else if mode.is_voice() {
        match (raw.len(), lead) {
            (1, 0..=4) => format!("{raw}9"),
            (1, 5..=8) => format!("5{raw}"),
            _ => raw.to_string(),
        }
    } else {
        raw.to_string()
    }
}
