//! Parsing stages and the parsed log container.

/// Brace comment stripping across lines.
pub mod comments;
/// Ordered field extraction for contact lines.
pub mod extract;
/// Session header directives.
pub mod header;
/// Row position index helpers.
pub mod indices;
/// Signal report expansion and defaults.
pub mod rst;
/// Values carried between lines.
pub mod sticky;
/// The immutable parse result.
pub mod store;
