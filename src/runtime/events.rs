//! Runtime event stream payloads.

/// Sequence number of a submitted text snapshot.
pub type Generation = u64;

/// Events emitted from the re-parse loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// A snapshot finished parsing and is now the latest log.
    Parsed {
        /// Snapshot that was parsed.
        generation: Generation,
        /// Rows in the new log.
        rows: usize,
        /// Diagnostics in the new log.
        diagnostics: usize,
    },
    /// A queued snapshot was skipped because newer text arrived.
    Coalesced {
        /// Snapshot that was skipped.
        generation: Generation,
    },
}
