//! Parser for quick, hand-typed amateur radio contact logs.
//!
//! Each line of a log mixes positional tokens (frequency, date, time,
//! callsign) with sigil-tagged ones (`@name`, `#grid`, `,sent`, `.rcvd`,
//! `<notes>`, `[qsl message]`). Band, frequency, mode, date and time are
//! sticky: once set they apply to every following line until changed.
//!
//! # Examples
//!
//! ```
//! use quicklog::{
//!     core::store::LogFile,
//!     types::{Band, Mode},
//! };
//!
//! let log = LogFile::parse([
//!     "mycall k1xyz",
//!     "date 2023-06-15",
//!     "20m cw",
//!     "1200 w1aw 5 7 @bob",
//!     "5 k1abc {second station} <good signal>",
//! ]);
//!
//! assert_eq!(log.my_call(), "K1XYZ");
//! assert_eq!(log.len(), 2);
//! assert_eq!(log[0].call, "W1AW");
//! assert_eq!(log[0].sent_rst, "599");
//! assert_eq!(log[0].rcvd_rst, "579");
//! assert_eq!(log[0].name.as_deref(), Some("Bob"));
//! assert_eq!(log[1].band, Some(Band::B20m));
//! assert_eq!(log[1].mode, Some(Mode::Cw));
//! assert_eq!(log[1].date_time.format("%H:%M").to_string(), "12:05");
//! ```
//!
//! Re-parsing in the background while a document is edited:
//! ```no_run
//! use quicklog::runtime::handle::{spawn_reparser, ReparseConfig};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let handle = spawn_reparser(ReparseConfig::default());
//! let log = handle.submit(["20m ssb", "w1aw"]).await.expect("parse");
//! assert_eq!(log.len(), 1);
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
/// Parsing stages and the parsed log container.
pub mod core;
/// Line-level diagnostics.
pub mod error;
/// Line classification.
pub mod op;
/// Line-by-line parse driver and options.
pub mod parser;
/// Contact rows and field drafts.
pub mod qso;
/// Background re-parse loop and events.
pub mod runtime;
/// Band and mode tables.
pub mod types;

pub use crate::core::store::LogFile;
pub use crate::error::ParsingError;
pub use crate::parser::{LogParser, ParseOptions};
pub use crate::qso::{Field, LogRow, Value};
