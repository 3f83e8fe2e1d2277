//! Contact rows, their column model, and the per-line field draft.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::types::{Band, Mode};

/// One logged contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRow {
    /// Contact date and time; year 1 until a date token is seen.
    pub date_time: NaiveDateTime,
    /// Band in effect for the contact.
    pub band: Option<Band>,
    /// Frequency in MHz.
    pub freq: Option<f64>,
    /// Mode in effect for the contact.
    pub mode: Option<Mode>,
    /// Worked station, uppercased.
    pub call: String,
    /// Report sent.
    pub sent_rst: String,
    /// Report received.
    pub rcvd_rst: String,
    /// Free-text notes from `<...>`.
    pub notes: Option<String>,
    /// Operator name from `@name`.
    pub name: Option<String>,
    /// Maidenhead locator from `#grid`.
    pub grid: Option<String>,
    /// Per-contact QSL message from `[...]`.
    pub qsl_msg: Option<String>,
    /// Exchange sent, from `,exch` or inherited.
    pub sent_exch: Option<String>,
    /// Exchange received, from `.exch`.
    pub rcvd_exch: Option<String>,
    /// Their WWFF reference.
    pub wwff: Option<String>,
    /// Their SOTA summit.
    pub sota: Option<String>,
    /// Their POTA park.
    pub pota: Option<String>,
}

/// Column of a [`LogRow`], in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `date_time`
    DateTime,
    /// `band`
    Band,
    /// `freq`
    Freq,
    /// `mode`
    Mode,
    /// `call`
    Call,
    /// `sent_rst`
    SentRst,
    /// `rcvd_rst`
    RcvdRst,
    /// `notes`
    Notes,
    /// `name`
    Name,
    /// `grid`
    Grid,
    /// `qsl_msg`
    QslMsg,
    /// `sent_exch`
    SentExch,
    /// `rcvd_exch`
    RcvdExch,
    /// `wwff`
    Wwff,
    /// `sota`
    Sota,
    /// `pota`
    Pota,
}

impl Field {
    /// All columns in order.
    pub const ALL: [Field; 16] = [
        Field::DateTime,
        Field::Band,
        Field::Freq,
        Field::Mode,
        Field::Call,
        Field::SentRst,
        Field::RcvdRst,
        Field::Notes,
        Field::Name,
        Field::Grid,
        Field::QslMsg,
        Field::SentExch,
        Field::RcvdExch,
        Field::Wwff,
        Field::Sota,
        Field::Pota,
    ];

    /// Snake-case key, e.g. `sent_rst`.
    pub fn name(self) -> &'static str {
        match self {
            Field::DateTime => "date_time",
            Field::Band => "band",
            Field::Freq => "freq",
            Field::Mode => "mode",
            Field::Call => "call",
            Field::SentRst => "sent_rst",
            Field::RcvdRst => "rcvd_rst",
            Field::Notes => "notes",
            Field::Name => "name",
            Field::Grid => "grid",
            Field::QslMsg => "qsl_msg",
            Field::SentExch => "sent_exch",
            Field::RcvdExch => "rcvd_exch",
            Field::Wwff => "wwff",
            Field::Sota => "sota",
            Field::Pota => "pota",
        }
    }

    /// Reverse of [`Field::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Position of this column in [`Field::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Borrowed view of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// Timestamp cell.
    DateTime(NaiveDateTime),
    /// Band cell.
    Band(Band),
    /// Frequency cell, MHz.
    Freq(f64),
    /// Mode cell.
    Mode(Mode),
    /// Any text cell.
    Text(&'a str),
    /// Unset optional cell.
    Null,
}

impl Value<'_> {
    /// True for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            Value::Band(b) => write!(f, "{b}"),
            Value::Freq(mhz) => write!(f, "{mhz:.3}"),
            Value::Mode(m) => write!(f, "{m}"),
            Value::Text(s) => f.write_str(s),
            Value::Null => Ok(()),
        }
    }
}

fn text(v: &Option<String>) -> Value<'_> {
    v.as_deref().map_or(Value::Null, Value::Text)
}

impl LogRow {
    /// Cell for `field`.
    pub fn field(&self, field: Field) -> Value<'_> {
        match field {
            Field::DateTime => Value::DateTime(self.date_time),
            Field::Band => self.band.map_or(Value::Null, Value::Band),
            Field::Freq => self.freq.map_or(Value::Null, Value::Freq),
            Field::Mode => self.mode.map_or(Value::Null, Value::Mode),
            Field::Call => Value::Text(&self.call),
            Field::SentRst => Value::Text(&self.sent_rst),
            Field::RcvdRst => Value::Text(&self.rcvd_rst),
            Field::Notes => text(&self.notes),
            Field::Name => text(&self.name),
            Field::Grid => text(&self.grid),
            Field::QslMsg => text(&self.qsl_msg),
            Field::SentExch => text(&self.sent_exch),
            Field::RcvdExch => text(&self.rcvd_exch),
            Field::Wwff => text(&self.wwff),
            Field::Sota => text(&self.sota),
            Field::Pota => text(&self.pota),
        }
    }

    /// Cell by column key; `None` for an unknown key.
    pub fn get(&self, name: &str) -> Option<Value<'_>> {
        Field::from_name(name).map(|f| self.field(f))
    }

    /// Cell by column position; `None` past the last column.
    pub fn at(&self, index: usize) -> Option<Value<'_>> {
        Field::ALL.get(index).map(|f| self.field(*f))
    }

    /// All cells in column order.
    pub fn values(&self) -> impl Iterator<Item = (Field, Value<'_>)> + '_ {
        Field::ALL.iter().map(move |f| (*f, self.field(*f)))
    }
}

/// Date movement requested by a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateToken {
    /// Jump to this calendar date.
    On(NaiveDate),
    /// Advance by this many days (`day++`).
    AdvanceDays(u64),
}

/// Everything extracted from one QSO line, before it meets sticky state.
///
/// Sticky entries (`band`, `freq`, `date`, `time`, `mode`) are folded into
/// the parser's carried state; the rest belong to this line alone.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QsoFields {
    /// Free-text notes.
    pub notes: Option<String>,
    /// Per-contact QSL message.
    pub qsl_msg: Option<String>,
    /// New sticky band.
    pub band: Option<Band>,
    /// New sticky frequency, already known to lie in some band.
    pub freq: Option<f64>,
    /// New sticky date.
    pub date: Option<DateToken>,
    /// Time to add to the sticky time-of-day.
    pub time: Option<TimeDelta>,
    /// New sticky mode.
    pub mode: Option<Mode>,
    /// Worked station.
    pub call: Option<String>,
    /// Operator name, title-cased.
    pub name: Option<String>,
    /// Locator.
    pub grid: Option<String>,
    /// Sent exchange.
    pub sent_exch: Option<String>,
    /// Received exchange.
    pub rcvd_exch: Option<String>,
    /// WWFF reference.
    pub wwff: Option<String>,
    /// SOTA summit.
    pub sota: Option<String>,
    /// POTA park.
    pub pota: Option<String>,
    /// Raw sent report.
    pub sent_rst: Option<String>,
    /// Raw received report.
    pub rcvd_rst: Option<String>,
    /// Line was struck out by a trailing `delete`/`drop`/`error`.
    pub struck: bool,
}
