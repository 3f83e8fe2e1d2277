//! Session header directives (`mycall`, `mygrid`, `operators`, ...).

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Maidenhead locator, 4, 6 or 8 characters.
pub(crate) const GRID_SHAPE: &str = r"[A-R]{2}[0-9]{2}(?:[A-X]{2}(?:[0-9]{2})?)?";
/// WWFF reference such as `KFF-1234`.
pub(crate) const WWFF_SHAPE: &str = r"[A-Z0-9]{1,2}FF-[0-9]{4}";
/// SOTA summit such as `W7W/LC-001`.
pub(crate) const SOTA_SHAPE: &str = r"[A-Z0-9]+/[A-Z0-9]+-[0-9]{3}";
/// POTA park such as `K-1234`.
pub(crate) const POTA_SHAPE: &str = r"[A-Z0-9]+-[0-9]{4}";

/// One recognised header directive with its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderField {
    /// `mycall <call>`
    MyCall(String),
    /// `mygrid <locator>`
    MyGrid(String),
    /// `operators <call> <call> ...`
    Operators(Vec<String>),
    /// `qslmsg <text>`
    QslMsg(String),
    /// `mywwff <ref>`
    MyWwff(String),
    /// `mysota <ref>`
    MySota(String),
    /// `mypota <ref>`
    MyPota(String),
    /// `nickname <text>`
    Nickname(String),
}

/// A line that opened with a header keyword.
///
/// `field` is `None` when the value was missing or malformed; the line is
/// still consumed as a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Keyword as written in the format, lowercase.
    pub keyword: &'static str,
    /// Parsed value, if any.
    pub field: Option<HeaderField>,
}

fn keyword_re(keyword: &str, value: &str) -> Regex {
    let pattern = format!(r"(?i)^{keyword}\b(?:\s+({value})\b)?");
    Regex::new(&pattern).expect("header pattern compiles")
}

static MYCALL: LazyLock<Regex> = LazyLock::new(|| keyword_re("mycall", r"[A-Z0-9/]+"));
static MYGRID: LazyLock<Regex> = LazyLock::new(|| keyword_re("mygrid", GRID_SHAPE));
static OPERATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^op(?:erator)?s?\b\s*(.*)$").expect("header pattern compiles")
});
static OPERATOR_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[A-Z0-9/]{3,}$").expect("header pattern compiles"));
static QSLMSG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^qslmsg\b\s*(.*)$").expect("header pattern compiles"));
static MYWWFF: LazyLock<Regex> = LazyLock::new(|| keyword_re("mywwff", WWFF_SHAPE));
static MYSOTA: LazyLock<Regex> = LazyLock::new(|| keyword_re("mysota", SOTA_SHAPE));
static MYPOTA: LazyLock<Regex> = LazyLock::new(|| keyword_re("mypota", POTA_SHAPE));
static NICKNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^nickname\b\s*(.*)$").expect("header pattern compiles"));

fn token(re: &Regex, line: &str) -> Option<Option<String>> {
    re.captures(line)
        .map(|caps| caps.get(1).map(|m| m.as_str().to_ascii_uppercase()))
}

fn free_text(re: &Regex, line: &str) -> Option<Option<String>> {
    re.captures(line).map(|caps| {
        caps.get(1)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Tests a comment-stripped, trimmed line against the header directives,
/// in their fixed order.
pub fn match_header(line: &str) -> Option<HeaderMatch> {
    if let Some(v) = token(&MYCALL, line) {
        return Some(HeaderMatch {
            keyword: "mycall",
            field: v.map(HeaderField::MyCall),
        });
    }
    if let Some(v) = token(&MYGRID, line) {
        return Some(HeaderMatch {
            keyword: "mygrid",
            field: v.map(HeaderField::MyGrid),
        });
    }
    if let Some(caps) = OPERATORS.captures(line) {
        let calls: Vec<String> = caps
            .get(1)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| OPERATOR_CALL.is_match(t))
            .map(str::to_ascii_uppercase)
            .collect();
        return Some(HeaderMatch {
            keyword: "operators",
            field: (!calls.is_empty()).then_some(HeaderField::Operators(calls)),
        });
    }
    if let Some(v) = free_text(&QSLMSG, line) {
        return Some(HeaderMatch {
            keyword: "qslmsg",
            field: v.map(HeaderField::QslMsg),
        });
    }
    if let Some(v) = token(&MYWWFF, line) {
        return Some(HeaderMatch {
            keyword: "mywwff",
            field: v.map(HeaderField::MyWwff),
        });
    }
    if let Some(v) = token(&MYSOTA, line) {
        return Some(HeaderMatch {
            keyword: "mysota",
            field: v.map(HeaderField::MySota),
        });
    }
    if let Some(v) = token(&MYPOTA, line) {
        return Some(HeaderMatch {
            keyword: "mypota",
            field: v.map(HeaderField::MyPota),
        });
    }
    if let Some(v) = free_text(&NICKNAME, line) {
        return Some(HeaderMatch {
            keyword: "nickname",
            field: v.map(HeaderField::Nickname),
        });
    }
    None
}

/// Session-wide values accumulated while scanning a log.
///
/// Singular fields keep the last assignment; operators are the union of
/// every `operators` line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionHeader {
    /// Station callsign.
    pub my_call: String,
    /// Station locator.
    pub my_grid: String,
    /// Session QSL message.
    pub qsl_msg: String,
    /// Station WWFF reference.
    pub my_wwff: String,
    /// Station SOTA summit.
    pub my_sota: String,
    /// Station POTA park.
    pub my_pota: String,
    /// Free-text location nickname.
    pub qth_nickname: String,
    /// Operator roster.
    pub operators: BTreeSet<String>,
}

impl SessionHeader {
    /// Folds one directive into the accumulator.
    pub fn apply(&mut self, field: HeaderField) {
        match field {
            HeaderField::MyCall(v) => self.my_call = v,
            HeaderField::MyGrid(v) => self.my_grid = v,
            HeaderField::Operators(calls) => self.operators.extend(calls),
            HeaderField::QslMsg(v) => self.qsl_msg = v,
            HeaderField::MyWwff(v) => self.my_wwff = v,
            HeaderField::MySota(v) => self.my_sota = v,
            HeaderField::MyPota(v) => self.my_pota = v,
            HeaderField::Nickname(v) => self.qth_nickname = v,
        }
    }
}
