//! Field extraction for a single QSO line.
//!
//! Extraction is an ordered fold over [`PIPELINE`]. Every step searches the
//! text that is still left, records what it found in [`QsoFields`], and
//! blanks the matched text so later steps never see it. The order matters:
//! bands are taken before frequencies, dates before times, and the callsign
//! only after every numeric token that could look like one is gone.

use std::{ops::Range, sync::LazyLock};

use chrono::{Datelike, NaiveDate, TimeDelta};
use regex::Regex;
use tracing::trace;

use crate::{
    core::header::{GRID_SHAPE, POTA_SHAPE, SOTA_SHAPE, WWFF_SHAPE},
    qso::{DateToken, QsoFields},
    types::{Band, Mode},
};

/// Working state threaded through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Scan {
    /// Text not yet claimed by any step.
    pub rest: String,
    /// Values found so far.
    pub fields: QsoFields,
    /// Problems worth reporting against this line.
    pub problems: Vec<String>,
    reference_year: i32,
}

impl Scan {
    /// Starts a scan of `line`. Two-digit years after `reference_year` are
    /// read as 1900s.
    pub fn new(line: &str, reference_year: i32) -> Self {
        Self {
            rest: line.to_string(),
            fields: QsoFields::default(),
            problems: Vec::new(),
            reference_year,
        }
    }

    fn cut(&mut self, start: usize, end: usize) {
        self.rest.replace_range(start..end, " ");
    }

    fn take(&mut self, re: &Regex) -> Option<Hit> {
        let hit = Hit::find(re, &self.rest)?;
        self.cut(hit.span.start, hit.span.end);
        Some(hit)
    }
}

/// One extraction step.
pub type Extractor = fn(Scan) -> Scan;

/// Extraction steps in the order they run.
pub const PIPELINE: [(&str, Extractor); 15] = [
    ("notes", notes),
    ("qsl_msg", qsl_msg),
    ("band", band),
    ("freq", freq),
    ("date", date),
    ("time", time),
    ("mode", mode),
    ("call", call),
    ("name", name),
    ("grid", grid),
    ("sent_exch", sent_exch),
    ("rcvd_exch", rcvd_exch),
    ("references", references),
    ("rst", rst),
    ("strike", strike),
];

/// Runs the whole pipeline over `line`.
pub fn extract(line: &str, reference_year: i32) -> Scan {
    PIPELINE
        .iter()
        .fold(Scan::new(line, reference_year), |scan, (step, run)| {
            let before = scan.rest.len();
            let scan = run(scan);
            if scan.rest.len() != before {
                trace!(step, rest = %scan.rest.trim(), "extracted");
            }
            scan
        })
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("extractor pattern compiles")
}

static NOTES: LazyLock<Regex> = LazyLock::new(|| re(r"<([^>]*)>"));
static QSL_MSG: LazyLock<Regex> = LazyLock::new(|| re(r"\[([^\]]*)\]"));
static BAND: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)(?:^|\s)([0-9]+(?:\.[0-9]+)?[cm]?m)\b"));
static FREQ: LazyLock<Regex> = LazyLock::new(|| re(r"(?:^|\s)([0-9]+\.[0-9]+)(?:\s|$)"));
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)(?:^|\s)(?:date\s+)?([0-9]{2,4})[^0-9A-Za-z\s]([0-9]{1,2})[^0-9A-Za-z\s]([0-9]{1,2})\b")
});
static SPACED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)(?:^|\s)(?:date\s+)?([0-9]{2,4})\s+([0-9]{1,2})\s+([0-9]{1,2})\b")
});
static DAY_ADVANCE: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)(?:^|\s)day\s*(\++)"));
static TIME: LazyLock<Regex> = LazyLock::new(|| re(r"(?:^|\s)([0-9]{1,4})\b"));
static LONG_TIME: LazyLock<Regex> = LazyLock::new(|| re(r"(?:^|\s)([0-9]{4})(?:\s|$)"));
static TOKEN: LazyLock<Regex> = LazyLock::new(|| re(r"\S+"));
static CALL_SHAPE: LazyLock<Regex> = LazyLock::new(|| re(r"^[A-Za-z0-9/]{3,}$"));
static NAME: LazyLock<Regex> = LazyLock::new(|| re(r"(?:^|\s)@(\w+)"));
static GRID: LazyLock<Regex> =
    LazyLock::new(|| re(&format!(r"(?i)(?:^|\s)#({GRID_SHAPE})\b")));
static SENT_EXCH: LazyLock<Regex> = LazyLock::new(|| re(r"(?:^|\s),(\w+)"));
static RCVD_EXCH: LazyLock<Regex> = LazyLock::new(|| re(r"(?:^|\s)\.(\w+)"));
static WWFF: LazyLock<Regex> =
    LazyLock::new(|| re(&format!(r"(?i)(?:^|\s)(?:wwff\s+)?({WWFF_SHAPE})\b")));
static SOTA: LazyLock<Regex> =
    LazyLock::new(|| re(&format!(r"(?i)(?:^|\s)(?:sota\s+)?({SOTA_SHAPE})\b")));
static POTA: LazyLock<Regex> =
    LazyLock::new(|| re(&format!(r"(?i)(?:^|\s)(?:pota\s+)?({POTA_SHAPE})\b")));
static RST: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?:^|\s)([+-]?[0-9]{1,3})(?:\s+([+-]?[0-9]{1,3}))?(?:\s|$)"));
static STRIKE: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)(?:^|\s)(?:delete|drop|error)\b"));

/// Words that are never a callsign.
const RESERVED: [&str; 8] = ["DELETE", "DROP", "ERROR", "WWFF", "SOTA", "POTA", "DATE", "DAY"];

fn is_call(token: &str) -> bool {
    CALL_SHAPE.is_match(token)
        && token.bytes().any(|b| b.is_ascii_alphabetic())
        && Mode::from_name(token).is_none()
        && !RESERVED.iter().any(|r| r.eq_ignore_ascii_case(token))
}

/// An owned regex match: the span to blank and each group's start and text.
struct Hit {
    span: Range<usize>,
    groups: Vec<Option<(usize, String)>>,
}

impl Hit {
    fn find(re: &Regex, text: &str) -> Option<Self> {
        let caps = re.captures(text)?;
        Some(Self {
            span: caps.get_match().range(),
            groups: caps
                .iter()
                .map(|m| m.map(|m| (m.start(), m.as_str().to_string())))
                .collect(),
        })
    }

    fn raw(&self, i: usize) -> &str {
        match self.groups.get(i) {
            Some(Some((_, s))) => s,
            _ => "",
        }
    }

    fn start(&self, i: usize) -> Option<usize> {
        self.groups.get(i).and_then(|g| g.as_ref()).map(|(at, _)| *at)
    }

    fn text(&self, i: usize) -> Option<String> {
        Some(self.raw(i).trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

fn notes(mut scan: Scan) -> Scan {
    if let Some(hit) = scan.take(&NOTES) {
        scan.fields.notes = hit.text(1);
    }
    scan
}

fn qsl_msg(mut scan: Scan) -> Scan {
    if let Some(hit) = scan.take(&QSL_MSG) {
        scan.fields.qsl_msg = hit.text(1);
    }
    scan
}

fn band(mut scan: Scan) -> Scan {
    if let Some(hit) = scan.take(&BAND) {
        if let Some(band) = Band::from_name(hit.raw(1)) {
            scan.fields.band = Some(band);
        }
    }
    scan
}

fn freq(mut scan: Scan) -> Scan {
    if let Some(hit) = scan.take(&FREQ) {
        scan.fields.freq = hit
            .raw(1)
            .parse::<f64>()
            .ok()
            .filter(|mhz| Band::containing(*mhz).is_some());
    }
    scan
}

fn expand_year(raw: &str, reference_year: i32) -> Option<i32> {
    let n: i32 = raw.parse().ok()?;
    Some(match raw.len() {
        2 if 2000 + n > reference_year => 1900 + n,
        2 => 2000 + n,
        3 if raw.starts_with('9') => 1000 + n,
        3 => 2000 + n,
        _ => n,
    })
}

fn calendar_date(hit: &Hit, reference_year: i32) -> Option<NaiveDate> {
    let year = expand_year(hit.raw(1), reference_year)?;
    NaiveDate::from_ymd_opt(year, hit.raw(2).parse().ok()?, hit.raw(3).parse().ok()?)
}

// `2023-06-15` style dates are always taken, and reported when impossible.
// Space-separated digits only count as a date when they make a real one,
// since `1930 5 7` may just as well be a time and two reports.
fn date(mut scan: Scan) -> Scan {
    if let Some(hit) = scan.take(&DATE) {
        match calendar_date(&hit, scan.reference_year) {
            Some(date) => scan.fields.date = Some(DateToken::On(date)),
            None => scan.problems.push(format!(
                "{}-{}-{} is not a calendar date",
                hit.raw(1),
                hit.raw(2),
                hit.raw(3)
            )),
        }
        return scan;
    }
    if let Some(hit) = Hit::find(&SPACED_DATE, &scan.rest) {
        if let Some(date) = calendar_date(&hit, scan.reference_year).filter(|d| d.year() >= 1900) {
            scan.fields.date = Some(DateToken::On(date));
            scan.cut(hit.span.start, hit.span.end);
            return scan;
        }
    }
    if let Some(hit) = scan.take(&DAY_ADVANCE) {
        scan.fields.date = Some(DateToken::AdvanceDays(hit.raw(1).len() as u64));
    }
    scan
}

fn parse_time(raw: &str) -> Option<TimeDelta> {
    let (hours, minutes) = match raw.len() {
        1 | 2 => ("0", raw),
        3 => raw.split_at(1),
        4 => raw.split_at(2),
        _ => return None,
    };
    let hours: i64 = hours.parse().ok()?;
    let minutes: i64 = minutes.parse().ok()?;
    Some(TimeDelta::minutes(hours * 60 + minutes))
}

// Short numbers after the callsign are reports. Four digits can never be a
// report, so `HHMM` is a time wherever it stands.
fn time(mut scan: Scan) -> Scan {
    let limit = TOKEN
        .find_iter(&scan.rest)
        .find(|t| is_call(t.as_str()))
        .map_or(scan.rest.len(), |t| t.start());
    let hit = Hit::find(&TIME, &scan.rest)
        .filter(|hit| hit.start(1).is_some_and(|at| at < limit))
        .or_else(|| Hit::find(&LONG_TIME, &scan.rest));
    if let Some(hit) = hit {
        scan.fields.time = parse_time(hit.raw(1));
        scan.cut(hit.span.start, hit.span.end);
    }
    scan
}

fn mode(mut scan: Scan) -> Scan {
    let found = TOKEN
        .find_iter(&scan.rest)
        .find_map(|t| Mode::from_name(t.as_str()).map(|m| (m, t.range())));
    if let Some((mode, span)) = found {
        scan.fields.mode = Some(mode);
        scan.cut(span.start, span.end);
    }
    scan
}

fn call(mut scan: Scan) -> Scan {
    let found = TOKEN
        .find_iter(&scan.rest)
        .find(|t| is_call(t.as_str()))
        .map(|t| (t.as_str().to_ascii_uppercase(), t.range()));
    if let Some((call, span)) = found {
        scan.fields.call = Some(call);
        scan.cut(span.start, span.end);
    }
    scan
}

/// Capitalises the first letter of every alphabetic run, lowercasing the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

fn name(mut scan: Scan) -> Scan {
    if let Some(hit) = scan.take(&NAME) {
        scan.fields.name = Some(title_case(hit.raw(1)));
    }
    scan
}

fn upper(re: &Regex, mut scan: Scan, set: fn(&mut QsoFields, String)) -> Scan {
    if let Some(hit) = scan.take(re) {
        set(&mut scan.fields, hit.raw(1).to_uppercase());
    }
    scan
}

fn grid(scan: Scan) -> Scan {
    upper(&GRID, scan, |f, v| f.grid = Some(v))
}

fn sent_exch(scan: Scan) -> Scan {
    upper(&SENT_EXCH, scan, |f, v| f.sent_exch = Some(v))
}

fn rcvd_exch(scan: Scan) -> Scan {
    upper(&RCVD_EXCH, scan, |f, v| f.rcvd_exch = Some(v))
}

fn references(scan: Scan) -> Scan {
    let scan = upper(&WWFF, scan, |f, v| f.wwff = Some(v));
    let scan = upper(&SOTA, scan, |f, v| f.sota = Some(v));
    upper(&POTA, scan, |f, v| f.pota = Some(v))
}

fn rst(mut scan: Scan) -> Scan {
    if let Some(hit) = scan.take(&RST) {
        match (hit.text(1), hit.text(2)) {
            (Some(sent), Some(rcvd)) => {
                scan.fields.sent_rst = Some(sent);
                scan.fields.rcvd_rst = Some(rcvd);
            }
            (rcvd, _) => scan.fields.rcvd_rst = rcvd,
        }
    }
    scan
}

fn strike(mut scan: Scan) -> Scan {
    if STRIKE.is_match(&scan.rest) {
        scan.fields.struck = true;
    }
    scan
}
