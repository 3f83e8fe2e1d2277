//! Line-by-line driver that turns log text into a [`LogFile`].

use chrono::{Datelike, Utc};
use tracing::{debug, trace, warn};

use crate::{
    core::{
        comments::CommentFilter,
        extract::extract,
        header::SessionHeader,
        rst::{default_rst, normalize_rst},
        sticky::StickyState,
        store::LogFile,
    },
    error::ParsingError,
    op::LineOp,
    qso::{LogRow, QsoFields},
};

/// Knobs for a single parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Rows without a `,exchange` take the previous sent exchange plus one
    /// instead of a plain copy.
    pub auto_increment_exchange: bool,
    /// Year used to decide whether a two-digit year is in the future.
    /// `None` means the current UTC year.
    pub reference_year: Option<i32>,
}

/// Parses log text. Stateless between calls; every parse starts fresh.
#[derive(Debug, Clone, Default)]
pub struct LogParser {
    options: ParseOptions,
}

impl LogParser {
    /// Creates a parser with `options`.
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parses every line. Never fails; structural problems end up in
    /// [`LogFile::diagnostics`].
    pub fn parse<I, S>(&self, lines: I) -> LogFile
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let reference_year = self
            .options
            .reference_year
            .unwrap_or_else(|| Utc::now().year());
        let mut run = ParseRun::new(&self.options, reference_year);
        for (index, line) in lines.into_iter().enumerate() {
            run.step(index, line.as_ref());
        }
        run.finish()
    }

    /// Like [`LogParser::parse`], but the first diagnostic becomes an error.
    pub fn parse_strict<I, S>(&self, lines: I) -> Result<LogFile, ParsingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let log = self.parse(lines);
        match log.diagnostics().first() {
            Some(err) => Err(err.clone()),
            None => Ok(log),
        }
    }
}

struct ParseRun<'a> {
    options: &'a ParseOptions,
    reference_year: i32,
    comments: CommentFilter,
    sticky: StickyState,
    header: SessionHeader,
    rows: Vec<LogRow>,
    diagnostics: Vec<ParsingError>,
}

impl<'a> ParseRun<'a> {
    fn new(options: &'a ParseOptions, reference_year: i32) -> Self {
        Self {
            options,
            reference_year,
            comments: CommentFilter::new(),
            sticky: StickyState::default(),
            header: SessionHeader::default(),
            rows: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn report(&mut self, index: usize, raw: &str, message: String) {
        let err = ParsingError::at(index, raw, message);
        warn!(%err, "log diagnostic");
        self.diagnostics.push(err);
    }

    fn step(&mut self, index: usize, raw: &str) {
        if LineOp::skips(raw) {
            return;
        }
        let stripped = self.comments.strip_line(raw);
        let line = stripped.trim();
        match LineOp::classify(line) {
            LineOp::Skip => {}
            LineOp::Correction => {
                if let Some(row) = self.rows.pop() {
                    trace!(line = index + 1, call = %row.call, "row retracted");
                } else {
                    self.report(index, raw, format!("`{line}` with no contact to remove"));
                }
            }
            LineOp::Header(header) => {
                trace!(line = index + 1, keyword = header.keyword, "header");
                if let Some(field) = header.field {
                    self.header.apply(field);
                }
            }
            LineOp::Qso => self.qso(index, raw, line),
        }
    }

    fn qso(&mut self, index: usize, raw: &str, line: &str) {
        let scan = extract(line, self.reference_year);
        for problem in scan.problems {
            self.report(index, raw, problem);
        }
        let mut fields = scan.fields;

        if let Some(problem) = self.sticky.absorb(&fields) {
            self.report(index, raw, problem);
        }
        if fields.struck {
            trace!(line = index + 1, "line struck out");
            return;
        }
        self.sticky.reconcile_band_freq();

        let Some(call) = fields.call.take() else {
            return;
        };
        if fields.sent_exch.is_none() {
            fields.sent_exch = self.inherited_exchange(index, raw);
        }

        let row = self.build_row(call, fields);
        trace!(line = index + 1, call = %row.call, "row");
        self.rows.push(row);
    }

    fn inherited_exchange(&mut self, index: usize, raw: &str) -> Option<String> {
        let prev = self.rows.last()?.sent_exch.clone()?;
        if !self.options.auto_increment_exchange {
            return Some(prev);
        }
        match increment_exchange(&prev) {
            Some(next) => Some(next),
            None => {
                self.report(index, raw, format!("cannot increment exchange `{prev}`"));
                Some(prev)
            }
        }
    }

    fn build_row(&self, call: String, fields: QsoFields) -> LogRow {
        let mode = self.sticky.mode;
        let report = |raw: Option<String>| match raw {
            Some(raw) => normalize_rst(&raw, mode),
            None => default_rst(mode).to_string(),
        };
        LogRow {
            date_time: self.sticky.date_time(),
            band: self.sticky.band,
            freq: self.sticky.freq,
            mode,
            call,
            sent_rst: report(fields.sent_rst),
            rcvd_rst: report(fields.rcvd_rst),
            notes: fields.notes,
            name: fields.name,
            grid: fields.grid,
            qsl_msg: fields.qsl_msg,
            sent_exch: fields.sent_exch,
            rcvd_exch: fields.rcvd_exch,
            wwff: fields.wwff,
            sota: fields.sota,
            pota: fields.pota,
        }
    }

    fn finish(self) -> LogFile {
        debug!(
            rows = self.rows.len(),
            operators = self.header.operators.len(),
            diagnostics = self.diagnostics.len(),
            "log parsed"
        );
        LogFile::from_parts(self.header, self.rows, self.diagnostics)
    }
}

/// Adds one to a numeric exchange, keeping any zero padding (`009` -> `010`).
pub fn increment_exchange(exch: &str) -> Option<String> {
    if exch.is_empty() || !exch.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let next = exch.parse::<u64>().ok()?.checked_add(1)?;
    Some(format!("{next:0width$}", width = exch.len()))
}
