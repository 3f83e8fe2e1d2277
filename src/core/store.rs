use std::{collections::BTreeSet, ops::Index};

use serde::Serialize;

use crate::{
    core::{
        header::SessionHeader,
        indices::{VecIndex, build_index},
    },
    error::ParsingError,
    parser::{LogParser, ParseOptions},
    qso::LogRow,
};

/// Parsed log: session header values plus contact rows in input order.
///
/// Built once from a text snapshot and never changed afterwards; parse the
/// new text again to pick up edits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogFile {
    my_call: String,
    my_grid: String,
    qsl_msg: String,
    my_wwff: String,
    my_sota: String,
    my_pota: String,
    qth_nickname: String,
    operators: BTreeSet<String>,
    rows: Vec<LogRow>,
    diagnostics: Vec<ParsingError>,
    #[serde(skip)]
    by_call: VecIndex<String>,
}

impl LogFile {
    pub(crate) fn from_parts(
        header: SessionHeader,
        rows: Vec<LogRow>,
        diagnostics: Vec<ParsingError>,
    ) -> Self {
        let by_call = build_index(&rows, |r| r.call.clone());
        Self {
            my_call: header.my_call,
            my_grid: header.my_grid,
            qsl_msg: header.qsl_msg,
            my_wwff: header.my_wwff,
            my_sota: header.my_sota,
            my_pota: header.my_pota,
            qth_nickname: header.qth_nickname,
            operators: header.operators,
            rows,
            diagnostics,
            by_call,
        }
    }

    /// Parses `lines` with default options.
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        LogParser::new(ParseOptions::default()).parse(lines)
    }

    pub fn from_text(text: &str) -> Self {
        Self::parse(text.lines())
    }

    pub fn my_call(&self) -> &str {
        &self.my_call
    }

    pub fn my_grid(&self) -> &str {
        &self.my_grid
    }

    pub fn qsl_msg(&self) -> &str {
        &self.qsl_msg
    }

    pub fn my_wwff(&self) -> &str {
        &self.my_wwff
    }

    pub fn my_sota(&self) -> &str {
        &self.my_sota
    }

    pub fn my_pota(&self) -> &str {
        &self.my_pota
    }

    pub fn qth_nickname(&self) -> &str {
        &self.qth_nickname
    }

    pub fn operators(&self) -> &BTreeSet<String> {
        &self.operators
    }

    pub fn diagnostics(&self) -> &[ParsingError] {
        &self.diagnostics
    }

    pub fn rows(&self) -> &[LogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LogRow> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogRow> {
        self.rows.iter()
    }

    pub fn recent(&self, n: usize) -> &[LogRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    /// Every contact with `call`, case-insensitive, in log order.
    pub fn by_call(&self, call: &str) -> Vec<&LogRow> {
        self.by_call
            .get(&call.to_ascii_uppercase())
            .into_iter()
            .flat_map(|positions| positions.iter())
            .filter_map(|pos| self.rows.get(*pos))
            .collect()
    }
}

impl Index<usize> for LogFile {
    type Output = LogRow;

    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl<'a> IntoIterator for &'a LogFile {
    type Item = &'a LogRow;
    type IntoIter = std::slice::Iter<'a, LogRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
