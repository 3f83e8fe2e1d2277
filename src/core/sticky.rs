//! Values that carry from one log line to the next.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    qso::{DateToken, QsoFields},
    types::{Band, Mode},
};

/// Date rows get before any date token is seen.
pub fn sentinel_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Carried band, frequency, mode, date and time-of-day.
#[derive(Debug, Clone, PartialEq)]
pub struct StickyState {
    /// Current band.
    pub band: Option<Band>,
    /// Current frequency, MHz.
    pub freq: Option<f64>,
    /// Current mode.
    pub mode: Option<Mode>,
    /// Current date.
    pub date: NaiveDate,
    /// Accumulated time-of-day.
    pub time: NaiveTime,
}

impl Default for StickyState {
    fn default() -> Self {
        Self {
            band: None,
            freq: None,
            mode: None,
            date: sentinel_date(),
            time: NaiveTime::MIN,
        }
    }
}

impl StickyState {
    /// Date and time-of-day combined.
    pub fn date_time(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Overwrites carried values with whatever `fields` set.
    ///
    /// Returns a message when a day advance runs off the calendar; the date
    /// is left as it was in that case.
    pub fn absorb(&mut self, fields: &QsoFields) -> Option<String> {
        if let Some(band) = fields.band {
            self.band = Some(band);
        }
        if let Some(freq) = fields.freq {
            self.freq = Some(freq);
        }
        if let Some(mode) = fields.mode {
            self.mode = Some(mode);
        }
        let mut problem = None;
        match fields.date {
            Some(DateToken::On(date)) => self.date = date,
            Some(DateToken::AdvanceDays(n)) => match self.date.checked_add_days(Days::new(n)) {
                Some(date) => self.date = date,
                None => problem = Some(format!("cannot advance date {} by {n} days", self.date)),
            },
            None => {}
        }
        if let Some(delta) = fields.time {
            self.time = self.time.overflowing_add_signed(delta).0;
        }
        problem
    }

    /// Drops the frequency when it lies outside the current band.
    pub fn reconcile_band_freq(&mut self) {
        if let (Some(band), Some(freq)) = (self.band, self.freq) {
            if !band.contains(freq) {
                self.freq = None;
            }
        }
    }
}
