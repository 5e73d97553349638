//! Calendar month keys
//!
//! A `MonthKey` is a stable integer index (`year * 12 + month0`). The short
//! label shown in the grid ("Jan 2024") is derived on demand and never stored,
//! so ordering and equality never depend on string formatting.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// One calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MonthKey(i32);

impl MonthKey {
    /// Create a key from a year and a 1-based month
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        year.checked_mul(12)
            .and_then(|y| y.checked_add(month as i32 - 1))
            .map(Self)
            .ok_or(MonthParseError::YearOutOfRange(year))
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.year() * 12 + date.month0() as i32)
    }

    /// Rebuild a key from its raw index
    pub const fn from_index(index: i32) -> Self {
        Self(index)
    }

    /// The raw month index (`year * 12 + month0`)
    pub const fn index(&self) -> i32 {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.div_euclid(12)
    }

    /// 1-based month number
    pub fn month(&self) -> u32 {
        self.0.rem_euclid(12) as u32 + 1
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub fn prev(&self) -> Self {
        Self(self.0 - 1)
    }

    /// First day of the month, `None` outside chrono's calendar
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year(), self.month(), 1)
    }

    /// Last day of the month, `None` outside chrono's calendar
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.first_day()?
            .checked_add_months(Months::new(1))?
            .pred_opt()
    }

    /// Short grid label, e.g. "Jan 2024"
    pub fn label(&self) -> String {
        format!(
            "{} {}",
            MONTH_ABBREVIATIONS[self.month() as usize - 1],
            self.year()
        )
    }

    /// Form-control value, e.g. "2024-01"
    pub fn iso(&self) -> String {
        format!("{:04}-{:02}", self.year(), self.month())
    }

    /// Number of months from `start` to `end` inclusive (0 if inverted)
    pub fn span(start: MonthKey, end: MonthKey) -> usize {
        if end < start {
            0
        } else {
            (end.0 - start.0) as usize + 1
        }
    }

    /// Parse a month in either "2024-01" or "Jan 2024"/"January 2024" form
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();

        if let Some((year, month)) = s.split_once('-') {
            if !year.is_empty() && year.chars().all(|c| c.is_ascii_digit()) {
                let year: i32 = year
                    .parse()
                    .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
                let month: u32 = month
                    .parse()
                    .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
                return Self::new(year, month);
            }
        }

        let mut parts = s.split_whitespace();
        if let (Some(name), Some(year), None) = (parts.next(), parts.next(), parts.next()) {
            let name = name.to_lowercase();
            let month = MONTH_NAMES
                .iter()
                .position(|full| name.len() >= 3 && full.starts_with(name.as_str()))
                .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;
            let year: i32 = year
                .parse()
                .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
            return Self::new(year, month as u32 + 1);
        }

        Err(MonthParseError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.label())
    }
}

impl FromStr for MonthKey {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.iso()
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    YearOutOfRange(i32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            MonthParseError::YearOutOfRange(y) => write!(f, "Year out of range: {}", y),
        }
    }
}

impl std::error::Error for MonthParseError {}
