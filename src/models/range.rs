//! Active date range of a budget
//!
//! The range always spans whole months: the start is the first day of its
//! month and the end is the last day of its month, with `start <= end`.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::month::MonthKey;

/// Which side of the range an edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
        }
    }
}

impl std::str::FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" | "from" => Ok(Self::Start),
            "end" | "to" => Ok(Self::End),
            other => Err(format!("expected 'start' or 'end', got '{}'", other)),
        }
    }
}

/// A whole-month date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Range covering `first` through `last`, both inclusive
    pub fn from_months(first: MonthKey, last: MonthKey) -> Result<Self, DateRangeError> {
        if last < first {
            return Err(DateRangeError::Inverted { first, last });
        }
        let start = first
            .first_day()
            .ok_or(DateRangeError::Unrepresentable(first))?;
        let end = last
            .last_day()
            .ok_or(DateRangeError::Unrepresentable(last))?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn first_month(&self) -> MonthKey {
        MonthKey::from_date(self.start)
    }

    pub fn last_month(&self) -> MonthKey {
        MonthKey::from_date(self.end)
    }

    /// Number of months covered
    pub fn len(&self) -> usize {
        MonthKey::span(self.first_month(), self.last_month())
    }

    /// Never true: a range covers at least its start month
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Move one endpoint to the month containing `date`
    ///
    /// The edited endpoint snaps to its month boundary (first day for the
    /// start, last day for the end). If that leaves the start after the end,
    /// the other endpoint is pulled onto the edited month, so the edit itself
    /// always survives.
    pub fn with_endpoint(&self, date: NaiveDate, endpoint: Endpoint) -> Result<Self, DateRangeError> {
        let edited = MonthKey::from_date(date);
        let (first, last) = match endpoint {
            Endpoint::Start => {
                let last = self.last_month().max(edited);
                (edited, last)
            }
            Endpoint::End => {
                let first = self.first_month().min(edited);
                (first, edited)
            }
        };
        Self::from_months(first, last)
    }

    /// Walk the range one calendar month at a time
    ///
    /// Starts from a copy of the start date and keeps stepping until the
    /// cursor passes the end date.
    pub fn month_keys(&self) -> Vec<MonthKey> {
        let mut months = Vec::with_capacity(self.len());
        let mut cursor = self.start;
        while cursor <= self.end {
            months.push(MonthKey::from_date(cursor));
            match cursor.checked_add_months(Months::new(1)) {
                Some(next) => cursor = next,
                None => break,
            }
        }
        months
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Error type for range construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    Inverted { first: MonthKey, last: MonthKey },
    Unrepresentable(MonthKey),
}

impl fmt::Display for DateRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inverted { first, last } => {
                write!(f, "range start {} is after end {}", first, last)
            }
            Self::Unrepresentable(month) => {
                write!(f, "month {} is outside the supported calendar", month.iso())
            }
        }
    }
}

impl std::error::Error for DateRangeError {}
