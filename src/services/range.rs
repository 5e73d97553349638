//! Month-range service
//!
//! Owns edits to the budget's date range. Every edit rebuilds the month list
//! and resets every value row, even when the number of months stays the same.

use chrono::NaiveDate;

use crate::audit::AuditEntry;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{DateRange, Endpoint, MonthKey};
use crate::session::Session;

/// Service for date-range management
pub struct RangeService<'a> {
    session: &'a mut Session,
}

impl<'a> RangeService<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    /// Move one endpoint of the range to the month containing `date`
    ///
    /// The start snaps to the first day of its month and the end to the last
    /// day. If the start ends up after the end, the endpoint that was not
    /// edited is pulled onto the edited month. The month list is then
    /// regenerated and every amount is reset to zero.
    ///
    /// Fails with `InvalidDate` without touching the budget when the month
    /// boundary is outside the supported calendar.
    pub fn set_range_endpoint(&mut self, date: NaiveDate, endpoint: Endpoint) -> BudgetResult<DateRange> {
        let before = *self.session.budget().range();
        let range = before
            .with_endpoint(date, endpoint)
            .map_err(|e| BudgetError::InvalidDate(e.to_string()))?;

        self.session.budget_mut().set_range(range);
        self.session.record(AuditEntry::range(before, range));

        Ok(range)
    }

    pub fn range(&self) -> &DateRange {
        self.session.budget().range()
    }

    pub fn months(&self) -> &[MonthKey] {
        self.session.budget().months()
    }
}

/// Parse date text from a form control
///
/// Accepts "YYYY-MM-DD", "YYYY-MM" and "Jan 2024"; month-only input resolves
/// to the first day of that month.
pub fn parse_date_input(input: &str) -> BudgetResult<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    MonthKey::parse(input)
        .ok()
        .and_then(|month| month.first_day())
        .ok_or_else(|| BudgetError::InvalidDate(input.to_string()))
}

/// Parse a month reference such as "Jan 2024" or "2024-01"
pub fn parse_month_input(input: &str) -> BudgetResult<MonthKey> {
    MonthKey::parse(input).map_err(|e| BudgetError::InvalidDate(e.to_string()))
}

/// Format a date as the "YYYY-MM" value a month picker expects
pub fn format_month_input(date: NaiveDate) -> String {
    MonthKey::from_date(date).iso()
}
