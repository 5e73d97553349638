//! Text formatting helpers for grid output

use crate::models::{Money, MonthKey};

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Right-align an amount in a cell of the given width
///
/// Zero amounts render as "-" so filled cells stand out.
pub fn format_amount_cell(amount: Money, width: usize) -> String {
    if amount.is_zero() {
        format!("{:>width$}", "-", width = width)
    } else {
        format!("{:>width$}", amount, width = width)
    }
}

/// Numbered month list, one per line ("  0  Jan 2024  (2024-01)")
pub fn format_month_list(months: &[MonthKey]) -> String {
    months
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{:>3}  {}  ({})\n", i, m.label(), m.iso()))
        .collect()
}
