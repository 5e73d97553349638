//! Display formatting for terminal output
//!
//! Provides the text helpers used when rendering the budget grid and
//! session output.

pub mod report;

pub use report::{double_separator, format_amount_cell, format_month_list, separator, truncate};
