//! Reports module for budget-builder
//!
//! Builds the full budget grid (rows, totals and profit/loss) for terminal
//! display and export.

pub mod grid;

pub use grid::{CategoryRow, GridReport, ItemRow, TreeSection};
