//! Core data models for budget-builder
//!
//! This module contains the data structures behind the budget grid: month
//! keys and ranges, per-month value rows, categories and items, and the
//! budget aggregate that ties them together.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod range;
pub mod values;

pub use budget::Budget;
pub use category::{Category, CategoryValidationError, DefaultCategory, Item, Tree};
pub use ids::{CategoryId, ItemId};
pub use money::{Money, MoneyParseError};
pub use month::{MonthKey, MonthParseError};
pub use range::{DateRange, DateRangeError, Endpoint};
pub use values::ValueRow;
