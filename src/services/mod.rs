//! Service layer for budget-builder
//!
//! The service layer provides the editing and aggregation operations on top
//! of the in-memory session, handling validation, position lookups, and
//! audit logging.

pub mod category;
pub mod range;
pub mod totals;

pub use category::CategoryService;
pub use range::{format_month_input, parse_date_input, parse_month_input, RangeService};
pub use totals::TotalsService;
