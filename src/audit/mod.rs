//! Audit trail for budget edits
//!
//! Records every structural edit, cell change and range change with
//! before/after values.
//!
//! # Architecture
//!
//! - `AuditEntry`: a timestamped entry naming the edited row (`RowRef`) and
//!   a typed `Change` (row added or removed, rename, cell amount, range).
//! - `AuditLogger`: keeps the session's entries in memory and, when given a
//!   path, appends each one to a line-delimited JSON file (JSONL).
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_builder::audit::{AuditEntry, AuditLogger, Change, RowRef};
//! use budget_builder::models::Tree;
//!
//! let mut logger = AuditLogger::in_memory();
//! logger.log(AuditEntry::row(
//!     RowRef::item(Tree::Expenses, "Fixed Expenses", "Rent"),
//!     Change::Renamed { from: "Rent".into(), to: "Lease".into() },
//! ));
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Change, Operation, RowRef};
pub use logger::AuditLogger;
