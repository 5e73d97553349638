//! Audit entries
//!
//! An entry names the row that was edited (if any) and carries a typed
//! `Change` describing the edit, so a log line can be read back without
//! re-deriving anything from the budget.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DateRange, Money, MonthKey, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Category or item row an edit applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRef {
    pub tree: Tree,
    pub category: String,
    /// Item name; absent when the edit is on the category row itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

impl RowRef {
    pub fn category(tree: Tree, category: impl Into<String>) -> Self {
        Self {
            tree,
            category: category.into(),
            item: None,
        }
    }

    pub fn item(tree: Tree, category: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            tree,
            category: category.into(),
            item: Some(item.into()),
        }
    }
}

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.tree, self.category)?;
        if let Some(item) = &self.item {
            write!(f, " / {}", item)?;
        }
        Ok(())
    }
}

/// What an edit did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    /// A category or item row was appended at `position`
    Added { position: usize },
    /// An item was removed from `position`; later items moved up
    Removed { position: usize },
    Renamed { from: String, to: String },
    /// One month's amount on a row
    Cell { month: MonthKey, from: Money, to: Money },
    /// The date range moved; every amount was reset
    Range { from: DateRange, to: DateRange },
}

impl Change {
    pub fn operation(&self) -> Operation {
        match self {
            Change::Added { .. } => Operation::Create,
            Change::Removed { .. } => Operation::Delete,
            Change::Renamed { .. } | Change::Cell { .. } | Change::Range { .. } => Operation::Update,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Added { position } => write!(f, "added at [{}]", position),
            Change::Removed { position } => write!(f, "removed from [{}]", position),
            Change::Renamed { from, to } => write!(f, "renamed '{}' -> '{}'", from, to),
            Change::Cell { month, from, to } => write!(f, "{} {} -> {}", month, from, to),
            Change::Range { from, to } => write!(f, "range {} -> {}", from, to),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,

    /// Edited row; absent for range changes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<RowRef>,

    pub change: Change,
}

impl AuditEntry {
    /// Entry for an edit on one row
    pub fn row(row: RowRef, change: Change) -> Self {
        Self::new(Some(row), change)
    }

    /// Entry for a change of the budget's date range
    pub fn range(from: DateRange, to: DateRange) -> Self {
        Self::new(None, Change::Range { from, to })
    }

    fn new(row: Option<RowRef>, change: Change) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: change.operation(),
            row,
            change,
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation
        )?;
        if let Some(row) = &self.row {
            write!(f, "{}: ", row)?;
        }
        write!(f, "{}", self.change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Endpoint;
    use chrono::NaiveDate;

    fn jan() -> MonthKey {
        MonthKey::new(2024, 1).unwrap()
    }

    #[test]
    fn test_operation_follows_change() {
        let rent = RowRef::item(Tree::Expenses, "Fixed Expenses", "Rent");
        assert_eq!(
            AuditEntry::row(rent.clone(), Change::Added { position: 2 }).operation,
            Operation::Create
        );
        assert_eq!(
            AuditEntry::row(rent.clone(), Change::Removed { position: 0 }).operation,
            Operation::Delete
        );
        assert_eq!(
            AuditEntry::row(
                rent,
                Change::Cell {
                    month: jan(),
                    from: Money::zero(),
                    to: Money::from_cents(45_000),
                }
            )
            .operation,
            Operation::Update
        );
    }

    #[test]
    fn test_display() {
        let entry = AuditEntry::row(
            RowRef::item(Tree::Expenses, "Fixed Expenses", "Rent"),
            Change::Cell {
                month: jan(),
                from: Money::zero(),
                to: Money::from_cents(45_000),
            },
        );
        let text = entry.to_string();
        assert!(text.ends_with("UPDATE Expenses / Fixed Expenses / Rent: Jan 2024 0.00 -> 450.00"));

        let renamed = AuditEntry::row(
            RowRef::category(Tree::Income, "Bonus"),
            Change::Renamed {
                from: "New Income Category".into(),
                to: "Bonus".into(),
            },
        );
        assert!(renamed
            .to_string()
            .ends_with("UPDATE Income / Bonus: renamed 'New Income Category' -> 'Bonus'"));
    }

    #[test]
    fn test_range_entry() {
        let date = |m| NaiveDate::from_ymd_opt(2024, m, 1).unwrap();
        let from = DateRange::from_months(jan(), MonthKey::new(2024, 12).unwrap()).unwrap();
        let to = from.with_endpoint(date(3), Endpoint::Start).unwrap();

        let entry = AuditEntry::range(from, to);
        assert!(entry.row.is_none());
        assert!(entry
            .to_string()
            .ends_with("UPDATE range 2024-01-01..2024-12-31 -> 2024-03-01..2024-12-31"));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::row(
            RowRef::category(Tree::Income, "Other Income"),
            Change::Cell {
                month: jan(),
                from: Money::zero(),
                to: Money::from_cents(2_500),
            },
        );
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["operation"], "update");
        assert_eq!(json["row"]["tree"], "income");
        assert!(json["row"].get("item").is_none());
        assert_eq!(json["change"]["kind"], "cell");
        assert_eq!(json["change"]["month"], "2024-01");
        assert_eq!(json["change"]["to"], 2500);

        let back: AuditEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back.change, entry.change);
        assert_eq!(back.row, entry.row);
    }
}
