//! Category and Item models
//!
//! A budget has two trees (income and expenses). Each tree is an ordered
//! list of categories; each category owns an ordered list of items. Both
//! categories and items carry a per-month value row.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ItemId};
use super::month::MonthKey;
use super::values::ValueRow;

const MAX_NAME_LEN: usize = 50;

/// Which of the two parallel trees a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tree {
    Income,
    Expenses,
}

impl Tree {
    pub fn all() -> &'static [Self] {
        &[Self::Income, Self::Expenses]
    }

    /// Name given to categories created through `add_category`
    pub fn new_category_name(&self) -> &'static str {
        match self {
            Self::Income => "New Income Category",
            Self::Expenses => "New Expense Category",
        }
    }

    /// Name given to items created through `add_item`
    pub fn new_item_name(&self) -> &'static str {
        match self {
            Self::Income => "New Item",
            Self::Expenses => "New Expense",
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expenses => write!(f, "Expenses"),
        }
    }
}

impl std::str::FromStr for Tree {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expenses" | "expense" | "out" => Ok(Self::Expenses),
            other => Err(format!("expected 'income' or 'expenses', got '{}'", other)),
        }
    }
}

/// A leaf line item under a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub values: ValueRow,
}

impl Item {
    /// Create an item with a zeroed row over `months`
    pub fn new(name: impl Into<String>, months: &[MonthKey]) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            values: ValueRow::zeroed(months),
        }
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A budget category
///
/// Besides its items, a category has its own direct row for amounts that
/// are not broken down further (e.g. unallocated income).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,

    /// Item ids in display order
    pub items: Vec<ItemId>,

    /// Seeded at initialization. Informational only.
    #[serde(default)]
    pub is_default: bool,

    pub values: ValueRow,
}

impl Category {
    /// Create an empty, non-default category with a zeroed row over `months`
    pub fn new(name: impl Into<String>, months: &[MonthKey]) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            items: Vec::new(),
            is_default: false,
            values: ValueRow::zeroed(months),
        }
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
    if name.trim().is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }

    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(CategoryValidationError::NameTooLong(len));
    }

    Ok(())
}

/// Categories seeded into every new budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCategory {
    GeneralIncome,
    OtherIncome,
    FixedExpenses,
    VariableExpenses,
}

impl DefaultCategory {
    /// All defaults in seeding order
    pub fn all() -> &'static [Self] {
        &[
            Self::GeneralIncome,
            Self::OtherIncome,
            Self::FixedExpenses,
            Self::VariableExpenses,
        ]
    }

    pub fn tree(&self) -> Tree {
        match self {
            Self::GeneralIncome | Self::OtherIncome => Tree::Income,
            Self::FixedExpenses | Self::VariableExpenses => Tree::Expenses,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::GeneralIncome => "General Income",
            Self::OtherIncome => "Other Income",
            Self::FixedExpenses => "Fixed Expenses",
            Self::VariableExpenses => "Variable Expenses",
        }
    }

    pub fn item_names(&self) -> &'static [&'static str] {
        match self {
            Self::GeneralIncome => &["Sales", "Commissions"],
            Self::OtherIncome => &["Training", "Consulting"],
            Self::FixedExpenses => &["Rent", "Utilities"],
            Self::VariableExpenses => &["Marketing", "Office Supplies"],
        }
    }
}

/// Validation errors for category and item names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn months() -> Vec<MonthKey> {
        let jan = MonthKey::new(2024, 1).unwrap();
        vec![jan, jan.next()]
    }

    #[test]
    fn test_new_category() {
        let category = Category::new("Bonus", &months());
        assert_eq!(category.name, "Bonus");
        assert!(category.items.is_empty());
        assert!(!category.is_default);
        assert!(category.values.matches_schema(&months()));
    }

    #[test]
    fn test_new_item() {
        let item = Item::new("Q1", &months());
        assert_eq!(item.to_string(), "Q1");
        assert_eq!(item.values.len(), 2);
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new("Valid", &months());
        assert!(category.validate().is_ok());

        category.name = "   ".into();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        );
    }

    #[test]
    fn test_tree_names() {
        assert_eq!(Tree::Income.new_category_name(), "New Income Category");
        assert_eq!(Tree::Expenses.new_category_name(), "New Expense Category");
        assert_eq!(Tree::Income.new_item_name(), "New Item");
        assert_eq!(Tree::Expenses.new_item_name(), "New Expense");
    }

    #[test]
    fn test_tree_from_str() {
        assert_eq!("income".parse::<Tree>().unwrap(), Tree::Income);
        assert_eq!("Expense".parse::<Tree>().unwrap(), Tree::Expenses);
        assert!("assets".parse::<Tree>().is_err());
    }

    #[test]
    fn test_default_categories() {
        let defaults = DefaultCategory::all();
        assert_eq!(defaults.len(), 4);
        assert_eq!(defaults[0].name(), "General Income");
        assert_eq!(defaults[0].item_names(), &["Sales", "Commissions"]);
        assert_eq!(defaults[3].tree(), Tree::Expenses);
    }

    #[test]
    fn test_serialization() {
        let category = Category::new("Bonus", &months());
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["values"]["2024-01"], 0);
        assert_eq!(json["is_default"], false);
    }
}
