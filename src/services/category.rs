//! Category service
//!
//! Provides the editing operations on the two category trees: adding
//! categories and items, deleting items, renaming, and setting month amounts.
//! Categories and items are addressed by position; positions are resolved to
//! stable ids before anything is changed.

use crate::audit::{AuditEntry, Change, RowRef};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, CategoryId, Item, ItemId, Money, MonthKey, Tree};
use crate::session::Session;

/// Service for category and item management
pub struct CategoryService<'a> {
    session: &'a mut Session,
}

impl<'a> CategoryService<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    // === Lookups ===

    /// Resolve a category position to its id
    pub fn category_id(&self, tree: Tree, category_index: usize) -> BudgetResult<CategoryId> {
        let ids = self.session.budget().tree(tree);
        ids.get(category_index)
            .copied()
            .ok_or_else(|| BudgetError::category_index(category_index, ids.len()))
    }

    /// Resolve an item position to its id
    pub fn item_id(&self, tree: Tree, category_index: usize, item_index: usize) -> BudgetResult<ItemId> {
        let category = self.category(tree, category_index)?;
        category
            .items
            .get(item_index)
            .copied()
            .ok_or_else(|| BudgetError::item_index(item_index, category.items.len()))
    }

    /// Find a category position by name (case-insensitive)
    pub fn find_category(&self, tree: Tree, name: &str) -> Option<usize> {
        let name = name.trim().to_lowercase();
        self.session
            .budget()
            .categories(tree)
            .position(|c| c.name.to_lowercase() == name)
    }

    fn category(&self, tree: Tree, category_index: usize) -> BudgetResult<&Category> {
        let id = self.category_id(tree, category_index)?;
        self.session
            .budget()
            .category(id)
            .ok_or_else(|| BudgetError::category_not_found(id.to_string()))
    }

    // === Mutations ===

    /// Append a new category to a tree
    ///
    /// Returns the position of the new category.
    pub fn add_category(&mut self, tree: Tree) -> BudgetResult<usize> {
        let name = tree.new_category_name();
        self.session.budget_mut().push_category(tree, name, false);

        let position = self.session.budget().tree(tree).len() - 1;
        self.session.record(AuditEntry::row(
            RowRef::category(tree, name),
            Change::Added { position },
        ));

        Ok(position)
    }

    /// Append a new item to the category at `category_index`
    ///
    /// Returns the position of the new item within the category.
    pub fn add_item(&mut self, tree: Tree, category_index: usize) -> BudgetResult<usize> {
        let category_id = self.category_id(tree, category_index)?;
        let name = tree.new_item_name();
        self.session
            .budget_mut()
            .push_item(category_id, name)
            .ok_or_else(|| BudgetError::category_not_found(category_id.to_string()))?;

        let category = self.category(tree, category_index)?;
        let position = category.items.len() - 1;
        let row = RowRef::item(tree, category.name.clone(), name);
        self.session.record(AuditEntry::row(row, Change::Added { position }));

        Ok(position)
    }

    /// Remove an item; later items in the category move up by one
    pub fn delete_item(&mut self, tree: Tree, category_index: usize, item_index: usize) -> BudgetResult<Item> {
        let category_id = self.category_id(tree, category_index)?;
        // Validates the item position before anything is removed
        self.item_id(tree, category_index, item_index)?;
        let category_name = self.category(tree, category_index)?.name.clone();

        let item = self
            .session
            .budget_mut()
            .remove_item(category_id, item_index)
            .ok_or_else(|| BudgetError::item_index(item_index, 0))?;

        self.session.record(AuditEntry::row(
            RowRef::item(tree, category_name, item.name.clone()),
            Change::Removed { position: item_index },
        ));

        Ok(item)
    }

    /// Set one month's amount on a category row, or on one of its items
    ///
    /// A month outside the current range is added to that row only.
    /// Returns the amount that was replaced.
    pub fn set_cell_value(
        &mut self,
        tree: Tree,
        category_index: usize,
        month: MonthKey,
        value: Money,
        item_index: Option<usize>,
    ) -> BudgetResult<Money> {
        let category_id = self.category_id(tree, category_index)?;
        let category_name = self.category(tree, category_index)?.name.clone();

        let (row, previous) = match item_index {
            Some(item_index) => {
                let item_id = self.item_id(tree, category_index, item_index)?;
                let item = self
                    .session
                    .budget_mut()
                    .item_mut(item_id)
                    .ok_or_else(|| BudgetError::item_index(item_index, 0))?;
                let previous = item.values.set(month, value);
                (RowRef::item(tree, category_name, item.name.clone()), previous)
            }
            None => {
                let category = self
                    .session
                    .budget_mut()
                    .category_mut(category_id)
                    .ok_or_else(|| BudgetError::category_not_found(category_id.to_string()))?;
                let previous = category.values.set(month, value);
                (RowRef::category(tree, category_name), previous)
            }
        };

        if previous != value {
            self.session.record(AuditEntry::row(
                row,
                Change::Cell {
                    month,
                    from: previous,
                    to: value,
                },
            ));
        }

        Ok(previous)
    }

    /// Rename the category at `category_index`
    pub fn rename_category(&mut self, tree: Tree, category_index: usize, name: &str) -> BudgetResult<Category> {
        let before = self.category(tree, category_index)?.clone();

        let mut updated = before.clone();
        updated.name = name.trim().to_string();
        updated
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        if let Some(category) = self.session.budget_mut().category_mut(before.id) {
            category.name = updated.name.clone();
        }

        if before.name != updated.name {
            self.session.record(AuditEntry::row(
                RowRef::category(tree, updated.name.clone()),
                Change::Renamed {
                    from: before.name,
                    to: updated.name.clone(),
                },
            ));
        }

        Ok(updated)
    }

    /// Rename the item at `item_index` within the category at `category_index`
    pub fn rename_item(
        &mut self,
        tree: Tree,
        category_index: usize,
        item_index: usize,
        name: &str,
    ) -> BudgetResult<Item> {
        let item_id = self.item_id(tree, category_index, item_index)?;
        let category_name = self.category(tree, category_index)?.name.clone();
        let before = self
            .session
            .budget()
            .item(item_id)
            .cloned()
            .ok_or_else(|| BudgetError::item_index(item_index, 0))?;

        let mut updated = before.clone();
        updated.name = name.trim().to_string();
        updated
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        if let Some(item) = self.session.budget_mut().item_mut(item_id) {
            item.name = updated.name.clone();
        }

        if before.name != updated.name {
            self.session.record(AuditEntry::row(
                RowRef::item(tree, category_name, updated.name.clone()),
                Change::Renamed {
                    from: before.name,
                    to: updated.name.clone(),
                },
            ));
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLogger, Operation};
    use crate::config::Settings;
    use crate::services::TotalsService;

    fn create_test_session() -> Session {
        Session::from_settings(&Settings::default()).unwrap()
    }

    fn jan() -> MonthKey {
        MonthKey::new(2024, 1).unwrap()
    }

    fn item_names(session: &Session, tree: Tree, category_index: usize) -> Vec<String> {
        let budget = session.budget();
        let category = budget.category_at(tree, category_index).unwrap();
        budget.items_of(category).map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_add_category() {
        let mut session = create_test_session();
        let mut service = CategoryService::new(&mut session);

        assert_eq!(service.add_category(Tree::Income).unwrap(), 2);
        assert_eq!(service.add_category(Tree::Expenses).unwrap(), 2);

        let budget = session.budget();
        let income = budget.category_at(Tree::Income, 2).unwrap();
        assert_eq!(income.name, "New Income Category");
        assert!(!income.is_default);
        assert!(income.items.is_empty());
        assert!(income.values.matches_schema(budget.months()));

        let expense = budget.category_at(Tree::Expenses, 2).unwrap();
        assert_eq!(expense.name, "New Expense Category");
    }

    #[test]
    fn test_add_item() {
        let mut session = create_test_session();
        let mut service = CategoryService::new(&mut session);

        assert_eq!(service.add_item(Tree::Income, 0).unwrap(), 2);
        assert_eq!(service.add_item(Tree::Expenses, 1).unwrap(), 2);

        assert_eq!(
            item_names(&session, Tree::Income, 0),
            vec!["Sales", "Commissions", "New Item"]
        );
        assert_eq!(
            item_names(&session, Tree::Expenses, 1),
            vec!["Marketing", "Office Supplies", "New Expense"]
        );
    }

    #[test]
    fn test_add_item_out_of_range() {
        let mut session = create_test_session();
        let err = CategoryService::new(&mut session)
            .add_item(Tree::Income, 7)
            .unwrap_err();

        assert!(err.is_index_out_of_range());
        assert_eq!(err.to_string(), "Category index 7 out of range (len 2)");
        assert_eq!(session.budget().item_count(), 8);
    }

    #[test]
    fn test_delete_item_shifts_positions() {
        let mut session = create_test_session();
        let mut service = CategoryService::new(&mut session);
        service
            .set_cell_value(Tree::Expenses, 0, jan(), Money::from_cents(45_000), Some(1))
            .unwrap();

        let removed = service.delete_item(Tree::Expenses, 0, 0).unwrap();
        assert_eq!(removed.name, "Rent");

        let budget = session.budget();
        let remaining = budget.item_at(Tree::Expenses, 0, 0).unwrap();
        assert_eq!(remaining.name, "Utilities");
        assert_eq!(remaining.values.get(jan()), Money::from_cents(45_000));
        assert!(budget.item_at(Tree::Expenses, 0, 1).is_none());
        assert!(budget.item(removed.id).is_none());
    }

    #[test]
    fn test_delete_item_out_of_range_leaves_budget() {
        let mut session = create_test_session();
        let err = CategoryService::new(&mut session)
            .delete_item(Tree::Income, 0, 2)
            .unwrap_err();

        assert!(matches!(
            err,
            BudgetError::IndexOutOfRange {
                entity_type: "Item",
                index: 2,
                len: 2
            }
        ));
        assert_eq!(session.budget().item_count(), 8);
        assert_eq!(session.audit().entry_count(), 0);
    }

    #[test]
    fn test_set_cell_value_on_category_and_item() {
        let mut session = create_test_session();
        let mut service = CategoryService::new(&mut session);

        let previous = service
            .set_cell_value(Tree::Income, 1, jan(), Money::from_cents(2_500), None)
            .unwrap();
        assert_eq!(previous, Money::zero());
        service
            .set_cell_value(Tree::Income, 1, jan(), Money::from_cents(1_000), Some(0))
            .unwrap();

        let budget = session.budget();
        let category = budget.category_at(Tree::Income, 1).unwrap();
        assert_eq!(category.values.get(jan()), Money::from_cents(2_500));
        assert_eq!(
            budget.item_at(Tree::Income, 1, 0).unwrap().values.get(jan()),
            Money::from_cents(1_000)
        );
    }

    #[test]
    fn test_set_cell_value_unknown_month_extends_one_row() {
        let mut session = create_test_session();
        let outside = MonthKey::new(2030, 6).unwrap();
        CategoryService::new(&mut session)
            .set_cell_value(Tree::Income, 0, outside, Money::from_cents(100), Some(0))
            .unwrap();

        let budget = session.budget();
        assert_eq!(budget.months().len(), 12);
        let item = budget.item_at(Tree::Income, 0, 0).unwrap();
        assert_eq!(item.values.len(), 13);
        assert_eq!(item.values.get(outside), Money::from_cents(100));
        assert!(budget.item_at(Tree::Income, 0, 1).unwrap().values.matches_schema(budget.months()));
    }

    #[test]
    fn test_set_cell_value_audits_changes_only() {
        let mut session = create_test_session();
        let mut service = CategoryService::new(&mut session);
        service
            .set_cell_value(Tree::Income, 0, jan(), Money::zero(), None)
            .unwrap();
        service
            .set_cell_value(Tree::Income, 0, jan(), Money::from_cents(10_000), None)
            .unwrap();

        let entries = session.audit().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].row, Some(RowRef::category(Tree::Income, "General Income")));
        assert_eq!(
            entries[0].change,
            Change::Cell {
                month: jan(),
                from: Money::zero(),
                to: Money::from_cents(10_000),
            }
        );
    }

    #[test]
    fn test_audit_write_failure_does_not_fail_edits() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let budget = create_test_session().budget().clone();
        let audit = AuditLogger::with_file(temp_dir.path().join("missing").join("audit.log"));
        let mut session = Session::new(budget, audit);

        let mut service = CategoryService::new(&mut session);
        service
            .set_cell_value(Tree::Income, 0, jan(), Money::from_cents(500), Some(0))
            .unwrap();
        service.add_item(Tree::Expenses, 0).unwrap();
        service.delete_item(Tree::Expenses, 0, 0).unwrap();

        assert_eq!(
            session.budget().item_at(Tree::Income, 0, 0).unwrap().values.get(jan()),
            Money::from_cents(500)
        );
        assert_eq!(session.audit().entry_count(), 3);
        assert_eq!(session.audit().write_failures().len(), 3);
    }

    #[test]
    fn test_bonus_scenario() {
        let mut session = create_test_session();
        let profit_before = TotalsService::new(session.budget()).profit_loss(jan());

        let mut service = CategoryService::new(&mut session);
        let bonus = service.add_category(Tree::Income).unwrap();
        service.rename_category(Tree::Income, bonus, "Bonus").unwrap();
        let q1 = service.add_item(Tree::Income, bonus).unwrap();
        service.rename_item(Tree::Income, bonus, q1, "Q1").unwrap();
        service
            .set_cell_value(Tree::Income, bonus, jan(), Money::from_cents(10_000), Some(q1))
            .unwrap();

        let totals = TotalsService::new(session.budget());
        assert_eq!(
            totals.category_month_total(Tree::Income, bonus, jan()).unwrap(),
            Money::from_cents(10_000)
        );
        assert_eq!(
            totals.profit_loss(jan()) - profit_before,
            Money::from_cents(10_000)
        );
    }

    #[test]
    fn test_rename_validation() {
        let mut session = create_test_session();
        let mut service = CategoryService::new(&mut session);

        assert!(service.rename_category(Tree::Income, 0, "   ").unwrap_err().is_validation());
        assert!(service
            .rename_item(Tree::Income, 0, 0, &"x".repeat(51))
            .unwrap_err()
            .is_validation());

        let renamed = service.rename_category(Tree::Income, 0, "  Salary ").unwrap();
        assert_eq!(renamed.name, "Salary");
        assert_eq!(session.budget().category_at(Tree::Income, 0).unwrap().name, "Salary");
    }

    #[test]
    fn test_rename_is_audited_with_diff() {
        let mut session = create_test_session();
        CategoryService::new(&mut session)
            .rename_item(Tree::Expenses, 0, 0, "Lease")
            .unwrap();

        let entry = &session.audit().entries()[0];
        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.row, Some(RowRef::item(Tree::Expenses, "Fixed Expenses", "Lease")));
        assert_eq!(
            entry.change,
            Change::Renamed {
                from: "Rent".into(),
                to: "Lease".into(),
            }
        );
    }

    #[test]
    fn test_find_category() {
        let mut session = create_test_session();
        let service = CategoryService::new(&mut session);

        assert_eq!(service.find_category(Tree::Income, "other income"), Some(1));
        assert_eq!(service.find_category(Tree::Expenses, "FIXED EXPENSES"), Some(0));
        assert_eq!(service.find_category(Tree::Income, "Fixed Expenses"), None);
    }

    #[test]
    fn test_ids_are_stable_across_deletes() {
        let mut session = create_test_session();
        let mut service = CategoryService::new(&mut session);

        let commissions = service.item_id(Tree::Income, 0, 1).unwrap();
        service.delete_item(Tree::Income, 0, 0).unwrap();
        assert_eq!(service.item_id(Tree::Income, 0, 0).unwrap(), commissions);
        assert!(service.item_id(Tree::Income, 0, 1).unwrap_err().is_index_out_of_range());
    }
}
