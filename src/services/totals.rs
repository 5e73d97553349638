//! Totals service
//!
//! Read-only aggregation over the budget. Nothing is cached; every total is
//! recomputed from the value rows when asked for. Sums saturate at the
//! `Money` bounds rather than overflowing.

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Budget, Category, Money, MonthKey, Tree};

/// Service for month, row and grand totals
pub struct TotalsService<'a> {
    budget: &'a Budget,
}

impl<'a> TotalsService<'a> {
    pub fn new(budget: &'a Budget) -> Self {
        Self { budget }
    }

    fn category(&self, tree: Tree, category_index: usize) -> BudgetResult<&'a Category> {
        let len = self.budget.tree(tree).len();
        self.budget
            .category_at(tree, category_index)
            .ok_or_else(|| BudgetError::category_index(category_index, len))
    }

    fn month_total_of(&self, category: &Category, month: MonthKey) -> Money {
        let items: Money = self
            .budget
            .items_of(category)
            .map(|i| i.values.get(month))
            .sum();
        category.values.get(month) + items
    }

    /// Category row plus all of its items for one month
    pub fn category_month_total(&self, tree: Tree, category_index: usize, month: MonthKey) -> BudgetResult<Money> {
        let category = self.category(tree, category_index)?;
        Ok(self.month_total_of(category, month))
    }

    /// Sum of every category total in a tree for one month
    pub fn tree_month_total(&self, tree: Tree, month: MonthKey) -> Money {
        self.budget
            .categories(tree)
            .map(|c| self.month_total_of(c, month))
            .sum()
    }

    /// Income minus expenses for one month; may be negative
    pub fn profit_loss(&self, month: MonthKey) -> Money {
        self.tree_month_total(Tree::Income, month) - self.tree_month_total(Tree::Expenses, month)
    }

    /// A category's total (own row plus items) across all active months
    pub fn category_range_total(&self, tree: Tree, category_index: usize) -> BudgetResult<Money> {
        let category = self.category(tree, category_index)?;
        Ok(self
            .budget
            .months()
            .iter()
            .map(|&m| self.month_total_of(category, m))
            .sum())
    }

    /// One item's row summed across all active months
    pub fn item_range_total(&self, tree: Tree, category_index: usize, item_index: usize) -> BudgetResult<Money> {
        let category = self.category(tree, category_index)?;
        let item = self
            .budget
            .item_at(tree, category_index, item_index)
            .ok_or_else(|| BudgetError::item_index(item_index, category.items.len()))?;
        Ok(item.values.total_over(self.budget.months()))
    }

    /// Grand total of a tree across all active months
    pub fn tree_range_total(&self, tree: Tree) -> Money {
        self.budget
            .months()
            .iter()
            .map(|&m| self.tree_month_total(tree, m))
            .sum()
    }

    /// Profit/loss across all active months
    pub fn profit_loss_range_total(&self) -> Money {
        self.tree_range_total(Tree::Income) - self.tree_range_total(Tree::Expenses)
    }
}
