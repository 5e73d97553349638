//! Budget grid report
//!
//! The full cross product of rows and months: every category and item row,
//! per-row and per-month totals for both trees, and profit/loss per month.
//! Amounts in each row line up with `months` by position.

use chrono::NaiveDate;
use serde::Serialize;

use crate::display::{double_separator, format_amount_cell, separator, truncate};
use crate::error::BudgetResult;
use crate::models::{Budget, Money, MonthKey, Tree};
use crate::services::TotalsService;

const LABEL_WIDTH: usize = 26;
const CELL_WIDTH: usize = 11;

/// A single item row
#[derive(Debug, Clone, Serialize)]
pub struct ItemRow {
    pub name: String,
    /// Amount per month
    pub values: Vec<Money>,
    /// Sum across all months
    pub total: Money,
}

/// A category with its own row, its items, and its totals
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub name: String,
    pub is_default: bool,
    /// The category's own amounts per month, excluding items
    pub values: Vec<Money>,
    pub items: Vec<ItemRow>,
    /// Own row plus items, per month
    pub month_totals: Vec<Money>,
    /// Own row plus items, across all months
    pub total: Money,
}

/// One of the two trees with its totals
#[derive(Debug, Clone, Serialize)]
pub struct TreeSection {
    pub tree: Tree,
    pub categories: Vec<CategoryRow>,
    pub month_totals: Vec<Money>,
    pub grand_total: Money,
}

/// Budget grid report
#[derive(Debug, Clone, Serialize)]
pub struct GridReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub months: Vec<MonthKey>,
    pub income: TreeSection,
    pub expenses: TreeSection,
    /// Income minus expenses, per month
    pub profit_loss: Vec<Money>,
    pub profit_loss_total: Money,
}

impl GridReport {
    /// Build the report from the current state of a budget
    pub fn generate(budget: &Budget) -> BudgetResult<Self> {
        let totals = TotalsService::new(budget);
        let months = budget.months().to_vec();

        let income = Self::build_section(budget, &totals, Tree::Income)?;
        let expenses = Self::build_section(budget, &totals, Tree::Expenses)?;
        let profit_loss = months.iter().map(|&m| totals.profit_loss(m)).collect();

        Ok(Self {
            start: budget.range().start(),
            end: budget.range().end(),
            months,
            income,
            expenses,
            profit_loss,
            profit_loss_total: totals.profit_loss_range_total(),
        })
    }

    fn build_section(budget: &Budget, totals: &TotalsService<'_>, tree: Tree) -> BudgetResult<TreeSection> {
        let months = budget.months();
        let mut categories = Vec::with_capacity(budget.tree(tree).len());

        for (ci, category) in budget.categories(tree).enumerate() {
            let mut items = Vec::with_capacity(category.items.len());
            for (ii, item) in budget.items_of(category).enumerate() {
                items.push(ItemRow {
                    name: item.name.clone(),
                    values: months.iter().map(|&m| item.values.get(m)).collect(),
                    total: totals.item_range_total(tree, ci, ii)?,
                });
            }

            let month_totals = months
                .iter()
                .map(|&m| totals.category_month_total(tree, ci, m))
                .collect::<BudgetResult<Vec<_>>>()?;

            categories.push(CategoryRow {
                name: category.name.clone(),
                is_default: category.is_default,
                values: months.iter().map(|&m| category.values.get(m)).collect(),
                items,
                month_totals,
                total: totals.category_range_total(tree, ci)?,
            });
        }

        Ok(TreeSection {
            tree,
            categories,
            month_totals: months.iter().map(|&m| totals.tree_month_total(tree, m)).collect(),
            grand_total: totals.tree_range_total(tree),
        })
    }

    /// Month labels in column order ("Jan 2024", ...)
    pub fn month_labels(&self) -> Vec<String> {
        self.months.iter().map(|m| m.label()).collect()
    }

    pub fn sections(&self) -> [&TreeSection; 2] {
        [&self.income, &self.expenses]
    }

    fn width(&self) -> usize {
        LABEL_WIDTH + (self.months.len() + 1) * (CELL_WIDTH + 1)
    }

    fn format_row(&self, label: &str, values: &[Money], total: Money) -> String {
        let mut line = format!("{:<width$}", truncate(label, LABEL_WIDTH), width = LABEL_WIDTH);
        for value in values.iter().chain(std::iter::once(&total)) {
            line.push(' ');
            line.push_str(&format_amount_cell(*value, CELL_WIDTH));
        }
        line.push('\n');
        line
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        let width = self.width();

        output.push_str(&format!(
            "Budget {} to {} ({} months)\n",
            self.start,
            self.end,
            self.months.len()
        ));
        output.push_str(&double_separator(width));
        output.push('\n');

        // Column headers
        output.push_str(&format!("{:<width$}", "", width = LABEL_WIDTH));
        for label in self.month_labels() {
            output.push_str(&format!(" {:>width$}", label, width = CELL_WIDTH));
        }
        output.push_str(&format!(" {:>width$}\n", "Total", width = CELL_WIDTH));

        for section in self.sections() {
            output.push_str(&separator(width));
            output.push('\n');
            output.push_str(&format!("{}\n", section.tree.to_string().to_uppercase()));

            for category in &section.categories {
                output.push_str(&self.format_row(&category.name, &category.values, category.total_own()));
                for item in &category.items {
                    output.push_str(&self.format_row(&format!("  {}", item.name), &item.values, item.total));
                }
                output.push_str(&self.format_row("  Subtotal", &category.month_totals, category.total));
            }

            output.push_str(&self.format_row(
                &format!("Total {}", section.tree),
                &section.month_totals,
                section.grand_total,
            ));
        }

        output.push_str(&double_separator(width));
        output.push('\n');
        output.push_str(&self.format_row("Profit/Loss", &self.profit_loss, self.profit_loss_total));

        output
    }
}

impl CategoryRow {
    /// Sum of the category's own row, excluding items
    pub fn total_own(&self) -> Money {
        self.values.iter().sum()
    }
}
