//! The budget aggregate
//!
//! Owns the active date range, the derived month list, and both category
//! trees. Categories and items are stored in flat id-keyed tables; the trees
//! and each category hold ordered id lists into those tables.

use std::collections::HashMap;

use super::category::{Category, DefaultCategory, Item, Tree};
use super::ids::{CategoryId, ItemId};
use super::month::MonthKey;
use super::range::DateRange;
use super::values::ValueRow;

#[derive(Debug, Clone)]
pub struct Budget {
    range: DateRange,
    months: Vec<MonthKey>,
    income: Vec<CategoryId>,
    expenses: Vec<CategoryId>,
    categories: HashMap<CategoryId, Category>,
    items: HashMap<ItemId, Item>,
}

impl Budget {
    /// Create a budget with no categories
    pub fn new(range: DateRange) -> Self {
        Self {
            months: range.month_keys(),
            range,
            income: Vec::new(),
            expenses: Vec::new(),
            categories: HashMap::new(),
            items: HashMap::new(),
        }
    }

    /// Create a budget seeded with the default income and expense categories
    pub fn with_defaults(range: DateRange) -> Self {
        let mut budget = Self::new(range);
        for default in DefaultCategory::all() {
            let category_id = budget.push_category(default.tree(), default.name(), true);
            for item_name in default.item_names() {
                budget.push_item(category_id, *item_name);
            }
        }
        budget
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    /// The active months, in chronological order
    pub fn months(&self) -> &[MonthKey] {
        &self.months
    }

    /// Category ids of a tree, in display order
    pub fn tree(&self, tree: Tree) -> &[CategoryId] {
        match tree {
            Tree::Income => &self.income,
            Tree::Expenses => &self.expenses,
        }
    }

    fn tree_mut(&mut self, tree: Tree) -> &mut Vec<CategoryId> {
        match tree {
            Tree::Income => &mut self.income,
            Tree::Expenses => &mut self.expenses,
        }
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn category_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.categories.get_mut(&id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    /// Categories of a tree, in display order
    pub fn categories(&self, tree: Tree) -> impl Iterator<Item = &Category> + '_ {
        self.tree(tree)
            .iter()
            .filter_map(move |id| self.categories.get(id))
    }

    /// Items of a category, in display order
    pub fn items_of<'a>(&'a self, category: &'a Category) -> impl Iterator<Item = &'a Item> + 'a {
        category
            .items
            .iter()
            .filter_map(move |id| self.items.get(id))
    }

    /// Category at `index` within `tree`
    pub fn category_at(&self, tree: Tree, index: usize) -> Option<&Category> {
        self.tree(tree).get(index).and_then(|id| self.category(*id))
    }

    /// Item at `item_index` within the category at `category_index`
    pub fn item_at(&self, tree: Tree, category_index: usize, item_index: usize) -> Option<&Item> {
        self.category_at(tree, category_index)
            .and_then(|c| c.items.get(item_index))
            .and_then(|id| self.item(*id))
    }

    /// Append a category with a zeroed row to the end of `tree`
    pub fn push_category(&mut self, tree: Tree, name: impl Into<String>, is_default: bool) -> CategoryId {
        let mut category = Category::new(name, &self.months);
        category.is_default = is_default;
        let id = category.id;
        self.categories.insert(id, category);
        self.tree_mut(tree).push(id);
        id
    }

    /// Append an item with a zeroed row to a category
    ///
    /// Returns `None` if the category does not exist.
    pub fn push_item(&mut self, category_id: CategoryId, name: impl Into<String>) -> Option<ItemId> {
        let item = Item::new(name, &self.months);
        let id = item.id;
        let category = self.categories.get_mut(&category_id)?;
        category.items.push(id);
        self.items.insert(id, item);
        Some(id)
    }

    /// Remove the item at `position` in a category
    ///
    /// Later items move up by one. The removed item is dropped from the
    /// item table and handed back to the caller.
    pub fn remove_item(&mut self, category_id: CategoryId, position: usize) -> Option<Item> {
        let category = self.categories.get_mut(&category_id)?;
        if position >= category.items.len() {
            return None;
        }
        let id = category.items.remove(position);
        self.items.remove(&id)
    }

    /// Replace the range and rebuild everything derived from it
    ///
    /// The month list and every value row are rebuilt in one pass, so the
    /// two can never disagree once this returns.
    pub fn set_range(&mut self, range: DateRange) {
        self.range = range;
        self.regenerate_months();
        self.reconcile_value_rows();
    }

    /// Rebuild `months` from the current range
    pub fn regenerate_months(&mut self) {
        self.months = self.range.month_keys();
    }

    /// Reset every value row in both trees to zero over the current months
    ///
    /// Amounts are not carried over, even for months present in both the old
    /// and new ranges.
    pub fn reconcile_value_rows(&mut self) {
        for category in self.categories.values_mut() {
            category.values = ValueRow::zeroed(&self.months);
        }
        for item in self.items.values_mut() {
            item.values = ValueRow::zeroed(&self.months);
        }
    }

    /// Number of stored categories across both trees
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Number of stored items across both trees
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
