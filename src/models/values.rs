//! Per-month amount rows
//!
//! A `ValueRow` is an ordered month → amount table. Months that have no
//! entry read as zero.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::money::Money;
use super::month::MonthKey;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueRow(BTreeMap<MonthKey, Money>);

impl ValueRow {
    /// A row with every month in `months` set to zero
    pub fn zeroed(months: &[MonthKey]) -> Self {
        Self(months.iter().map(|&m| (m, Money::zero())).collect())
    }

    /// Amount for `month`, zero when unset
    pub fn get(&self, month: MonthKey) -> Money {
        self.0.get(&month).copied().unwrap_or_default()
    }

    /// Set the amount for `month`, returning the previous value
    pub fn set(&mut self, month: MonthKey, amount: Money) -> Money {
        self.0.insert(month, amount).unwrap_or_default()
    }

    pub fn contains(&self, month: MonthKey) -> bool {
        self.0.contains_key(&month)
    }

    /// Months present in this row, in chronological order
    pub fn months(&self) -> impl Iterator<Item = MonthKey> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthKey, Money)> + '_ {
        self.0.iter().map(|(&m, &v)| (m, v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if the row is keyed by exactly `months`
    pub fn matches_schema(&self, months: &[MonthKey]) -> bool {
        self.0.len() == months.len() && months.iter().all(|m| self.0.contains_key(m))
    }

    /// Sum of the amounts for `months`
    pub fn total_over(&self, months: &[MonthKey]) -> Money {
        months.iter().map(|&m| self.get(m)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months() -> Vec<MonthKey> {
        let jan = MonthKey::new(2024, 1).unwrap();
        vec![jan, jan.next(), jan.next().next()]
    }

    #[test]
    fn test_zeroed_row() {
        let months = months();
        let row = ValueRow::zeroed(&months);
        assert_eq!(row.len(), 3);
        assert!(row.matches_schema(&months));
        assert!(row.iter().all(|(_, v)| v.is_zero()));
    }

    #[test]
    fn test_missing_month_reads_zero() {
        let row = ValueRow::zeroed(&months());
        let june = MonthKey::new(2024, 6).unwrap();
        assert_eq!(row.get(june), Money::zero());
        assert!(!row.contains(june));
    }

    #[test]
    fn test_set_unknown_month_extends_row_only() {
        let months = months();
        let mut row = ValueRow::zeroed(&months);
        let june = MonthKey::new(2024, 6).unwrap();

        let previous = row.set(june, Money::from_cents(500));
        assert_eq!(previous, Money::zero());
        assert_eq!(row.len(), 4);
        assert!(!row.matches_schema(&months));
    }

    #[test]
    fn test_total_over() {
        let months = months();
        let mut row = ValueRow::zeroed(&months);
        row.set(months[0], Money::from_cents(150));
        row.set(months[2], Money::from_cents(-50));
        assert_eq!(row.total_over(&months), Money::from_cents(100));
        assert_eq!(row.total_over(&months[1..]), Money::from_cents(-50));
    }

    #[test]
    fn test_months_are_ordered() {
        let months = months();
        let mut reversed = months.clone();
        reversed.reverse();
        let row = ValueRow::zeroed(&reversed);
        assert_eq!(row.months().collect::<Vec<_>>(), months);
    }
}
