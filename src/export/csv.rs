//! CSV Export functionality
//!
//! Exports the budget grid as a spreadsheet-compatible table: one line per
//! category row, item row and subtotal, then the tree totals and the
//! profit/loss line.

use std::io::Write;

use crate::error::BudgetResult;
use crate::models::Money;
use crate::reports::GridReport;

/// Export the grid to CSV
///
/// Columns are `Tree,Category,Item`, one column per month label, then
/// `Total`. Amounts are written as plain decimals ("1234.50").
pub fn export_grid_csv<W: Write>(report: &GridReport, writer: &mut W) -> BudgetResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Tree".to_string(), "Category".to_string(), "Item".to_string()];
    header.extend(report.month_labels());
    header.push("Total".to_string());
    wtr.write_record(&header)?;

    for section in report.sections() {
        let tree = section.tree.to_string();

        for category in &section.categories {
            wtr.write_record(record(&tree, &category.name, "", &category.values, category.total_own()))?;
            for item in &category.items {
                wtr.write_record(record(&tree, &category.name, &item.name, &item.values, item.total))?;
            }
            wtr.write_record(record(
                &tree,
                &category.name,
                "Subtotal",
                &category.month_totals,
                category.total,
            ))?;
        }

        wtr.write_record(record(&tree, "Total", "", &section.month_totals, section.grand_total))?;
    }

    wtr.write_record(record("", "Profit/Loss", "", &report.profit_loss, report.profit_loss_total))?;
    wtr.flush()?;

    Ok(())
}

fn record(tree: &str, category: &str, item: &str, values: &[Money], total: Money) -> Vec<String> {
    let mut fields = vec![tree.to_string(), category.to_string(), item.to_string()];
    fields.extend(values.iter().map(|v| v.to_string()));
    fields.push(total.to_string());
    fields
}
