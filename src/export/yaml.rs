//! YAML Export functionality
//!
//! Exports the budget grid to YAML for human-readable output.

use std::io::Write;

use crate::error::BudgetResult;
use crate::export::json::GridExport;
use crate::reports::GridReport;

/// Export the grid to YAML with a short header comment
pub fn export_grid_yaml<W: Write>(report: &GridReport, writer: &mut W) -> BudgetResult<()> {
    let export = GridExport::new(report);

    writeln!(writer, "# budget-builder grid export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# Range: {} to {}", report.start, report.end)?;
    writeln!(writer, "# Amounts are in cents.")?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export)?;

    Ok(())
}
