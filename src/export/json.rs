//! JSON Export functionality
//!
//! Exports the budget grid as a single JSON document with export metadata.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::BudgetResult;
use crate::reports::GridReport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: u32 = 1;

/// Grid report wrapped with export metadata
#[derive(Debug, Clone, Serialize)]
pub struct GridExport<'a> {
    pub schema_version: u32,
    pub exported_at: DateTime<Utc>,
    pub app_version: &'static str,
    pub report: &'a GridReport,
}

impl<'a> GridExport<'a> {
    pub fn new(report: &'a GridReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            report,
        }
    }
}

/// Export the grid to pretty-printed JSON
pub fn export_grid_json<W: Write>(report: &GridReport, writer: &mut W) -> BudgetResult<()> {
    let export = GridExport::new(report);
    serde_json::to_writer_pretty(&mut *writer, &export)?;
    writeln!(writer)?;
    Ok(())
}
