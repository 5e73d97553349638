//! Export module for budget-builder
//!
//! Writes the budget grid in multiple formats:
//! - CSV: spreadsheet-compatible grid
//! - JSON: machine-readable grid with export metadata
//! - YAML: human-readable grid with export metadata
//!
//! Exports are write-only. A budget is never reloaded from them.

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::BudgetResult;
use crate::reports::GridReport;

pub use self::csv::export_grid_csv;
pub use json::{export_grid_json, GridExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_grid_yaml;

/// Output format for grid exports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Spreadsheet-compatible grid
    #[default]
    Csv,
    /// Grid with export metadata
    Json,
    /// Grid with export metadata, human-readable
    #[value(alias = "yml")]
    Yaml,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("unknown export format '{}' (expected csv, json or yaml)", other)),
        }
    }
}

/// Write a grid report in the given format
pub fn export_grid<W: Write>(report: &GridReport, format: ExportFormat, writer: &mut W) -> BudgetResult<()> {
    match format {
        ExportFormat::Csv => export_grid_csv(report, writer),
        ExportFormat::Json => export_grid_json(report, writer),
        ExportFormat::Yaml => export_grid_yaml(report, writer),
    }
}
