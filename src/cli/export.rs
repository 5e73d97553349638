//! CLI command for grid export
//!
//! Writes the grid to stdout or to a file the user names.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{BudgetError, BudgetResult};
use crate::export::{export_grid, ExportFormat};
use crate::reports::GridReport;
use crate::session::Session;

/// Handle `budget export`
pub fn handle_export_command(session: &Session, format: ExportFormat, output: Option<&Path>) -> BudgetResult<()> {
    let report = GridReport::generate(session.budget())?;

    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                BudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            export_grid(&report, format, &mut writer)?;
            writer.flush()?;
            eprintln!("Grid exported to: {} ({})", path.display(), format);
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            export_grid(&report, format, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use tempfile::TempDir;

    #[test]
    fn test_export_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("grid.yaml");
        let session = Session::from_settings(&Settings::default()).unwrap();

        handle_export_command(&session, ExportFormat::Yaml, Some(&path)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Variable Expenses"));
    }

    #[test]
    fn test_export_to_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("grid.csv");
        let session = Session::from_settings(&Settings::default()).unwrap();

        let err = handle_export_command(&session, ExportFormat::Csv, Some(&path)).unwrap_err();
        assert!(matches!(err, BudgetError::Export(_)));
    }
}
