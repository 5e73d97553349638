//! User settings for budget-builder
//!
//! Controls how a new session starts: the initial month range, whether the
//! default categories are seeded, where audit entries go, and the default
//! export format.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::export::ExportFormat;
use crate::models::{DateRange, MonthKey};

/// User settings for budget-builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// First month of a new budget ("YYYY-MM")
    #[serde(default = "default_start")]
    pub default_start: String,

    /// Last month of a new budget ("YYYY-MM")
    #[serde(default = "default_end")]
    pub default_end: String,

    /// Seed the default income and expense categories
    #[serde(default = "default_seed_defaults")]
    pub seed_defaults: bool,

    /// Append audit entries to this file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_log_path: Option<PathBuf>,

    #[serde(default)]
    pub export_format: ExportFormat,
}

fn default_schema_version() -> u32 {
    1
}

fn default_start() -> String {
    "2024-01".to_string()
}

fn default_end() -> String {
    "2024-12".to_string()
}

fn default_seed_defaults() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_start: default_start(),
            default_end: default_end(),
            seed_defaults: default_seed_defaults(),
            audit_log_path: None,
            export_format: ExportFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| BudgetError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))
    }

    /// The range a new budget starts with
    pub fn initial_range(&self) -> Result<DateRange, BudgetError> {
        let parse = |field: &str, value: &str| {
            MonthKey::parse(value)
                .map_err(|e| BudgetError::Config(format!("Invalid {}: {}", field, e)))
        };
        let first = parse("default_start", &self.default_start)?;
        let last = parse("default_end", &self.default_end)?;

        DateRange::from_months(first, last)
            .map_err(|e| BudgetError::Config(format!("Invalid default range: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_start, "2024-01");
        assert_eq!(settings.default_end, "2024-12");
        assert!(settings.seed_defaults);
        assert!(settings.audit_log_path.is_none());
        assert_eq!(settings.export_format, ExportFormat::Csv);
    }

    #[test]
    fn test_initial_range() {
        let range = Settings::default().initial_range().unwrap();
        assert_eq!(range.start(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(range.end(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_initial_range_rejects_bad_input() {
        let mut settings = Settings::default();
        settings.default_start = "2024-13".into();
        assert!(matches!(settings.initial_range(), Err(BudgetError::Config(_))));

        settings.default_start = "2025-01".into();
        assert!(matches!(settings.initial_range(), Err(BudgetError::Config(_))));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.default_start = "2025-04".into();
        settings.default_end = "2026-03".into();
        settings.export_format = ExportFormat::Json;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_start, "2025-04");
        assert_eq!(loaded.export_format, ExportFormat::Json);
        assert_eq!(loaded.initial_range().unwrap().len(), 12);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"seed_defaults": false}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(!loaded.seed_defaults);
        assert_eq!(loaded.default_end, "2024-12");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(BudgetError::Config(_))
        ));
    }
}
