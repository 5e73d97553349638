//! Path management for budget-builder
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGET_BUILDER_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/budget-builder` on Linux, `%APPDATA%\budget-builder\config`
//!    on Windows, `~/Library/Application Support/budget-builder` on macOS)
//!
//! Only settings and the optional audit log live here. Budget data is never
//! written to disk.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::BudgetError;

/// Environment variable that overrides the config directory
pub const CONFIG_DIR_ENV: &str = "BUDGET_BUILDER_CONFIG_DIR";

/// Manages all paths used by budget-builder
#[derive(Debug, Clone)]
pub struct BudgetPaths {
    base_dir: PathBuf,
}

impl BudgetPaths {
    /// Resolve the config directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// override variable is not set.
    pub fn new() -> Result<Self, BudgetError> {
        if let Some(custom) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(Self {
                base_dir: PathBuf::from(custom),
            });
        }

        let dirs = ProjectDirs::from("", "", "budget-builder").ok_or_else(|| {
            BudgetError::Config("Could not determine a config directory".into())
        })?;

        Ok(Self {
            base_dir: dirs.config_dir().to_path_buf(),
        })
    }

    /// Create BudgetPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Default location for the audit log when one is enabled
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Create the config directory if it is missing
    pub fn ensure_directories(&self) -> Result<(), BudgetError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BudgetError::Io(format!("Failed to create config directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().join("nested").join("config"));

        paths.ensure_directories().unwrap();
        assert!(paths.base_dir().exists());
    }
}
