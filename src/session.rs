//! Editing session
//!
//! A `Session` owns the single in-memory budget and the audit trail that
//! records changes to it. Services borrow the session to read or edit the
//! budget; nothing outlives the session.

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::Settings;
use crate::error::BudgetResult;
use crate::models::Budget;

#[derive(Debug)]
pub struct Session {
    budget: Budget,
    audit: AuditLogger,
}

impl Session {
    pub fn new(budget: Budget, audit: AuditLogger) -> Self {
        Self { budget, audit }
    }

    /// Start a session from user settings
    ///
    /// Uses the configured initial range, seeds the default categories unless
    /// disabled, and attaches the audit log file if one is configured. An
    /// audit file that cannot be opened fails here, before any edit.
    pub fn from_settings(settings: &Settings) -> BudgetResult<Self> {
        let range = settings.initial_range()?;
        let budget = if settings.seed_defaults {
            Budget::with_defaults(range)
        } else {
            Budget::new(range)
        };

        let audit = match &settings.audit_log_path {
            Some(path) => AuditLogger::open_file(path.clone())?,
            None => AuditLogger::in_memory(),
        };

        Ok(Self::new(budget, audit))
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub(crate) fn budget_mut(&mut self) -> &mut Budget {
        &mut self.budget
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record an edit that has already been applied to the budget
    pub(crate) fn record(&mut self, entry: AuditEntry) {
        self.audit.log(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BudgetError;
    use crate::models::Tree;
    use tempfile::TempDir;

    #[test]
    fn test_from_default_settings() {
        let session = Session::from_settings(&Settings::default()).unwrap();
        assert_eq!(session.budget().months().len(), 12);
        assert_eq!(session.budget().tree(Tree::Income).len(), 2);
        assert!(session.audit().path().is_none());
        assert_eq!(session.audit().entry_count(), 0);
    }

    #[test]
    fn test_unseeded_session() {
        let settings = Settings {
            seed_defaults: false,
            ..Settings::default()
        };
        let session = Session::from_settings(&settings).unwrap();
        assert!(session.budget().tree(Tree::Expenses).is_empty());
    }

    #[test]
    fn test_audit_file_from_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("audit.log");
        let settings = Settings {
            audit_log_path: Some(path.clone()),
            ..Settings::default()
        };

        let session = Session::from_settings(&settings).unwrap();
        assert_eq!(session.audit().path(), Some(path.as_path()));
    }

    #[test]
    fn test_unopenable_audit_file_fails_before_any_edit() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings {
            audit_log_path: Some(temp_dir.path().join("missing").join("audit.log")),
            ..Settings::default()
        };

        let err = Session::from_settings(&settings).unwrap_err();
        assert!(matches!(err, BudgetError::Io(_)));
    }

    #[test]
    fn test_bad_range_in_settings() {
        let settings = Settings {
            default_start: "nonsense".into(),
            ..Settings::default()
        };
        assert!(Session::from_settings(&settings).is_err());
    }
}
