//! Configuration module for budget-builder
//!
//! - Platform-aware path resolution
//! - Session settings (initial range, default seeding, audit log, export format)

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
