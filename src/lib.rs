//! budget-builder - Monthly budget grid editor
//!
//! This library keeps an in-memory budget: two trees of categories (income
//! and expenses), each category with its own line items, laid out across a
//! configurable range of months. It derives row, column and grand totals and
//! the monthly profit/loss.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (months, ranges, money, categories, budget)
//! - `session`: The in-memory budget plus its audit trail
//! - `services`: Editing and aggregation operations
//! - `audit`: Audit logging system
//! - `reports`: The full budget grid
//! - `export`: CSV, JSON and YAML output of the grid
//! - `display`: Terminal formatting helpers
//! - `cli`: Command handlers for the `budget` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_builder::config::Settings;
//! use budget_builder::models::{Money, MonthKey, Tree};
//! use budget_builder::services::{CategoryService, TotalsService};
//! use budget_builder::session::Session;
//!
//! let mut session = Session::from_settings(&Settings::default())?;
//! let jan = MonthKey::new(2024, 1)?;
//! CategoryService::new(&mut session).set_cell_value(Tree::Income, 0, jan, Money::from_cents(10_000), Some(0))?;
//! let profit = TotalsService::new(session.budget()).profit_loss(jan);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;

pub use error::{BudgetError, BudgetResult};
