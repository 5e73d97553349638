//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod session;

pub use export::handle_export_command;
pub use session::{handle_session_command, parse_line, run_script, ParsedLine, SessionCommand};
