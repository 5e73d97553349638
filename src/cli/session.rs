//! Session script commands
//!
//! A session script is a list of editing commands applied, in order, to one
//! in-memory budget. Each line is parsed with clap just like a command line,
//! so `help` and `<command> --help` work inside scripts too.

use std::io::{BufRead, Write};

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use crate::display::format_month_list;
use crate::error::{BudgetError, BudgetResult};
use crate::export::{export_grid, ExportFormat};
use crate::models::{Endpoint, Money, Tree};
use crate::reports::GridReport;
use crate::services::{parse_date_input, parse_month_input, CategoryService, RangeService, TotalsService};
use crate::session::Session;

/// A single parsed script line
#[derive(Parser, Debug)]
#[command(name = "session", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

/// Session subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Move the start or end of the month range (resets all amounts)
    Range {
        /// "start" or "end"
        endpoint: Endpoint,
        /// Date (YYYY-MM-DD), or month (YYYY-MM or "Jan 2024")
        date: String,
    },

    /// Append a new category to a tree
    #[command(name = "add-category")]
    AddCategory {
        /// "income" or "expenses"
        tree: Tree,
    },

    /// Append a new item to a category
    #[command(name = "add-item")]
    AddItem {
        tree: Tree,
        /// Category position or name
        category: String,
    },

    /// Delete an item from a category
    #[command(name = "delete-item")]
    DeleteItem {
        tree: Tree,
        /// Category position or name
        category: String,
        /// Item position within the category
        item: usize,
    },

    /// Set one month's amount on a category row or an item
    Set {
        tree: Tree,
        /// Category position or name
        category: String,
        /// Month (YYYY-MM or "Jan 2024")
        month: String,
        /// Amount (e.g. "1250", "-3.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Item position; omit to set the category's own row
        #[arg(short, long)]
        item: Option<usize>,
    },

    /// Rename a category, or one of its items
    Rename {
        tree: Tree,
        /// Category position or name
        category: String,
        /// New name
        name: String,
        /// Item position; omit to rename the category
        #[arg(short, long)]
        item: Option<usize>,
    },

    /// Show a category's total for one month
    Total {
        tree: Tree,
        /// Category position or name
        category: String,
        month: String,
    },

    /// Show a tree's total for one month
    #[command(name = "tree-total")]
    TreeTotal { tree: Tree, month: String },

    /// Show income minus expenses for one month
    #[command(name = "profit-loss", alias = "pl")]
    ProfitLoss { month: String },

    /// List the active months
    Months,

    /// Print the budget grid
    Show,

    /// Write the budget grid in the given format
    Export {
        #[arg(value_enum, default_value = "csv")]
        format: ExportFormat,
    },

    /// Show recent audit entries
    Log {
        /// Number of entries to show
        #[arg(short, long, default_value = "10")]
        count: usize,
    },
}

/// Outcome of parsing one script line
#[derive(Debug)]
pub enum ParsedLine {
    /// Blank line or comment
    Skip,
    Command(SessionCommand),
    /// Help or usage text requested with `help` or `--help`
    Help(String),
}

/// Parse one script line into a command
pub fn parse_line(line: &str) -> BudgetResult<ParsedLine> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(ParsedLine::Skip);
    }

    let args = split_args(line)?;
    match SessionLine::try_parse_from(args) {
        Ok(parsed) => Ok(ParsedLine::Command(parsed.command)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand) => {
            Ok(ParsedLine::Help(e.render().to_string()))
        }
        Err(e) => {
            let rendered = e.render().to_string();
            let message = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_string();
            Err(BudgetError::Validation(message))
        }
    }
}

/// Split a line into arguments, honouring double quotes
fn split_args(line: &str) -> BudgetResult<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(BudgetError::Validation("unterminated quote".into()));
    }
    if has_token {
        args.push(current);
    }

    Ok(args)
}

/// Resolve a category argument given as a position or a name
/// Resolve a category argument: a name match wins, otherwise digits are a position
fn resolve_category(session: &mut Session, tree: Tree, category: &str) -> BudgetResult<usize> {
    if let Some(index) = CategoryService::new(session).find_category(tree, category) {
        return Ok(index);
    }

    category
        .parse::<usize>()
        .map_err(|_| BudgetError::category_not_found(category))
}

fn parse_amount(amount: &str) -> BudgetResult<Money> {
    Money::parse(amount).map_err(|e| BudgetError::Validation(e.to_string()))
}

/// Apply one command to the session, writing any output to `out`
pub fn handle_session_command<W: Write>(
    session: &mut Session,
    cmd: SessionCommand,
    out: &mut W,
) -> BudgetResult<()> {
    match cmd {
        SessionCommand::Range { endpoint, date } => {
            let date = parse_date_input(&date)?;
            let range = RangeService::new(session).set_range_endpoint(date, endpoint)?;
            writeln!(
                out,
                "Range: {} to {} ({} months, amounts reset)",
                range.start(),
                range.end(),
                range.len()
            )?;
        }

        SessionCommand::AddCategory { tree } => {
            let index = CategoryService::new(session).add_category(tree)?;
            writeln!(out, "Added {} category [{}]", tree, index)?;
        }

        SessionCommand::AddItem { tree, category } => {
            let ci = resolve_category(session, tree, &category)?;
            let index = CategoryService::new(session).add_item(tree, ci)?;
            writeln!(out, "Added item [{}.{}]", ci, index)?;
        }

        SessionCommand::DeleteItem { tree, category, item } => {
            let ci = resolve_category(session, tree, &category)?;
            let removed = CategoryService::new(session).delete_item(tree, ci, item)?;
            writeln!(out, "Deleted item '{}'", removed.name)?;
        }

        SessionCommand::Set {
            tree,
            category,
            month,
            amount,
            item,
        } => {
            let ci = resolve_category(session, tree, &category)?;
            let month = parse_month_input(&month)?;
            let value = parse_amount(&amount)?;
            let previous = CategoryService::new(session).set_cell_value(tree, ci, month, value, item)?;
            writeln!(out, "{}: {} (was {})", month, value, previous)?;
        }

        SessionCommand::Rename {
            tree,
            category,
            name,
            item,
        } => {
            let ci = resolve_category(session, tree, &category)?;
            let mut service = CategoryService::new(session);
            let new_name = match item {
                Some(ii) => service.rename_item(tree, ci, ii, &name)?.name,
                None => service.rename_category(tree, ci, &name)?.name,
            };
            writeln!(out, "Renamed to '{}'", new_name)?;
        }

        SessionCommand::Total { tree, category, month } => {
            let ci = resolve_category(session, tree, &category)?;
            let month = parse_month_input(&month)?;
            let total = TotalsService::new(session.budget()).category_month_total(tree, ci, month)?;
            writeln!(out, "{}", total)?;
        }

        SessionCommand::TreeTotal { tree, month } => {
            let month = parse_month_input(&month)?;
            writeln!(out, "{}", TotalsService::new(session.budget()).tree_month_total(tree, month))?;
        }

        SessionCommand::ProfitLoss { month } => {
            let month = parse_month_input(&month)?;
            writeln!(out, "{}", TotalsService::new(session.budget()).profit_loss(month))?;
        }

        SessionCommand::Months => {
            write!(out, "{}", format_month_list(session.budget().months()))?;
        }

        SessionCommand::Show => {
            write!(out, "{}", GridReport::generate(session.budget())?.format_terminal())?;
        }

        SessionCommand::Export { format } => {
            let report = GridReport::generate(session.budget())?;
            export_grid(&report, format, out)?;
        }

        SessionCommand::Log { count } => {
            let entries = session.audit().read_recent(count);
            if entries.is_empty() {
                writeln!(out, "No changes recorded.")?;
            }
            for entry in entries {
                writeln!(out, "{}", entry)?;
            }
        }
    }

    Ok(())
}

/// Run a session script against one session
///
/// Failing lines are reported to `err` as `line N: <error>` and do not stop
/// the script. An edit whose audit entry could not be written to the log
/// file still counts as applied; it is reported as a warning for that line.
/// Returns the number of failed lines.
pub fn run_script<R: BufRead, W: Write, E: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    err: &mut E,
) -> BudgetResult<usize> {
    let mut failures = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let seen_failures = session.audit().write_failures().len();
        let result = parse_line(&line).and_then(|parsed| match parsed {
            ParsedLine::Skip => Ok(()),
            ParsedLine::Help(text) => write!(out, "{}", text).map_err(BudgetError::from),
            ParsedLine::Command(cmd) => handle_session_command(session, cmd, out),
        });

        if let Err(e) = result {
            failures += 1;
            writeln!(err, "line {}: {}", index + 1, e)?;
        }
        for failure in &session.audit().write_failures()[seen_failures..] {
            writeln!(err, "line {}: warning: {}", index + 1, failure)?;
        }
    }

    out.flush()?;
    Ok(failures)
}
