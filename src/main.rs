use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use budget_builder::cli::{handle_export_command, run_script};
use budget_builder::config::{BudgetPaths, Settings};
use budget_builder::export::ExportFormat;
use budget_builder::models::Endpoint;
use budget_builder::reports::GridReport;
use budget_builder::services::{parse_date_input, RangeService};
use budget_builder::session::Session;

#[derive(Parser)]
#[command(
    name = "budget",
    author = "Kaylee Beyene",
    version,
    about = "Monthly income/expense budget grid",
    long_about = "budget-builder keeps a grid of income and expense categories, \
                  each with line items, across a range of months. It totals every \
                  row and column and shows the monthly profit/loss. Budgets live \
                  in memory for one session and are never saved."
)]
struct Cli {
    /// First month of the budget (YYYY-MM)
    #[arg(long, global = true, value_name = "YYYY-MM")]
    start: Option<String>,

    /// Last month of the budget (YYYY-MM)
    #[arg(long, global = true, value_name = "YYYY-MM")]
    end: Option<String>,

    /// Append audit entries to this file
    #[arg(long, global = true, value_name = "FILE", env = "BUDGET_BUILDER_AUDIT_LOG")]
    audit_log: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the budget grid
    Show,

    /// Export the budget grid
    Export {
        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a session script (reads stdin when no file is given)
    Run {
        /// Script file
        file: Option<PathBuf>,
    },

    /// Show current configuration and paths
    Config {
        /// Write the default settings file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match &cli.command {
        Some(Commands::Show) => {
            let session = open_session(&cli, &settings)?;
            print!("{}", GridReport::generate(session.budget())?.format_terminal());
        }
        Some(Commands::Export { format, output }) => {
            let session = open_session(&cli, &settings)?;
            let format = format.unwrap_or(settings.export_format);
            handle_export_command(&session, format, output.as_deref())?;
        }
        Some(Commands::Run { file }) => {
            let mut session = open_session(&cli, &settings)?;
            let stdout = io::stdout();
            let stderr = io::stderr();
            let failures = match file {
                Some(path) => {
                    let file = File::open(path)
                        .with_context(|| format!("Failed to open script {}", path.display()))?;
                    run_script(&mut session, BufReader::new(file), &mut stdout.lock(), &mut stderr.lock())?
                }
                None => run_script(&mut session, io::stdin().lock(), &mut stdout.lock(), &mut stderr.lock())?,
            };
            if failures > 0 {
                bail!("{} script line(s) failed", failures);
            }
        }
        Some(Commands::Config { init }) => handle_config(&paths, &settings, *init)?,
        None => {
            println!("budget-builder - Monthly income/expense budget grid");
            println!();
            println!("Run 'budget --help' for usage information.");
            println!("Run 'budget show' to print the default budget.");
        }
    }

    Ok(())
}

/// Start a session from settings plus the global command-line overrides
fn open_session(cli: &Cli, settings: &Settings) -> Result<Session> {
    let mut settings = settings.clone();
    if let Some(path) = &cli.audit_log {
        settings.audit_log_path = Some(path.clone());
    }

    let mut session = Session::from_settings(&settings)?;
    apply_range_overrides(&mut session, cli)?;
    for failure in session.audit().write_failures() {
        eprintln!("warning: {}", failure);
    }
    Ok(session)
}

/// Move the range endpoints given on the command line
fn apply_range_overrides(session: &mut Session, cli: &Cli) -> Result<()> {
    let overrides = [(Endpoint::Start, &cli.start), (Endpoint::End, &cli.end)];
    for (endpoint, value) in overrides {
        if let Some(value) = value {
            let date = parse_date_input(value)?;
            RangeService::new(session).set_range_endpoint(date, endpoint)?;
        }
    }
    Ok(())
}

fn handle_config(paths: &BudgetPaths, settings: &Settings, init: bool) -> Result<()> {
    if init {
        settings.save(paths)?;
        println!("Settings written to: {}", paths.settings_file().display());
        println!();
    }

    println!("budget-builder Configuration");
    println!("============================");
    println!("Config directory: {}", paths.base_dir().display());
    println!(
        "Settings file:    {}{}",
        paths.settings_file().display(),
        if paths.is_initialized() { "" } else { " (not created)" }
    );
    println!();
    println!("Settings:");
    println!("  Default range:  {} to {}", settings.default_start, settings.default_end);
    println!("  Seed defaults:  {}", settings.seed_defaults);
    println!("  Export format:  {}", settings.export_format);
    match &settings.audit_log_path {
        Some(path) => println!("  Audit log:      {}", path.display()),
        None => println!("  Audit log:      (in memory only)"),
    }

    Ok(())
}
