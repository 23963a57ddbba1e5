//! Quotation CLI - Command Line Operations for Manpower Quotations
//!
//! This is the operational entry point for the quotation engine.
//!
//! # Commands
//!
//! - `quotation quote --workbook <path>` - Compute and print a quotation
//! - `quotation template --output <path>` - Write the blank master-data template
//! - `quotation export --workbook <path> --output <path>` - Write the P&L statement
//! - `quotation master-data --workbook <path> --output <path>` - Re-export master data
//! - `quotation project <save|list|show|delete>` - Manage saved projects
//! - `quotation check` - Validate configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer in the A-I-P-S architecture, this crate
//! orchestrates the workbook adapter, the project store and the engine.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use quote_core::Currency;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::quote::OutputFormat;
use commands::Selection;
use config::{LogLevel, QuotationConfig};

/// Manpower quotation engine CLI
#[derive(Parser)]
#[command(name = "quotation")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "quotation.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a quotation from a workbook and print it
    Quote {
        /// Workbook (CSV directory or .json file)
        #[arg(short, long)]
        workbook: PathBuf,

        /// Add a roster line, e.g. --select "Welder=3" (repeatable)
        #[arg(short, long = "select", value_name = "NAME=QTY")]
        selections: Vec<Selection>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Display currency (USD, QAR, EUR); defaults to the configured one
        #[arg(long)]
        currency: Option<Currency>,
    },

    /// Write the blank master-data template
    Template {
        /// Output CSV directory or .json file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write the P&L statement and detailed matrix of a quotation
    Export {
        /// Workbook (CSV directory or .json file)
        #[arg(short, long)]
        workbook: PathBuf,

        /// Output CSV directory or .json file
        #[arg(short, long)]
        output: PathBuf,

        /// Add a roster line (repeatable)
        #[arg(short, long = "select", value_name = "NAME=QTY")]
        selections: Vec<Selection>,

        /// Quotation reference
        #[arg(short, long, default_value = "")]
        reference: String,

        /// Client name
        #[arg(long, default_value = "")]
        client: String,
    },

    /// Re-export the positions, clients and parameters of a workbook
    MasterData {
        /// Workbook (CSV directory or .json file)
        #[arg(short, long)]
        workbook: PathBuf,

        /// Output CSV directory or .json file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Manage saved projects
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Check configuration and the base parameter set
    Check,
}

#[derive(Subcommand)]
enum ProjectCommand {
    /// Save a quotation as a new project
    Save {
        /// Workbook (CSV directory or .json file)
        #[arg(short, long)]
        workbook: PathBuf,

        /// Project name
        #[arg(short, long)]
        name: String,

        /// Client name
        #[arg(long, default_value = "")]
        client: String,

        /// Quotation reference
        #[arg(short, long, default_value = "")]
        reference: String,

        /// Add a roster line (repeatable)
        #[arg(short, long = "select", value_name = "NAME=QTY")]
        selections: Vec<Selection>,
    },

    /// List saved projects, newest first
    List,

    /// Recompute and summarise a saved project
    Show {
        /// Project id
        id: String,
    },

    /// Delete a saved project
    Delete {
        /// Project id
        id: String,
    },
}

fn init_tracing(verbose: bool, level: LogLevel) {
    let fallback = if verbose { LogLevel::Debug } else { level };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: &Path) -> Result<QuotationConfig> {
    Ok(QuotationConfig::load_or_default(path)?.with_env_override()?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    init_tracing(cli.verbose, config.log_level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!("Using configuration from {}", cli.config.display());

    match cli.command {
        Commands::Quote {
            workbook,
            selections,
            format,
            currency,
        } => commands::quote::run(&workbook, &selections, format, currency, &config),
        Commands::Template { output } => commands::template::run(&output),
        Commands::Export {
            workbook,
            output,
            selections,
            reference,
            client,
        } => commands::export::run(&workbook, &output, &selections, &reference, &client, &config),
        Commands::MasterData { workbook, output } => commands::master_data::run(&workbook, &output, &config),
        Commands::Project(project) => match project {
            ProjectCommand::Save {
                workbook,
                name,
                client,
                reference,
                selections,
            } => {
                let request = commands::project::SaveRequest {
                    workbook: &workbook,
                    name: &name,
                    client: &client,
                    reference: &reference,
                    selections: &selections,
                };
                commands::project::save(&request, &config).map(|_| ())
            }
            ProjectCommand::List => commands::project::list(&config),
            ProjectCommand::Show { id } => commands::project::show(&id, &config),
            ProjectCommand::Delete { id } => commands::project::delete(&id, &config),
        },
        Commands::Check => commands::check::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_quote_with_selections() {
        let cli = Cli::parse_from([
            "quotation",
            "quote",
            "--workbook",
            "rates.json",
            "--select",
            "Welder=3",
            "-s",
            "Fitter=1",
            "--format",
            "csv",
            "--currency",
            "qar",
        ]);

        match cli.command {
            Commands::Quote {
                workbook,
                selections,
                format,
                currency,
            } => {
                assert_eq!(workbook, PathBuf::from("rates.json"));
                assert_eq!(selections.len(), 2);
                assert_eq!(selections[0].name, "Welder");
                assert_eq!(format, OutputFormat::Csv);
                assert_eq!(currency, Some(Currency::QAR));
            }
            _ => panic!("expected quote command"),
        }
        assert_eq!(cli.config, PathBuf::from("quotation.toml"));
    }

    #[test]
    fn test_invalid_selection_rejected() {
        let result = Cli::try_parse_from(["quotation", "quote", "-w", "rates.json", "--select", "Welder"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_project_list() {
        let cli = Cli::parse_from(["quotation", "-v", "project", "list"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Project(ProjectCommand::List)));
    }
}
