//! Command-line parsing for the market dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the dataset/metrics code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::DashboardConfig;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "galvan", version, about = "Galvan Intelligence Dashboard (Joinville real-estate market)")]
pub struct Cli {
    /// Log debug output (CLI commands only; set RUST_LOG to log from the TUI).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard.
    ///
    /// KPI tiles, comparison charts and the data table for the selected year,
    /// rendered in a terminal UI using Ratatui.
    Tui(ViewArgs),
    /// Print KPIs, the year comparison and the data table.
    Summary(SummaryArgs),
    /// Write the selected year's records as CSV.
    Export(ExportArgs),
    /// List the years available for selection.
    Years,
}

/// Options shared by every view of the dashboard.
#[derive(Debug, Args, Clone)]
pub struct ViewArgs {
    /// Year to analyse.
    #[arg(short, long, env = "GALVAN_YEAR", default_value_t = DashboardConfig::DEFAULT_YEAR)]
    pub year: i32,

    /// Directory where CSV downloads are written.
    #[arg(long, env = "GALVAN_EXPORT_DIR", default_value = ".")]
    pub export_dir: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Print the KPIs as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Output path (default: `<export-dir>/dados_mercado_<year>.csv`).
    #[arg(short, long, value_name = "CSV", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write the CSV to standard output.
    #[arg(long)]
    pub stdout: bool,
}
