//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs logging
//! - builds the dataset (owned here, borrowed by every view)
//! - dispatches to the TUI or a one-shot command

use std::io::Write;

use clap::Parser;

use crate::cli::{Command, ExportArgs, SummaryArgs, ViewArgs};
use crate::data::Dataset;
use crate::domain::DashboardConfig;
use crate::error::AppError;

pub mod pipeline;

use pipeline::DashboardView;

/// Entry point for the `galvan` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` feeds the `GALVAN_*` fallbacks of the clap arguments.
    dotenvy::dotenv().ok();

    // We want `galvan` and `galvan -y 2024` to behave like `galvan tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let interactive = matches!(cli.command, Command::Tui(_));
    crate::logging::init_logger(cli.verbose, interactive);

    let dataset = Dataset::builtin();

    match cli.command {
        Command::Tui(args) => crate::tui::run(&dataset, config_from_args(&args, cli.verbose)),
        Command::Summary(args) => handle_summary(&dataset, args),
        Command::Export(args) => handle_export(&dataset, args, cli.verbose),
        Command::Years => {
            for year in dataset.years() {
                println!("{year}");
            }
            Ok(())
        }
    }
}

pub fn config_from_args(args: &ViewArgs, verbose: bool) -> DashboardConfig {
    DashboardConfig {
        year: args.year,
        export_dir: args.export_dir.clone(),
        verbose,
    }
}

fn handle_summary(dataset: &Dataset, args: SummaryArgs) -> Result<(), AppError> {
    let view = DashboardView::for_year(dataset, args.view.year);

    if args.json {
        let kpis = view.kpis.map_err(AppError::from)?;
        let json = serde_json::to_string_pretty(&kpis)
            .map_err(|e| AppError::new(4, format!("Failed to encode KPIs as JSON: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    print!("{}", crate::report::format_dashboard(&view));

    // Text output still prints every section; the exit code reports the KPI failure.
    if let Err(err) = view.kpis {
        return Err(err.into());
    }
    Ok(())
}

fn handle_export(dataset: &Dataset, args: ExportArgs, verbose: bool) -> Result<(), AppError> {
    let config = config_from_args(&args.view, verbose);
    let view = DashboardView::for_year(dataset, config.year);
    if view.records.is_empty() {
        tracing::warn!(year = config.year, "exporting an empty selection");
    }

    if args.stdout {
        let bytes = view.csv()?;
        std::io::stdout()
            .write_all(&bytes)
            .map_err(|e| AppError::new(4, format!("Failed to write CSV to stdout: {e}")))?;
        return Ok(());
    }

    let path = match args.output {
        Some(path) => {
            crate::io::export::write_csv(&path, &view.records)?;
            path
        }
        None => view.export_to_dir(&config.export_dir)?,
    };
    println!("Wrote {} ({})", path.display(), crate::io::export::CSV_MIME_TYPE);
    Ok(())
}

/// Rewrite argv so `galvan` defaults to `galvan tui`.
///
/// Rules (global flags such as `-v` are skipped before deciding):
/// - `galvan`                        -> `galvan tui`
/// - `galvan -y 2024 ...`            -> `galvan tui -y 2024 ...`
/// - `galvan -v summary ...`         -> unchanged
/// - `galvan --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let first = argv
        .iter()
        .skip(1)
        .find(|arg| !matches!(arg.as_str(), "-v" | "--verbose"))
        .cloned();

    let Some(arg1) = first else {
        argv.insert(argv.len().min(1), "tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "summary" | "export" | "years");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(args(&["galvan"])), args(&["galvan", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(args(&["galvan", "-y", "2024"])),
            args(&["galvan", "tui", "-y", "2024"])
        );
    }

    #[test]
    fn subcommands_and_help_untouched() {
        let summary = args(&["galvan", "summary", "--json"]);
        assert_eq!(rewrite_args(summary.clone()), summary);
        let help = args(&["galvan", "--help"]);
        assert_eq!(rewrite_args(help.clone()), help);
    }

    #[test]
    fn global_flag_before_subcommand_is_kept() {
        let summary = args(&["galvan", "-v", "summary"]);
        assert_eq!(rewrite_args(summary.clone()), summary);

        let export = args(&["galvan", "-v", "export", "--stdout"]);
        let cli = crate::cli::Cli::try_parse_from(rewrite_args(export)).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Export(ref a) if a.stdout));
    }

    #[test]
    fn global_flag_alone_opens_tui() {
        assert_eq!(
            rewrite_args(args(&["galvan", "--verbose"])),
            args(&["galvan", "tui", "--verbose"])
        );
        let cli = crate::cli::Cli::try_parse_from(rewrite_args(args(&["galvan", "-v", "-y", "2024"])))
            .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Tui(ref v) if v.year == 2024));
    }

    #[test]
    fn rewritten_args_parse() {
        let cli = crate::cli::Cli::parse_from(rewrite_args(args(&["galvan", "-y", "2024"])));
        match cli.command {
            Command::Tui(view) => assert_eq!(config_from_args(&view, false).year, 2024),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
