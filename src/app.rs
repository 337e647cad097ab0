//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - loads the dataset and runs the aggregation
//! - prints reports/plots or hands over to the TUI
//! - writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, DatasetArgs, ExportArgs, SummaryArgs};
use crate::error::AppError;

pub mod pipeline;
pub mod state;

/// Entry point for the `fuel` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();

    // We want `fuel` and `fuel -f prices.csv` to behave like `fuel tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_tracing(&cli.command);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Summary(args) => handle_summary(args),
        Command::Options(args) => handle_options(args),
        Command::Export(args) => handle_export(args),
    }
}

/// `RUST_LOG` wins; otherwise warnings for text commands and nothing for the
/// TUI, whose alternate screen would be garbled by stderr output.
fn init_tracing(command: &Command) {
    let default_level = match command {
        Command::Tui(_) => "off",
        _ => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_tui(args: DatasetArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let run = pipeline::run(&args.dataset, &args.selection)?;

    println!("{}", crate::report::format_run_summary(&run.data, &run.selection));
    println!("{}", crate::report::format_filter_options(&run.options));
    println!("{}", crate::report::format_monthly_table(&run.points));

    if !args.no_plot && !run.points.is_empty() {
        println!("{}", crate::plot::render_bar_chart(&run.points, args.width));
    }
    Ok(())
}

fn handle_options(args: DatasetArgs) -> Result<(), AppError> {
    let data = pipeline::load(&args)?;
    let options = crate::filter::extract_filter_options(&data.records);
    println!("{}", crate::report::format_filter_options(&options));
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let run = pipeline::run(&args.dataset, &args.selection)?;
    let format = crate::io::export::write_chart(&args.out, &run.selection, &run.points)?;
    println!(
        "Wrote {} month(s) for {} to {} ({format:?})",
        run.points.len(),
        run.selection,
        args.out.display()
    );
    Ok(())
}

/// Rewrite argv so `fuel` defaults to `fuel tui`.
///
/// Rules:
/// - `fuel`                     -> `fuel tui`
/// - `fuel -f prices.csv ...`   -> `fuel tui -f prices.csv ...`
/// - `fuel --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "summary" | "options" | "export");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["fuel"])), argv(&["fuel", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["fuel", "-f", "p.csv"])),
            argv(&["fuel", "tui", "-f", "p.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [
            argv(&["fuel", "summary", "-f", "p.csv"]),
            argv(&["fuel", "--help"]),
            argv(&["fuel", "export", "-o", "x.json"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }
}
