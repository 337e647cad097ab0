//! Command-line parsing for the fuel price dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the ingest/aggregation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::io::ingest::{
    DEFAULT_CITY_COLUMN, DEFAULT_DATE_COLUMN, DEFAULT_FUEL_TYPE_COLUMN, DEFAULT_PRICE_COLUMN,
    DatasetColumns,
};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fuel", version, about = "Monthly average fuel retail prices by city, product and year")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (the default).
    Tui(DatasetArgs),
    /// Print the monthly averages for one selection as a table and a bar chart.
    Summary(SummaryArgs),
    /// Print the cities, fuel types and years found in the dataset.
    Options(DatasetArgs),
    /// Write the monthly averages for one selection to CSV or JSON.
    Export(ExportArgs),
}

/// Where the dataset lives and how its columns are named.
#[derive(Debug, Args, Clone)]
pub struct DatasetArgs {
    /// Price CSV. When omitted and `FUEL_PRICES_CSV` is unset, pick one interactively.
    #[arg(short = 'f', long, env = "FUEL_PRICES_CSV", value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Header of the calendar date column (matched exactly).
    #[arg(long, default_value = DEFAULT_DATE_COLUMN)]
    pub date_column: String,

    /// Header of the city column (matched exactly).
    #[arg(long, default_value = DEFAULT_CITY_COLUMN)]
    pub city_column: String,

    /// Header of the product / fuel type column (matched exactly).
    #[arg(long, default_value = DEFAULT_FUEL_TYPE_COLUMN)]
    pub fuel_column: String,

    /// Header of the retail selling price column (matched exactly).
    #[arg(long, default_value = DEFAULT_PRICE_COLUMN)]
    pub price_column: String,
}

impl DatasetArgs {
    pub fn columns(&self) -> DatasetColumns {
        DatasetColumns {
            date: self.date_column.clone(),
            city: self.city_column.clone(),
            fuel_type: self.fuel_column.clone(),
            price: self.price_column.clone(),
        }
    }
}

/// Selection overrides. Anything left out comes from the default selection.
#[derive(Debug, Args, Clone, Default)]
pub struct SelectionArgs {
    /// City to chart (exact match).
    #[arg(long)]
    pub city: Option<String>,

    /// Fuel type to chart (Petrol or Diesel).
    #[arg(long)]
    pub fuel: Option<String>,

    /// Calendar year to chart.
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Bar chart width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Skip the bar chart.
    #[arg(long)]
    pub no_plot: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output file; `.csv` writes CSV, anything else JSON.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub out: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn summary_parses_selection() {
        let cli = Cli::try_parse_from([
            "fuel", "summary", "-f", "prices.csv", "--city", "Delhi", "--fuel", "petrol", "--year", "2023",
        ])
        .unwrap();
        let Command::Summary(args) = cli.command else {
            panic!("expected summary");
        };
        assert_eq!(args.dataset.file, Some(PathBuf::from("prices.csv")));
        assert_eq!(args.selection.city.as_deref(), Some("Delhi"));
        assert_eq!(args.selection.year, Some(2023));
        assert_eq!(args.dataset.columns(), DatasetColumns::default());
    }

    #[test]
    fn column_names_can_be_overridden() {
        let cli = Cli::try_parse_from(["fuel", "options", "-f", "p.csv", "--fuel-column", " Products"]).unwrap();
        let Command::Options(args) = cli.command else {
            panic!("expected options");
        };
        assert_eq!(args.columns().fuel_type, " Products");
    }
}
