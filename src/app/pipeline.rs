//! Shared pipeline logic used by both the text commands and the TUI.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV path -> ingest -> filter options -> selection -> monthly averages
//!
//! The front-ends can then focus on presentation (printing vs widgets).

use std::path::PathBuf;

use crate::cli::picker::{prompt_for_csv_path, validate_csv_path};
use crate::cli::{DatasetArgs, SelectionArgs};
use crate::domain::{ChartPoint, FilterOptions, FuelType, Selection};
use crate::error::{AppError, EXIT_SELECTION};
use crate::filter::{default_selection, extract_filter_options};
use crate::io::ingest::{IngestedData, load_dataset};
use crate::report::monthly_averages;

/// All computed outputs for one selection.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub data: IngestedData,
    pub options: FilterOptions,
    pub selection: Selection,
    pub points: Vec<ChartPoint>,
}

/// The CSV to load: `-f`/`FUEL_PRICES_CSV` if given, else ask the user.
pub fn resolve_csv_path(args: &DatasetArgs) -> Result<PathBuf, AppError> {
    match &args.file {
        Some(path) => validate_csv_path(path),
        None => prompt_for_csv_path(&args.columns()),
    }
}

/// Load the dataset named by `args`.
pub fn load(args: &DatasetArgs) -> Result<IngestedData, AppError> {
    let path = resolve_csv_path(args)?;
    load_dataset(&path, &args.columns())
}

/// Default selection with any command-line overrides applied on top.
pub fn resolve_selection(options: &FilterOptions, args: &SelectionArgs) -> Result<Selection, AppError> {
    let mut selection = default_selection(options);
    if let Some(city) = &args.city {
        selection.city = city.trim().to_string();
    }
    if let Some(fuel) = &args.fuel {
        selection.fuel_type = fuel
            .parse::<FuelType>()
            .map_err(|e| AppError::new(EXIT_SELECTION, e))?;
    }
    if let Some(year) = args.year {
        selection.year = year;
    }
    Ok(selection)
}

/// Run the aggregation for an already-loaded dataset.
pub fn run_with_data(data: IngestedData, args: &SelectionArgs) -> Result<RunOutput, AppError> {
    let options = extract_filter_options(&data.records);
    let selection = resolve_selection(&options, args)?;
    let points = monthly_averages(&data.records, &selection);

    Ok(RunOutput {
        data,
        options,
        selection,
        points,
    })
}

/// Load + aggregate in one step.
pub fn run(dataset: &DatasetArgs, selection: &SelectionArgs) -> Result<RunOutput, AppError> {
    run_with_data(load(dataset)?, selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::{DatasetColumns, load_from_reader};
    use approx::assert_relative_eq;

    fn data() -> IngestedData {
        let csv = "Calendar Day,Metro Cities,Products,Retail Selling Price (Rs./Litre)\n\
                   2023-01-01,Delhi,Petrol,100\n\
                   2023-01-02,Delhi,Petrol,102\n\
                   2022-06-01,Mumbai,Diesel,94.27\n";
        load_from_reader(csv.as_bytes(), &DatasetColumns::default()).unwrap()
    }

    #[test]
    fn defaults_fill_unset_parts() {
        let out = run_with_data(data(), &SelectionArgs::default()).unwrap();
        assert_eq!(out.selection.city, "Delhi");
        assert_eq!(out.selection.fuel_type, FuelType::Diesel);
        assert_eq!(out.selection.year, 2023);
        assert!(out.points.is_empty());
    }

    #[test]
    fn overrides_select_the_series() {
        let args = SelectionArgs {
            city: Some(" Delhi ".into()),
            fuel: Some("petrol".into()),
            year: Some(2023),
        };
        let out = run_with_data(data(), &args).unwrap();
        assert_eq!(out.points.len(), 1);
        assert_relative_eq!(out.points[0].avg_price, 101.0);
    }

    #[test]
    fn unknown_fuel_is_a_selection_error() {
        let args = SelectionArgs {
            fuel: Some("kerosene".into()),
            ..SelectionArgs::default()
        };
        let err = run_with_data(data(), &args).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_SELECTION);
    }

    #[test]
    fn missing_file_fails_to_load() {
        let args = DatasetArgs {
            file: Some(PathBuf::from("nope/prices.csv")),
            date_column: "Calendar Day".into(),
            city_column: "Metro Cities".into(),
            fuel_column: "Products".into(),
            price_column: "Retail Selling Price (Rs./Litre)".into(),
        };
        assert!(load(&args).is_err());
    }
}
