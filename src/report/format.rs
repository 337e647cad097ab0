//! Formatted terminal output for the text commands.
//!
//! We keep formatting code in one place so:
//! - the aggregation code stays clean and testable
//! - output changes are localized

use crate::domain::{ChartPoint, FilterOptions, Selection};
use crate::io::ingest::IngestedData;

pub const NO_DATA_MESSAGE: &str = "No data for this selection.";

/// Dataset statistics + selection header.
pub fn format_run_summary(data: &IngestedData, selection: &Selection) -> String {
    let mut out = String::new();

    out.push_str("=== fuel - Monthly Average Retail Price ===\n");
    out.push_str(&format!(
        "Rows: read={} used={} skipped={}\n",
        data.rows_read,
        data.rows_used,
        data.rows_skipped()
    ));
    out.push_str(&format!("Selection: {selection}\n"));
    out
}

/// Month / average table. Empty series print the no-data message.
pub fn format_monthly_table(points: &[ChartPoint]) -> String {
    if points.is_empty() {
        return format!("{NO_DATA_MESSAGE}\n");
    }

    let mut out = String::new();
    out.push_str(&format!("{:<10} {:>10}\n", "Month", "Avg RSP"));
    out.push_str(&format!("{:-<10} {:->10}\n", "", ""));
    for p in points {
        out.push_str(&format!("{:<10} {:>10.2}\n", p.month_name(), p.avg_price));
    }
    out
}

pub fn format_filter_options(options: &FilterOptions) -> String {
    if options.is_empty() {
        return "No usable rows in the dataset.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("Cities ({}): {}\n", options.cities.len(), options.cities.join(", ")));
    out.push_str(&format!(
        "Fuel types ({}): {}\n",
        options.fuel_types.len(),
        options
            .fuel_types
            .iter()
            .map(|k| k.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    out.push_str(&format!(
        "Years ({}): {}\n",
        options.years.len(),
        options
            .years
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    ));
    out
}
