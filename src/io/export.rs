//! Export the monthly chart series.
//!
//! CSV is meant for spreadsheets; JSON carries the selection alongside the
//! series so downstream scripts know what they are looking at.

use std::fs::File;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::domain::{ChartPoint, Selection};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.csv` (any case) selects CSV; everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv { Self::Csv } else { Self::Json }
    }
}

#[derive(Serialize)]
struct ChartFile<'a> {
    tool: &'static str,
    selection: &'a Selection,
    points: &'a [ChartPoint],
}

/// Write the series to `path`, picking the format from its extension.
pub fn write_chart(path: &Path, selection: &Selection, points: &[ChartPoint]) -> Result<ExportFormat, AppError> {
    let format = ExportFormat::from_path(path);
    match format {
        ExportFormat::Csv => write_chart_csv(path, selection, points)?,
        ExportFormat::Json => write_chart_json(path, selection, points)?,
    }
    info!(path = %path.display(), ?format, n_points = points.len(), "Exported chart");
    Ok(format)
}

/// One row per month: `city,fuel_type,year,month,avg_price`.
pub fn write_chart_csv(path: &Path, selection: &Selection, points: &[ChartPoint]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(["city", "fuel_type", "year", "month", "avg_price"])
        .map_err(|e| AppError::input(format!("Failed to write export CSV header: {e}")))?;

    for p in points {
        writer
            .write_record([
                selection.city.clone(),
                selection.fuel_type.to_string(),
                selection.year.to_string(),
                p.month_name().to_string(),
                format!("{:.2}", p.avg_price),
            ])
            .map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush export CSV: {e}")))
}

pub fn write_chart_json(path: &Path, selection: &Selection, points: &[ChartPoint]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let chart = ChartFile {
        tool: "fuel",
        selection,
        points,
    };
    serde_json::to_writer_pretty(file, &chart)
        .map_err(|e| AppError::input(format!("Failed to write export JSON: {e}")))
}
