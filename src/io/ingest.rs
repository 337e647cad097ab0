//! CSV ingest and normalization.
//!
//! This module turns a fuel price CSV into the working record set.
//!
//! Design goals:
//! - **Exact header contract** (column names match byte for byte)
//! - **Row-level leniency** (bad rows are dropped and traced, never fatal)
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no filtering or aggregation here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Datelike, Month, NaiveDate};
use csv::StringRecord;
use tracing::{debug, info, warn};

use crate::domain::{FuelPriceRecord, FuelType};
use crate::error::AppError;

/// One CSV record keyed by header name. Values are untyped.
pub type RawRow = HashMap<String, String>;

pub const DEFAULT_DATE_COLUMN: &str = "Calendar Day";
pub const DEFAULT_CITY_COLUMN: &str = "Metro Cities";
pub const DEFAULT_FUEL_TYPE_COLUMN: &str = "Products";
pub const DEFAULT_PRICE_COLUMN: &str = "Retail Selling Price (Rs./Litre)";

/// Column names the parser reads from.
///
/// Matching is exact, including any whitespace the data source leaves in its
/// header names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetColumns {
    pub date: String,
    pub city: String,
    pub fuel_type: String,
    pub price: String,
}

impl Default for DatasetColumns {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_COLUMN.to_string(),
            city: DEFAULT_CITY_COLUMN.to_string(),
            fuel_type: DEFAULT_FUEL_TYPE_COLUMN.to_string(),
            price: DEFAULT_PRICE_COLUMN.to_string(),
        }
    }
}

impl DatasetColumns {
    fn required(&self) -> [&str; 4] {
        [
            self.date.as_str(),
            self.city.as_str(),
            self.fuel_type.as_str(),
            self.price.as_str(),
        ]
    }
}

/// Ingest output: the working record set plus what happened on the way.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub records: Vec<FuelPriceRecord>,
    pub columns: DatasetColumns,
    pub rows_read: usize,
    pub rows_used: usize,
}

impl IngestedData {
    pub fn rows_skipped(&self) -> usize {
        self.rows_read - self.rows_used
    }
}

/// Open `path` and load it into the working record set.
///
/// This is the only fallible step of the pipeline: a missing file, an
/// unreadable header or a missing required column aborts the load. Anything
/// wrong with individual rows only shrinks the record set.
pub fn load_dataset(path: &Path, columns: &DatasetColumns) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let data = load_from_reader(file, columns)?;
    info!(
        path = %path.display(),
        rows_read = data.rows_read,
        rows_used = data.rows_used,
        rows_skipped = data.rows_skipped(),
        "Loaded dataset"
    );
    Ok(data)
}

/// Same as [`load_dataset`], for any byte source.
pub fn load_from_reader<R: Read>(reader: R, columns: &DatasetColumns) -> Result<IngestedData, AppError> {
    let RawTable { rows, records_read } = read_raw_rows(reader, columns)?;
    let records = parse_records(&rows, columns);
    let rows_used = records.len();

    Ok(IngestedData {
        records,
        columns: columns.clone(),
        rows_read: records_read,
        rows_used,
    })
}

/// Header-keyed rows plus the number of records the reader attempted.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub rows: Vec<RawRow>,
    /// Includes records that failed at the CSV level and are absent from `rows`.
    pub records_read: usize,
}

/// Read CSV text into header-keyed rows.
///
/// Blank lines are skipped by the reader. Records that fail at the CSV level
/// (e.g. invalid UTF-8) are traced and skipped, but still counted.
pub fn read_raw_rows<R: Read>(reader: R, columns: &DatasetColumns) -> Result<RawTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let headers = normalize_headers(&headers);

    ensure_required_columns_exist(&headers, columns)?;

    let mut table = RawTable::default();
    for result in reader.records() {
        table.records_read += 1;
        match result {
            Ok(record) => table.rows.push(to_raw_row(&headers, &record)),
            Err(e) => {
                let line = e.position().map(|p| p.line());
                warn!(?line, error = %e, "Skipping unreadable CSV record");
            }
        }
    }
    Ok(table)
}

/// Whether the header row of `reader` names every configured column.
///
/// Only the header is read; any problem reading it counts as "no".
pub fn has_required_columns<R: Read>(reader: R, columns: &DatasetColumns) -> bool {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    match reader.headers() {
        Ok(headers) => ensure_required_columns_exist(&normalize_headers(headers), columns).is_ok(),
        Err(_) => false,
    }
}

fn normalize_headers(headers: &StringRecord) -> Vec<String> {
    // Spreadsheet exports often prefix the first header with a BOM. It is the
    // only normalization applied; all other whitespace is significant.
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx == 0 {
                name.trim_start_matches('\u{feff}').to_string()
            } else {
                name.to_string()
            }
        })
        .collect()
}

fn ensure_required_columns_exist(headers: &[String], columns: &DatasetColumns) -> Result<(), AppError> {
    for name in columns.required() {
        if !headers.iter().any(|h| h == name) {
            return Err(AppError::input(format!(
                "Missing required column: `{name}` (found: {})",
                headers
                    .iter()
                    .map(|h| format!("`{h}`"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
    }
    Ok(())
}

fn to_raw_row(headers: &[String], record: &StringRecord) -> RawRow {
    headers
        .iter()
        .zip(record.iter())
        .map(|(name, value)| (name.clone(), value.to_string()))
        .collect()
}

/// Convert raw rows into validated records, dropping rows that cannot be used.
///
/// Drop rules:
/// - date, city or fuel type absent or blank: dropped silently
/// - date present but unparseable: dropped with a warning
/// - fuel type other than Petrol/Diesel: dropped with a warning
///
/// A missing or non-numeric price is *not* a drop reason; it becomes `0.0`.
pub fn parse_records(rows: &[RawRow], columns: &DatasetColumns) -> Vec<FuelPriceRecord> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| parse_record(row, columns, index))
        .collect()
}

fn parse_record(row: &RawRow, columns: &DatasetColumns, index: usize) -> Option<FuelPriceRecord> {
    let (Some(raw_date), Some(city), Some(raw_fuel)) = (
        get_required(row, &columns.date),
        get_required(row, &columns.city),
        get_required(row, &columns.fuel_type),
    ) else {
        debug!(index, "Skipping row with missing date, city or fuel type");
        return None;
    };

    let date = match parse_date(raw_date) {
        Some(date) => date,
        None => {
            warn!(index, date = raw_date, "Skipping row with invalid date");
            return None;
        }
    };

    let fuel_type = match raw_fuel.parse::<FuelType>() {
        Ok(kind) => kind,
        Err(_) => {
            warn!(index, fuel_type = raw_fuel, "Skipping row with unsupported fuel type");
            return None;
        }
    };

    let month = Month::try_from(u8::try_from(date.month()).ok()?).ok()?;

    Some(FuelPriceRecord {
        city: city.to_string(),
        fuel_type,
        year: date.year(),
        month,
        date,
        rsp: parse_price(row.get(&columns.price).map(String::as_str)),
    })
}

fn get_required<'a>(row: &'a RawRow, name: &str) -> Option<&'a str> {
    row.get(name).map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Parse a calendar date in one of the formats seen in price exports.
///
/// Timestamps are accepted too; only their date part is kept.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    const FMTS: [&str; 7] = [
        "%Y-%m-%d",
        "%d/%m/%Y",
        "%d-%m-%Y",
        "%Y/%m/%d",
        "%d-%b-%Y",
        "%d %b %Y",
        "%b %d, %Y",
    ];

    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    None
}

/// Missing, non-numeric, non-finite and negative prices all become `0.0`.
pub fn parse_price(s: Option<&str>) -> f64 {
    s.map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}
