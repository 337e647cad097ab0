//! Shared domain types.
//!
//! These types are intentionally kept small and cheap to clone so they can be:
//!
//! - produced once by the ingest step and then only read
//! - handed to the TUI and text reports without conversion
//! - exported to JSON/CSV

use std::fmt;
use std::str::FromStr;

use chrono::{Month, NaiveDate};
use serde::{Serialize, Serializer};

/// Fuel product sold at the pump.
///
/// Variants are declared in lexicographic order of their display names, so the
/// derived `Ord` matches the dropdown order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FuelType {
    Diesel,
    Petrol,
}

impl FuelType {
    pub const ALL: [FuelType; 2] = [FuelType::Diesel, FuelType::Petrol];

    pub fn display_name(self) -> &'static str {
        match self {
            FuelType::Diesel => "Diesel",
            FuelType::Petrol => "Petrol",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for FuelType {
    type Err = String;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FuelType::ALL
            .into_iter()
            .find(|kind| kind.display_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown fuel type '{s}'. Expected Petrol or Diesel."))
    }
}

/// A single validated price observation.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelPriceRecord {
    pub city: String,
    pub fuel_type: FuelType,
    /// Calendar year of `date`.
    pub year: i32,
    /// Calendar month of `date`.
    pub month: Month,
    pub date: NaiveDate,
    /// Retail selling price. Missing source values are stored as `0.0`.
    pub rsp: f64,
}

/// Distinct values available in each filter dropdown.
///
/// Ordering is part of the contract: cities and fuel types ascend, years
/// descend (most recent first).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub cities: Vec<String>,
    pub fuel_types: Vec<FuelType>,
    pub years: Vec<i32>,
}

impl FilterOptions {
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.fuel_types.is_empty() && self.years.is_empty()
    }
}

/// The `(city, fuel type, year)` triple the chart is computed for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Selection {
    /// Empty means no valid selection yet.
    pub city: String,
    pub fuel_type: FuelType,
    pub year: i32,
}

impl Selection {
    pub fn has_city(&self) -> bool {
        !self.city.is_empty()
    }

    pub fn matches(&self, record: &FuelPriceRecord) -> bool {
        record.city == self.city && record.fuel_type == self.fuel_type && record.year == self.year
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let city = if self.city.is_empty() { "-" } else { &self.city };
        write!(f, "{city} / {} / {}", self.fuel_type, self.year)
    }
}

/// One bar of the monthly chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    #[serde(serialize_with = "serialize_month_name")]
    pub month: Month,
    /// Mean RSP for the month, rounded to 2 decimals.
    pub avg_price: f64,
}

impl ChartPoint {
    pub fn month_name(&self) -> &'static str {
        self.month.name()
    }

    /// Three-letter label used on narrow chart axes.
    pub fn short_label(&self) -> &'static str {
        &self.month.name()[..3]
    }
}

fn serialize_month_name<S: Serializer>(month: &Month, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(month.name())
}
