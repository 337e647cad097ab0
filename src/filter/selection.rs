//! Initial selection chosen from the available filter options.

use chrono::{Datelike, Local};

use crate::domain::{FilterOptions, FuelType, Selection};

/// Fuel type used when the dataset offers none.
pub const FALLBACK_FUEL_TYPE: FuelType = FuelType::Petrol;

/// Initial selection: alphabetically first city and fuel type, most recent year.
///
/// Each dimension falls back on its own when its list is empty. The city
/// falls back to `""`, which callers treat as "no valid selection yet".
pub fn default_selection(options: &FilterOptions) -> Selection {
    default_selection_with_year(options, Local::now().year())
}

/// [`default_selection`] with an explicit fallback year.
pub fn default_selection_with_year(options: &FilterOptions, fallback_year: i32) -> Selection {
    Selection {
        city: options.cities.first().cloned().unwrap_or_default(),
        fuel_type: options.fuel_types.first().copied().unwrap_or(FALLBACK_FUEL_TYPE),
        year: options.years.first().copied().unwrap_or(fallback_year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_of_each_list() {
        let options = FilterOptions {
            cities: vec!["Chennai".into(), "Delhi".into()],
            fuel_types: vec![FuelType::Diesel, FuelType::Petrol],
            years: vec![2024, 2023],
        };
        let selection = default_selection_with_year(&options, 1999);
        assert_eq!(
            selection,
            Selection {
                city: "Chennai".into(),
                fuel_type: FuelType::Diesel,
                year: 2024,
            }
        );
        assert!(selection.has_city());
    }

    #[test]
    fn empty_options_use_fallbacks() {
        let selection = default_selection_with_year(&FilterOptions::default(), 2026);
        assert_eq!(selection.city, "");
        assert!(!selection.has_city());
        assert_eq!(selection.fuel_type, FuelType::Petrol);
        assert_eq!(selection.year, 2026);
    }

    #[test]
    fn wall_clock_fallback_is_current_year() {
        let selection = default_selection(&FilterOptions::default());
        assert_eq!(selection.year, Local::now().year());
    }
}
