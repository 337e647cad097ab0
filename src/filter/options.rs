//! Distinct filter values derived from the working record set.

use std::collections::HashSet;

use crate::domain::{FilterOptions, FuelPriceRecord};

/// Collect the distinct cities, fuel types and years present in `records`.
///
/// The result does not depend on record order: cities and fuel types are
/// sorted ascending, years descending.
pub fn extract_filter_options(records: &[FuelPriceRecord]) -> FilterOptions {
    let mut cities = HashSet::new();
    let mut fuel_types = HashSet::new();
    let mut years = HashSet::new();

    for r in records {
        cities.insert(r.city.as_str());
        fuel_types.insert(r.fuel_type);
        years.insert(r.year);
    }

    let mut cities: Vec<String> = cities.into_iter().map(str::to_string).collect();
    cities.sort_unstable();

    let mut fuel_types: Vec<_> = fuel_types.into_iter().collect();
    fuel_types.sort_unstable_by_key(|kind| kind.display_name());

    let mut years: Vec<i32> = years.into_iter().collect();
    years.sort_unstable_by(|a, b| b.cmp(a));

    FilterOptions {
        cities,
        fuel_types,
        years,
    }
}
