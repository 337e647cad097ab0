//! Dashboard state shared by the front-ends.
//!
//! The dataflow is `(records, selection) -> (options, defaults, chart)`. The
//! record set is written once when loading finishes and is read-only after
//! that; everything else is recomputed from it. The chart is memoized on the
//! selection it was computed for.

use tracing::{debug, warn};

use crate::domain::{ChartPoint, FilterOptions, FuelPriceRecord, Selection};
use crate::error::AppError;
use crate::filter::{default_selection, extract_filter_options};
use crate::io::ingest::IngestedData;
use crate::report::monthly_averages;

/// Where the one-time dataset load stands.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    /// Terminal: a failed load is not retried.
    Failed(String),
    Ready(IngestedData),
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    load: LoadState,
    options: FilterOptions,
    selection: Selection,
    chart_cache: Option<(Selection, Vec<ChartPoint>)>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        let options = FilterOptions::default();
        let selection = default_selection(&options);
        Self {
            load: LoadState::Loading,
            options,
            selection,
            chart_cache: None,
        }
    }

    pub fn loading(&self) -> bool {
        matches!(self.load, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.load {
            LoadState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// True once a load succeeded with at least one usable record.
    pub fn data_ready(&self) -> bool {
        self.data().is_some_and(|d| !d.records.is_empty())
    }

    pub fn data(&self) -> Option<&IngestedData> {
        match &self.load {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn records(&self) -> &[FuelPriceRecord] {
        self.data().map(|d| d.records.as_slice()).unwrap_or(&[])
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Record the outcome of the dataset load.
    ///
    /// Only the first call has an effect; the record set is write-once.
    pub fn finish_loading(&mut self, result: Result<IngestedData, AppError>) {
        if !self.loading() {
            warn!("Ignoring a second dataset load");
            return;
        }

        match result {
            Ok(data) => {
                self.options = extract_filter_options(&data.records);
                self.selection = default_selection(&self.options);
                debug!(selection = %self.selection, "Applied default selection");
                self.load = LoadState::Ready(data);
            }
            Err(err) => {
                self.load = LoadState::Failed(err.message().to_string());
            }
        }
        self.chart_cache = None;
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Move the city to the next (`delta > 0`) or previous option, wrapping.
    pub fn cycle_city(&mut self, delta: isize) {
        if let Some(city) = cycle(&self.options.cities, &self.selection.city, delta) {
            self.selection.city = city;
        }
    }

    pub fn cycle_fuel_type(&mut self, delta: isize) {
        if let Some(kind) = cycle(&self.options.fuel_types, &self.selection.fuel_type, delta) {
            self.selection.fuel_type = kind;
        }
    }

    pub fn cycle_year(&mut self, delta: isize) {
        if let Some(year) = cycle(&self.options.years, &self.selection.year, delta) {
            self.selection.year = year;
        }
    }

    /// Monthly averages for the current selection.
    pub fn chart(&mut self) -> &[ChartPoint] {
        let stale = self
            .chart_cache
            .as_ref()
            .is_none_or(|(key, _)| key != &self.selection);
        if stale {
            let points = monthly_averages(self.records(), &self.selection);
            self.chart_cache = Some((self.selection.clone(), points));
        }
        self.chart_cache
            .as_ref()
            .map(|(_, points)| points.as_slice())
            .unwrap_or(&[])
    }
}

/// Step through `items` from `current`. An unknown `current` starts at the
/// first item.
fn cycle<T: PartialEq + Clone>(items: &[T], current: &T, delta: isize) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let len = items.len() as isize;
    let next = match items.iter().position(|item| item == current) {
        Some(idx) => (idx as isize + delta).rem_euclid(len),
        None => 0,
    };
    items.get(next as usize).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FuelType;
    use crate::io::ingest::{DatasetColumns, load_from_reader};
    use approx::assert_relative_eq;
    use chrono::Month;

    const CSV: &str = "Calendar Day,Metro Cities,Products,Retail Selling Price (Rs./Litre)\n\
                       2023-01-05,Delhi,Petrol,100\n\
                       2023-01-20,Delhi,Petrol,102\n\
                       2023-02-05,Delhi,Petrol,\n\
                       2022-12-05,Mumbai,Diesel,94.27\n\
                       2023-03-05,Chennai,Petrol,102.63\n";

    fn ready() -> DashboardState {
        let mut state = DashboardState::new();
        state.finish_loading(load_from_reader(CSV.as_bytes(), &DatasetColumns::default()));
        state
    }

    #[test]
    fn starts_loading() {
        let state = DashboardState::new();
        assert!(state.loading());
        assert!(state.error().is_none());
        assert!(!state.data_ready());
        assert!(!state.selection().has_city());
    }

    #[test]
    fn failed_load_is_terminal() {
        let mut state = DashboardState::new();
        state.finish_loading(Err(AppError::input("Failed to open CSV 'x.csv'")));
        assert!(!state.loading());
        assert_eq!(state.error(), Some("Failed to open CSV 'x.csv'"));
        assert!(!state.data_ready());

        state.finish_loading(load_from_reader(CSV.as_bytes(), &DatasetColumns::default()));
        assert!(state.error().is_some());
        assert!(state.records().is_empty());
    }

    #[test]
    fn empty_dataset_is_not_ready() {
        let mut state = DashboardState::new();
        let csv = "Calendar Day,Metro Cities,Products,Retail Selling Price (Rs./Litre)\n";
        state.finish_loading(load_from_reader(csv.as_bytes(), &DatasetColumns::default()));
        assert!(!state.loading());
        assert!(state.error().is_none());
        assert!(!state.data_ready());
        assert!(state.chart().is_empty());
    }

    #[test]
    fn ready_applies_defaults() {
        let state = ready();
        assert!(state.data_ready());
        assert_eq!(state.options().cities, ["Chennai", "Delhi", "Mumbai"]);
        assert_eq!(
            state.selection(),
            &Selection {
                city: "Chennai".into(),
                fuel_type: FuelType::Diesel,
                year: 2023,
            }
        );
    }

    #[test]
    fn chart_follows_selection() {
        let mut state = ready();
        assert!(state.chart().is_empty());

        state.set_selection(Selection {
            city: "Delhi".into(),
            fuel_type: FuelType::Petrol,
            year: 2023,
        });
        let points = state.chart().to_vec();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].month, Month::January);
        assert_relative_eq!(points[0].avg_price, 101.0);
        assert_eq!(points[1].month, Month::February);
        assert_relative_eq!(points[1].avg_price, 0.0);

        state.cycle_city(-1);
        assert_eq!(state.selection().city, "Chennai");
        assert_eq!(state.chart().len(), 1);
        state.cycle_city(1);
        assert_eq!(state.chart(), points.as_slice());
    }

    #[test]
    fn cycling_wraps() {
        let mut state = ready();
        state.cycle_city(1);
        assert_eq!(state.selection().city, "Delhi");
        state.cycle_city(-2);
        assert_eq!(state.selection().city, "Mumbai");

        state.cycle_fuel_type(1);
        assert_eq!(state.selection().fuel_type, FuelType::Petrol);

        state.cycle_year(1);
        assert_eq!(state.selection().year, 2022);
        state.cycle_year(1);
        assert_eq!(state.selection().year, 2023);
    }

    #[test]
    fn cycle_from_unknown_value_starts_at_first() {
        assert_eq!(cycle(&[1, 2, 3], &9, 1), Some(1));
        assert_eq!(cycle::<i32>(&[], &9, 1), None);
    }
}
