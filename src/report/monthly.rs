//! Monthly average aggregation.

use chrono::Month;

use crate::domain::{ChartPoint, FuelPriceRecord, Selection};

/// Running sum and count for one calendar month.
#[derive(Debug, Clone, Copy, Default)]
struct MonthAccumulator {
    sum: f64,
    count: usize,
}

/// Mean RSP per month for the records matching `selection`.
///
/// Matching is exact on city, fuel type and year. Months without a matching
/// record are left out, so the result has at most 12 entries and is empty
/// when nothing matches. Output is in calendar order.
pub fn monthly_averages(records: &[FuelPriceRecord], selection: &Selection) -> Vec<ChartPoint> {
    let mut slots = [MonthAccumulator::default(); 12];

    for r in records.iter().filter(|r| selection.matches(r)) {
        let slot = &mut slots[month_index(r.month)];
        slot.sum += r.rsp;
        slot.count += 1;
    }

    slots
        .iter()
        .zip(calendar_months())
        .filter(|(slot, _)| slot.count > 0)
        .map(|(slot, month)| ChartPoint {
            month,
            avg_price: round_to_cents(slot.sum / slot.count as f64),
        })
        .collect()
}

/// Round to 2 decimals, ties away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn month_index(month: Month) -> usize {
    month.number_from_month() as usize - 1
}

fn calendar_months() -> impl Iterator<Item = Month> {
    std::iter::successors(Some(Month::January), |m| {
        (*m != Month::December).then(|| m.succ())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FuelType;
    use approx::assert_relative_eq;
    use chrono::{Datelike, NaiveDate};

    fn record(city: &str, fuel_type: FuelType, ymd: (i32, u32, u32), rsp: f64) -> FuelPriceRecord {
        let date = NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap();
        FuelPriceRecord {
            city: city.to_string(),
            fuel_type,
            year: date.year(),
            month: Month::try_from(date.month() as u8).unwrap(),
            date,
            rsp,
        }
    }

    fn selection(city: &str, fuel_type: FuelType, year: i32) -> Selection {
        Selection {
            city: city.to_string(),
            fuel_type,
            year,
        }
    }

    #[test]
    fn averages_one_month() {
        let records = vec![
            record("Delhi", FuelType::Petrol, (2023, 1, 1), 100.0),
            record("Delhi", FuelType::Petrol, (2023, 1, 2), 102.0),
        ];
        let points = monthly_averages(&records, &selection("Delhi", FuelType::Petrol, 2023));
        assert_eq!(
            points,
            [ChartPoint {
                month: Month::January,
                avg_price: 101.0,
            }]
        );
    }

    #[test]
    fn no_match_is_empty() {
        let records = vec![
            record("Delhi", FuelType::Petrol, (2023, 1, 1), 100.0),
            record("Delhi", FuelType::Petrol, (2023, 1, 2), 102.0),
        ];
        assert!(monthly_averages(&records, &selection("Mumbai", FuelType::Diesel, 2023)).is_empty());
        assert!(monthly_averages(&records, &selection("Delhi", FuelType::Petrol, 2022)).is_empty());
        assert!(monthly_averages(&records, &selection("delhi", FuelType::Petrol, 2023)).is_empty());
    }

    #[test]
    fn chronological_regardless_of_input_order() {
        let records = vec![
            record("Delhi", FuelType::Diesel, (2023, 11, 1), 90.0),
            record("Delhi", FuelType::Diesel, (2023, 2, 1), 88.0),
            record("Delhi", FuelType::Diesel, (2023, 7, 1), 89.0),
            record("Delhi", FuelType::Diesel, (2023, 2, 15), 88.5),
        ];
        let sel = selection("Delhi", FuelType::Diesel, 2023);
        let points = monthly_averages(&records, &sel);
        let months: Vec<_> = points.iter().map(|p| p.month).collect();
        assert_eq!(months, [Month::February, Month::July, Month::November]);

        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(points, monthly_averages(&reversed, &sel));
    }

    #[test]
    fn omits_empty_months_instead_of_zero_filling() {
        let records = vec![record("Delhi", FuelType::Petrol, (2023, 6, 1), 96.72)];
        let points = monthly_averages(&records, &selection("Delhi", FuelType::Petrol, 2023));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].month, Month::June);
    }

    #[test]
    fn full_year_has_twelve_points() {
        let records: Vec<_> = (1..=12)
            .map(|m| record("Delhi", FuelType::Petrol, (2023, m, 10), 90.0 + m as f64))
            .collect();
        let points = monthly_averages(&records, &selection("Delhi", FuelType::Petrol, 2023));
        assert_eq!(points.len(), 12);
        assert_eq!(points[0].month, Month::January);
        assert_eq!(points[11].month, Month::December);
        assert_relative_eq!(points[11].avg_price, 102.0);
    }

    #[test]
    fn zero_price_counts_toward_mean() {
        let records = vec![
            record("Delhi", FuelType::Petrol, (2023, 4, 1), 100.0),
            record("Delhi", FuelType::Petrol, (2023, 4, 2), 0.0),
        ];
        let points = monthly_averages(&records, &selection("Delhi", FuelType::Petrol, 2023));
        assert_relative_eq!(points[0].avg_price, 50.0);
    }

    #[test]
    fn mean_is_rounded_to_cents() {
        let records = vec![
            record("Delhi", FuelType::Petrol, (2023, 5, 1), 96.72),
            record("Delhi", FuelType::Petrol, (2023, 5, 2), 96.72),
            record("Delhi", FuelType::Petrol, (2023, 5, 3), 96.73),
        ];
        let points = monthly_averages(&records, &selection("Delhi", FuelType::Petrol, 2023));
        assert_relative_eq!(points[0].avg_price, 96.72);
    }

    #[test]
    fn rounding_rule() {
        assert_relative_eq!(round_to_cents(101.0), 101.0);
        assert_relative_eq!(round_to_cents(2.3449), 2.34);
        assert_relative_eq!(round_to_cents(0.125), 0.13);
        assert_relative_eq!(round_to_cents(1.0 / 3.0), 0.33);
    }

    #[test]
    fn calendar_months_has_twelve_in_order() {
        let months: Vec<_> = calendar_months().collect();
        assert_eq!(months.len(), 12);
        assert!(months.iter().enumerate().all(|(i, m)| month_index(*m) == i));
    }
}
