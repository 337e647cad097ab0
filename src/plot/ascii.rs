//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (one bar per line), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Bars are scaled so the highest month fills `width` cells.

use crate::domain::ChartPoint;
use crate::report::NO_DATA_MESSAGE;

const BAR: char = '█';

/// Render a horizontal bar chart of monthly averages.
pub fn render_bar_chart(points: &[ChartPoint], width: usize) -> String {
    if points.is_empty() {
        return format!("{NO_DATA_MESSAGE}\n");
    }

    let width = width.max(10);
    let max = points.iter().map(|p| p.avg_price).fold(0.0_f64, f64::max);

    let mut out = String::new();
    for p in points {
        let len = bar_len(p.avg_price, max, width);
        out.push_str(&format!(
            "{} |{}{} {:.2}\n",
            p.short_label(),
            BAR.to_string().repeat(len),
            " ".repeat(width - len),
            p.avg_price
        ));
    }
    out
}

fn bar_len(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() {
        return 0;
    }
    let len = (value / max * width as f64).round() as usize;
    len.min(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    #[test]
    fn tallest_bar_fills_width() {
        let chart = render_bar_chart(
            &[
                ChartPoint {
                    month: Month::January,
                    avg_price: 50.0,
                },
                ChartPoint {
                    month: Month::February,
                    avg_price: 100.0,
                },
            ],
            20,
        );
        let lines: Vec<_> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches(BAR).count(), 10);
        assert_eq!(lines[1].matches(BAR).count(), 20);
        assert!(lines[1].starts_with("Feb |"));
        assert!(lines[1].ends_with("100.00"));
    }

    #[test]
    fn zero_prices_draw_no_bar() {
        let chart = render_bar_chart(
            &[ChartPoint {
                month: Month::May,
                avg_price: 0.0,
            }],
            20,
        );
        assert_eq!(chart.matches(BAR).count(), 0);
    }

    #[test]
    fn empty_series_says_no_data() {
        assert_eq!(render_bar_chart(&[], 40).trim(), NO_DATA_MESSAGE);
    }
}
