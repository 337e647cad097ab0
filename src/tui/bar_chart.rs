//! Plotters-powered monthly bar chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.
//! Bars sit at fixed calendar slots (0 = January), so months without data show
//! up as gaps rather than shifting the remaining bars left.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::ChartPoint;

/// Half the bar width, in calendar-slot units.
const BAR_HALF_WIDTH: f64 = 0.35;

/// A render-only chart description; all data is prepared by the caller.
pub struct MonthlyBarChart<'a> {
    pub points: &'a [ChartPoint],
    /// Upper bound of the price axis.
    pub y_max: f64,
    pub y_label: &'a str,
}

impl<'a> MonthlyBarChart<'a> {
    pub fn new(points: &'a [ChartPoint], y_label: &'a str) -> Self {
        Self {
            points,
            y_max: y_axis_max(points),
            y_label,
        }
    }
}

impl<'a> Widget for MonthlyBarChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let y_max = self.y_max;
        if !y_max.is_finite() || y_max <= 0.0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 7)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(-0.5_f64..11.5_f64, 0.0_f64..y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .y_desc(self.y_label)
                .x_labels(12)
                .y_labels(5)
                .x_label_formatter(&|v| slot_label(*v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let bar_color = RGBColor(0, 255, 255);
            chart.draw_series(self.points.iter().map(|p| {
                let x = slot(p);
                Rectangle::new(
                    [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, p.avg_price)],
                    ShapeStyle::from(&bar_color).filled(),
                )
            }))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Headroom of 10% above the tallest bar; `1.0` when there is nothing to show.
pub fn y_axis_max(points: &[ChartPoint]) -> f64 {
    let max = points.iter().map(|p| p.avg_price).fold(0.0_f64, f64::max);
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

fn slot(point: &ChartPoint) -> f64 {
    f64::from(point.month.number_from_month() - 1)
}

/// Month abbreviation for integral slots, blank in between.
fn slot_label(v: f64) -> String {
    let rounded = v.round();
    if (v - rounded).abs() > 1e-6 || !(0.0..12.0).contains(&rounded) {
        return String::new();
    }
    let Ok(month) = chrono::Month::try_from(rounded as u8 + 1) else {
        return String::new();
    };
    month.name()[..3].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    #[test]
    fn labels_only_on_month_slots() {
        assert_eq!(slot_label(0.0), "Jan");
        assert_eq!(slot_label(11.0), "Dec");
        assert_eq!(slot_label(0.5), "");
        assert_eq!(slot_label(-1.0), "");
        assert_eq!(slot_label(12.0), "");
    }

    #[test]
    fn axis_has_headroom() {
        let points = [ChartPoint {
            month: Month::April,
            avg_price: 100.0,
        }];
        assert!((y_axis_max(&points) - 110.0).abs() < 1e-9);
        assert_eq!(y_axis_max(&[]), 1.0);
        assert_eq!(slot(&points[0]), 3.0);
    }
}
