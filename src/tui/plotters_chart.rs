//! Plotters-powered comparison chart widgets for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart`/`BarChart` widgets?
//! - grouped bars and multi-series lines share one coordinate system
//! - less manual work for ticks/labels
//! - easy to extend later (annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
// `ratatui::style::Color` shadows the Plotters colour trait pulled in by the prelude.
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::{Location, Month};

/// Prior-year series colour (light blue).
pub const PRIOR_COLOR: RGBColor = RGBColor(135, 206, 235);
/// Current-year series colour (blue).
pub const CURRENT_COLOR: RGBColor = RGBColor(30, 90, 255);
/// Saguaçu series colours (green / light green).
pub const CURRENT_ALT_COLOR: RGBColor = RGBColor(0, 200, 0);
pub const PRIOR_ALT_COLOR: RGBColor = RGBColor(144, 238, 144);

/// Price line colours for a location as `(current year, prior year)`.
pub fn location_colors(location: Location) -> (RGBColor, RGBColor) {
    match location {
        Location::Joinville => (CURRENT_COLOR, PRIOR_COLOR),
        Location::Saguacu => (CURRENT_ALT_COLOR, PRIOR_ALT_COLOR),
    }
}

/// Convert a Plotters colour for use in Ratatui legends.
pub fn to_ratatui(color: RGBColor) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

/// Grouped bar chart: units sold per month, prior year next to current year.
pub struct UnitsBarChart<'a> {
    pub months: &'a [Month],
    pub prior: &'a [u32],
    pub current: &'a [u32],
    /// Upper bound of the y axis (units).
    pub y_max: f64,
}

impl<'a> Widget for UnitsBarChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !fits(area, buf) {
            return;
        }

        let n = self.months.len();
        if n == 0 || !(self.y_max.is_finite() && self.y_max > 0.0) {
            return;
        }
        let x0 = -0.5;
        let x1 = n as f64 - 0.5;
        let y_max = self.y_max;
        let width = 0.35;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(x0..x1, 0.0..y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(n)
                .y_labels(5)
                .x_label_formatter(&|v| month_tick(self.months, *v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Prior year on the left half of each slot, current year on the right.
            chart.draw_series(self.prior.iter().enumerate().map(|(i, &v)| {
                let x = i as f64;
                Rectangle::new([(x - width, 0.0), (x, f64::from(v))], PRIOR_COLOR.filled())
            }))?;
            chart.draw_series(self.current.iter().enumerate().map(|(i, &v)| {
                let x = i as f64;
                Rectangle::new([(x, 0.0), (x + width, f64::from(v))], CURRENT_COLOR.filled())
            }))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// One line of the price chart.
pub struct PriceLine<'a> {
    pub values: &'a [f64],
    pub color: RGBColor,
}

/// Multi-line chart: price per m² by month for both locations and both years.
pub struct PriceLineChart<'a> {
    pub months: &'a [Month],
    pub lines: Vec<PriceLine<'a>>,
    pub y_bounds: [f64; 2],
}

impl<'a> Widget for PriceLineChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !fits(area, buf) {
            return;
        }

        let n = self.months.len();
        let [y0, y1] = self.y_bounds;
        if n < 2 || !(y0.is_finite() && y1.is_finite()) || y1 <= y0 {
            return;
        }
        let x1 = (n - 1) as f64;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 7)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(0.0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(n)
                .y_labels(5)
                .x_label_formatter(&|v| month_tick(self.months, *v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for line in &self.lines {
                let points = line.values.iter().enumerate().map(|(i, &y)| (i as f64, y));
                chart.draw_series(LineSeries::new(points, &line.color))?;

                // Markers as colored pixels; circle radii are mis-scaled by the
                // ratatui backend.
                chart.draw_series(
                    line.values
                        .iter()
                        .enumerate()
                        .map(|(i, &y)| Pixel::new((i as f64, y), line.color)),
                )?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Pad y bounds so the extreme points do not sit on the frame.
pub fn padded_bounds(lo: f64, hi: f64) -> [f64; 2] {
    if !(lo.is_finite() && hi.is_finite()) || hi < lo {
        return [0.0, 1.0];
    }
    let pad = ((hi - lo).abs() * 0.05).max(1.0);
    [lo - pad, hi + pad]
}

/// Label for an x tick: the month at an integer position, blank elsewhere.
fn month_tick(months: &[Month], v: f64) -> String {
    let rounded = v.round();
    if (v - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    months
        .get(rounded as usize)
        .map(|m| m.label().to_string())
        .unwrap_or_default()
}

/// When the available area is too small, Plotters may fail to build a chart.
/// In that case, we render a small hint rather than panicking.
fn fits(area: Rect, buf: &mut Buffer) -> bool {
    if area.width < 20 || area.height < 8 {
        buf.set_string(
            area.x,
            area.y,
            "Área do gráfico pequena demais (redimensione o terminal).",
            Style::default().fg(Color::Yellow),
        );
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_ticks_only_on_integers() {
        let months = Month::ALL;
        assert_eq!(month_tick(&months, 0.0), "Jan");
        assert_eq!(month_tick(&months, 6.0), "Jul");
        assert_eq!(month_tick(&months, 2.5), "");
        assert_eq!(month_tick(&months, 7.0), "");
        assert_eq!(month_tick(&months, -1.0), "");
    }

    #[test]
    fn bounds_are_padded() {
        let [lo, hi] = padded_bounds(6800.0, 10800.0);
        assert!(lo < 6800.0 && hi > 10800.0);
        assert_eq!(padded_bounds(f64::NAN, 1.0), [0.0, 1.0]);
    }

    #[test]
    fn locations_have_distinct_colors() {
        let [a, b] = Location::ALL.map(location_colors);
        assert_eq!(a, (CURRENT_COLOR, PRIOR_COLOR));
        assert_ne!(a.0, b.0);
        assert_ne!(a.1, b.1);
    }
}
