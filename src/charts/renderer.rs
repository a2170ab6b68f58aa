//! Static Chart Renderer
//! Writes the dashboard charts to a PNG with plotters.
//!
//! Layout:
//! 1. Top half: "Distribution of Order Delivery Time" histogram with density line
//! 2. Bottom half, side by side:
//!    - Left: "Most Order Customers" horizontal bars
//!    - Right: "Least Order Customers" mirrored horizontal bars

use crate::pipeline::DashboardView;
use crate::stats::{DeliveryDistribution, StateCount};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);
const HIGHLIGHT: RGBColor = RGBColor(114, 188, 212);
const MUTED: RGBColor = RGBColor(211, 211, 211);

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the three dashboard charts into a PNG at `path`.
    pub fn render_png(
        view: &DashboardView,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        Self::draw_dashboard(&root, view).map_err(|e| RenderError::Draw(e.to_string()))?;
        root.present()
            .map_err(|e| RenderError::Draw(e.to_string()))?;

        info!(path = %path.display(), width, height, "exported dashboard image");
        Ok(())
    }

    fn draw_dashboard<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        view: &DashboardView,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let (_, height) = root.dim_in_pixel();
        let title = format!(
            "Dashboard of E-Commerce Public ({} to {})",
            view.range.start, view.range.end
        );
        let body = root.titled(&title, (FONT, 40))?;

        let (top, bottom) = body.split_vertically(height / 2);
        Self::draw_histogram(&top, &view.distribution)?;

        let halves = bottom.split_evenly((1, 2));
        Self::draw_state_bars(&halves[0], "Most Order Customers", &view.most_orders, false)?;
        Self::draw_state_bars(&halves[1], "Least Order Customers", &view.least_orders, true)?;
        Ok(())
    }

    fn draw_histogram<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        distribution: &DeliveryDistribution,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let (x_min, x_max) = match (distribution.bins.first(), distribution.bins.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => (0.0, 1.0),
        };
        let y_max = distribution
            .bins
            .iter()
            .map(|b| b.count as f64)
            .chain(distribution.density.iter().map(|p| p[1]))
            .fold(1.0_f64, f64::max)
            * 1.1;

        let mut chart = ChartBuilder::on(area)
            .caption("Distribution of Order Delivery Time", (FONT, 32))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc("Number of Orders")
            .label_style((FONT, 18))
            .draw()?;

        chart.draw_series(distribution.bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.start, 0.0), (bin.end, bin.count as f64)],
                SKY_BLUE.filled(),
            )
        }))?;
        chart.draw_series(distribution.bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.start, 0.0), (bin.end, bin.count as f64)],
                WHITE.stroke_width(1),
            )
        }))?;

        if !distribution.density.is_empty() {
            chart.draw_series(LineSeries::new(
                distribution.density.iter().map(|p| (p[0], p[1])),
                STEEL_BLUE.stroke_width(3),
            ))?;
        }

        Ok(())
    }

    fn draw_state_bars<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        caption: &str,
        counts: &[StateCount],
        mirrored: bool,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let n = counts.len();
        let max_count = counts
            .iter()
            .map(|c| c.order_count as f64)
            .fold(1.0_f64, f64::max)
            * 1.05;
        let (x_range, sign) = if mirrored {
            (-max_count..0.0, -1.0)
        } else {
            (0.0..max_count, 1.0)
        };
        let y_range = -0.5..(n.max(1) as f64 - 0.5);

        let mut builder = ChartBuilder::on(area);
        builder
            .caption(caption, (FONT, 32))
            .margin(20)
            .x_label_area_size(40);
        if mirrored {
            builder.set_label_area_size(LabelAreaPosition::Right, 60);
        } else {
            builder.set_label_area_size(LabelAreaPosition::Left, 60);
        }
        let mut chart = builder.build_cartesian_2d(x_range, y_range)?;

        let label_for = |y: &f64| Self::state_label(counts, *y);

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n.max(1))
            .y_label_formatter(&label_for)
            .x_label_formatter(&|x: &f64| format!("{:.0}", x.abs()))
            .label_style((FONT, 18))
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(rank, c)| {
            let y = (n - 1 - rank) as f64;
            let color = if rank == 0 { HIGHLIGHT } else { MUTED };
            Rectangle::new(
                [(0.0, y - 0.35), (sign * c.order_count as f64, y + 0.35)],
                color.filled(),
            )
        }))?;

        Ok(())
    }

    /// State name for the bar slot at `y`; blank between slots.
    fn state_label(counts: &[StateCount], y: f64) -> String {
        let n = counts.len();
        let pos = y.round();
        if (y - pos).abs() > 1e-6 || pos < 0.0 || pos as usize >= n {
            return String::new();
        }
        counts[n - 1 - pos as usize].customer_state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(state: &str, n: u64) -> StateCount {
        StateCount {
            customer_state: state.to_string(),
            order_count: n,
        }
    }

    #[test]
    fn labels_follow_bar_slots_top_down() {
        let counts = vec![count("SP", 40), count("RJ", 12), count("MG", 9)];

        assert_eq!(StaticChartRenderer::state_label(&counts, 2.0), "SP");
        assert_eq!(StaticChartRenderer::state_label(&counts, 1.0), "RJ");
        assert_eq!(StaticChartRenderer::state_label(&counts, 0.0), "MG");
    }

    #[test]
    fn labels_are_blank_off_slot() {
        let counts = vec![count("SP", 40), count("RJ", 12)];

        assert_eq!(StaticChartRenderer::state_label(&counts, 0.5), "");
        assert_eq!(StaticChartRenderer::state_label(&counts, -1.0), "");
        assert_eq!(StaticChartRenderer::state_label(&counts, 2.0), "");
        assert_eq!(StaticChartRenderer::state_label(&[], 0.0), "");
    }
}
