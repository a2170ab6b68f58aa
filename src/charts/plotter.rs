//! Chart Plotter Module
//! Interactive delivery-time histogram and state bar charts using egui_plot.

use crate::stats::{DeliveryDistribution, StateCount};
use egui::Color32;
use egui_plot::{Bar, BarChart, GridMark, HPlacement, Line, Plot, PlotPoints};

/// Histogram bars.
pub const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(135, 206, 235); // Sky blue
/// Density curve over the histogram.
pub const DENSITY_COLOR: Color32 = Color32::from_rgb(70, 130, 180); // Steel blue
/// Leading bar of each state chart.
pub const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(114, 188, 212); // #72BCD4
/// Remaining bars of each state chart.
pub const MUTED_COLOR: Color32 = Color32::from_rgb(211, 211, 211); // #D3D3D3

const BAR_THICKNESS: f64 = 0.7;

/// Creates the dashboard's interactive charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Bar color for the `rank`-th state (0 = leading bar).
    pub fn bar_color(rank: usize) -> Color32 {
        if rank == 0 {
            HIGHLIGHT_COLOR
        } else {
            MUTED_COLOR
        }
    }

    /// Draw the delivery-time histogram with its density overlay.
    pub fn draw_delivery_histogram(ui: &mut egui::Ui, distribution: &DeliveryDistribution) {
        let bars: Vec<Bar> = distribution
            .bins
            .iter()
            .map(|bin| {
                Bar::new(bin.center(), bin.count as f64)
                    .width(bin.width())
                    .fill(HISTOGRAM_COLOR)
                    .stroke(egui::Stroke::new(1.0, Color32::WHITE))
                    .name(format!("{:.1} .. {:.1} days", bin.start, bin.end))
            })
            .collect();

        Plot::new("delivery_time_histogram")
            .height(320.0)
            .allow_scroll(false)
            .include_y(0.0)
            .y_axis_label("Number of Orders")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(HISTOGRAM_COLOR).name("Orders"));

                if !distribution.density.is_empty() {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(distribution.density.iter().copied()))
                            .color(DENSITY_COLOR)
                            .width(2.0)
                            .name("Density"),
                    );
                }
            });
    }

    /// Draw a horizontal bar chart of state order counts, first entry on top.
    ///
    /// `mirrored` grows the bars to the left and moves state labels to the
    /// right-hand side, so two charts can sit back to back.
    pub fn draw_state_bars(ui: &mut egui::Ui, id: &str, counts: &[StateCount], mirrored: bool) {
        let n = counts.len();
        let y_labels: Vec<String> = counts.iter().map(|c| c.customer_state.clone()).collect();
        let sign = if mirrored { -1.0 } else { 1.0 };

        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(rank, c)| {
                Bar::new(Self::row_position(rank, n), sign * c.order_count as f64)
                    .width(BAR_THICKNESS)
                    .fill(Self::bar_color(rank))
                    .name(&c.customer_state)
            })
            .collect();

        let mut plot = Plot::new(id.to_string())
            .height(360.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(0.0)
            .show_grid([true, false])
            .y_grid_spacer(move |_input| {
                (0..n)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_axis_formatter(move |mark, _range| {
                let pos = mark.value.round();
                if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
                    return String::new();
                }
                let rank = n.checked_sub(1 + pos as usize);
                rank.and_then(|r| y_labels.get(r).cloned())
                    .unwrap_or_default()
            })
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value.abs()))
            .label_formatter(move |name, value| {
                if name.is_empty() {
                    String::new()
                } else {
                    format!("{}: {:.0} orders", name, value.x.abs())
                }
            });

        if mirrored {
            plot = plot.y_axis_position(HPlacement::Right);
        }

        plot.show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
    }

    /// Vertical slot for the `rank`-th bar; rank 0 sits at the top.
    fn row_position(rank: usize, n: usize) -> f64 {
        (n - 1 - rank) as f64
    }
}
