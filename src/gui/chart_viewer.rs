//! Chart Viewer Widget
//! Central scrollable area with the delivery histogram and the paired state charts.

use crate::charts::ChartPlotter;
use crate::pipeline::DashboardView;
use crate::stats::DeliverySummary;
use egui::{RichText, ScrollArea};

/// Holds the last successfully built view.
#[derive(Default)]
pub struct ChartViewer {
    pub view: Option<DashboardView>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_view(&mut self, view: DashboardView) {
        self.view = Some(view);
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(view) = &self.view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new("Dashboard of E-Commerce Public ✨").size(26.0));
                ui.label(
                    RichText::new(format!("{} to {}", view.range.start, view.range.end)).weak(),
                );
                ui.add_space(12.0);

                ui.label(
                    RichText::new("Distribution of Order Delivery Time")
                        .size(18.0)
                        .strong(),
                );
                ui.label(Self::summary_line(&view.distribution.summary));
                ui.add_space(6.0);
                ChartPlotter::draw_delivery_histogram(ui, &view.distribution);

                ui.add_space(18.0);
                ui.label(
                    RichText::new("Most and Least Order by Customer State")
                        .size(18.0)
                        .strong(),
                );
                ui.add_space(6.0);

                ui.columns(2, |cols| {
                    cols[0].vertical_centered(|ui| {
                        ui.label(RichText::new("Most Order Customers").size(15.0).strong());
                    });
                    ChartPlotter::draw_state_bars(
                        &mut cols[0],
                        "most_orders",
                        &view.most_orders,
                        false,
                    );

                    cols[1].vertical_centered(|ui| {
                        ui.label(RichText::new("Least Order Customers").size(15.0).strong());
                    });
                    ChartPlotter::draw_state_bars(
                        &mut cols[1],
                        "least_orders",
                        &view.least_orders,
                        true,
                    );
                });
            });
    }

    fn summary_line(summary: &DeliverySummary) -> String {
        if summary.orders == 0 {
            return "No orders delivered in the selected range".to_string();
        }
        format!(
            "{} rows · mean {:.1} d · median {:.1} d · std {:.1} d · on time {:.1}%",
            summary.orders,
            summary.mean,
            summary.median,
            summary.std_dev,
            summary.on_time_share * 100.0
        )
    }
}
