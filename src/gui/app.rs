//! Order Dashboard Main Application
//! Main window with the control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::data::OrderTable;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::pipeline::{build_view, ViewOptions};
use egui::SidePanel;
use std::path::Path;
use tracing::{info, warn};

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    /// Loaded once at startup and only ever read.
    table: OrderTable,
    options: ViewOptions,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig, table: OrderTable) -> Self {
        let mut app = Self::with_table(config, table);

        if let Some(logo_path) = &app.config.logo_path {
            match Self::load_logo(&cc.egui_ctx, logo_path) {
                Ok(texture) => app.control_panel.logo = Some(texture),
                Err(e) => warn!(path = %logo_path.display(), error = %e, "could not load logo"),
            }
        }
        app
    }

    /// Window state without any egui resources, showing the full date span.
    fn with_table(config: DashboardConfig, table: OrderTable) -> Self {
        let mut control_panel = ControlPanel::new(table.delivered_date_bounds());
        control_panel.rows_loaded = table.len();
        control_panel.skipped_rows = table.skipped_rows();

        let mut app = Self {
            options: ViewOptions::from(&config),
            config,
            table,
            control_panel,
            chart_viewer: ChartViewer::new(),
        };
        app.handle_range_changed();
        app
    }

    fn load_logo(
        ctx: &egui::Context,
        path: &Path,
    ) -> Result<egui::TextureHandle, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let size = [img.width() as usize, img.height() as usize];
        let pixels = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
        Ok(ctx.load_texture("logo", pixels, egui::TextureOptions::default()))
    }

    /// Rebuild the view for the current selection. An invalid selection
    /// leaves the previous charts in place.
    fn handle_range_changed(&mut self) {
        let Some((start, end)) = self.control_panel.selected_dates() else {
            self.control_panel.set_status("No data loaded");
            return;
        };

        match build_view(&self.table, start, end, self.options) {
            Ok(view) => {
                self.control_panel.orders_in_range = view.distinct_orders;
                self.control_panel
                    .set_status(&format!("Showing {} to {}", view.range.start, view.range.end));
                self.control_panel.export_enabled = true;
                self.chart_viewer.set_view(view);
            }
            Err(e) => {
                warn!(error = %e, "rejected date selection");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Handle PNG export - ask for a path, render, then open the file
    fn handle_export_png(&mut self) {
        let Some(view) = &self.chart_viewer.view else {
            self.control_panel.set_status("No charts to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("order_dashboard.png")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match StaticChartRenderer::render_png(
            view,
            &output_path,
            self.config.export_width,
            self.config.export_height,
        ) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                if let Err(e) = open::that(&output_path) {
                    info!(error = %e, "could not open exported image");
                }
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::RangeChanged => self.handle_range_changed(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{date, record};
    use pretty_assertions::assert_eq;

    fn app() -> DashboardApp {
        let table = OrderTable::from_records(vec![
            record("A1", "SP", "2018-01-10", "2018-01-08"),
            record("A2", "RJ", "2018-01-12", "2018-01-10"),
            record("A3", "SP", "2018-01-12", "2018-01-15"),
        ]);
        DashboardApp::with_table(DashboardConfig::default(), table)
    }

    #[test]
    fn starts_on_full_span() {
        let app = app();
        let view = app.chart_viewer.view.as_ref().unwrap();
        assert_eq!(view.range.start, date("2018-01-08"));
        assert_eq!(view.range.end, date("2018-01-15"));
        assert_eq!(app.control_panel.orders_in_range, 3);
        assert_eq!(app.control_panel.rows_loaded, 3);
        assert!(app.control_panel.export_enabled);
    }

    #[test]
    fn narrowing_the_range_replaces_the_view() {
        let mut app = app();
        app.control_panel.start_offset = 2;
        app.control_panel.end_offset = 2;
        app.handle_range_changed();

        let view = app.chart_viewer.view.as_ref().unwrap();
        assert_eq!(view.range.start, date("2018-01-10"));
        assert_eq!(view.orders.len(), 1);
        assert_eq!(app.control_panel.orders_in_range, 1);
        assert_eq!(app.control_panel.status, "Showing 2018-01-10 to 2018-01-10");
    }

    #[test]
    fn inverted_range_keeps_previous_view() {
        let mut app = app();
        app.control_panel.start_offset = 2;
        app.control_panel.end_offset = 7;
        app.handle_range_changed();
        let before = app.chart_viewer.view.as_ref().unwrap().range;

        app.control_panel.start_offset = 7;
        app.control_panel.end_offset = 0;
        app.handle_range_changed();

        assert!(app.control_panel.status.starts_with("Error:"));
        assert_eq!(app.chart_viewer.view.as_ref().unwrap().range, before);
        assert_eq!(app.control_panel.orders_in_range, 2);
    }

    #[test]
    fn empty_dataset_has_nothing_to_show() {
        let app = DashboardApp::with_table(DashboardConfig::default(), OrderTable::default());
        assert!(app.chart_viewer.view.is_none());
        assert_eq!(app.control_panel.status, "No data loaded");
        assert!(!app.control_panel.export_enabled);
    }
}
