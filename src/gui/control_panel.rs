//! Control Panel Widget
//! Left side panel with the logo, date-range selector and export controls.

use crate::data::DateRange;
use chrono::{Duration, NaiveDate};
use egui::{Color32, RichText};

/// Left side control panel.
pub struct ControlPanel {
    /// Full delivery-date span of the dataset; `None` when nothing loaded.
    pub bounds: Option<DateRange>,
    /// Selected start, as days after `bounds.start`.
    pub start_offset: i64,
    /// Selected end, as days after `bounds.start`.
    pub end_offset: i64,
    pub logo: Option<egui::TextureHandle>,
    pub rows_loaded: usize,
    pub skipped_rows: usize,
    pub orders_in_range: usize,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            bounds: None,
            start_offset: 0,
            end_offset: 0,
            logo: None,
            rows_loaded: 0,
            skipped_rows: 0,
            orders_in_range: 0,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new(bounds: Option<DateRange>) -> Self {
        let mut panel = Self {
            bounds,
            ..Self::default()
        };
        panel.reset_range();
        panel
    }

    /// Select the whole dataset span.
    pub fn reset_range(&mut self) {
        self.start_offset = 0;
        self.end_offset = self.bounds.map(|b| b.span_days() - 1).unwrap_or(0);
    }

    /// Currently selected `(start, end)`; may be inverted, the pipeline rejects that.
    pub fn selected_dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        let bounds = self.bounds?;
        Some((
            bounds.start + Duration::days(self.start_offset),
            bounds.start + Duration::days(self.end_offset),
        ))
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            if let Some(logo) = &self.logo {
                ui.add(egui::Image::new(logo).max_width(220.0));
            } else {
                ui.label(
                    RichText::new("🛒 Order Dashboard")
                        .size(22.0)
                        .color(Color32::from_rgb(114, 188, 212)),
                );
            }
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Date Range Section =====
        ui.label(RichText::new("📅 Date Range").size(14.0).strong());
        ui.add_space(5.0);

        match self.bounds {
            Some(bounds) => {
                let last = bounds.span_days() - 1;
                let day_label = move |v: f64| (bounds.start + Duration::days(v as i64)).to_string();

                let start_changed = ui
                    .add(
                        egui::Slider::new(&mut self.start_offset, 0..=last)
                            .text("Start")
                            .custom_formatter(move |v, _| day_label(v)),
                    )
                    .changed();
                let end_changed = ui
                    .add(
                        egui::Slider::new(&mut self.end_offset, 0..=last)
                            .text("End")
                            .custom_formatter(move |v, _| day_label(v)),
                    )
                    .changed();

                if start_changed || end_changed {
                    action = ControlPanelAction::RangeChanged;
                }

                ui.add_space(5.0);
                if ui.small_button("Full Range").clicked() {
                    self.reset_range();
                    action = ControlPanelAction::RangeChanged;
                }
            }
            None => {
                ui.label(RichText::new("No delivery dates loaded").color(Color32::GRAY));
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Dataset Section =====
        ui.label(RichText::new("📁 Dataset").size(14.0).strong());
        ui.add_space(5.0);

        egui::Grid::new("dataset_summary")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label("Rows loaded:");
                ui.label(self.rows_loaded.to_string());
                ui.end_row();
                ui.label("Rows skipped:");
                ui.label(self.skipped_rows.to_string());
                ui.end_row();
                ui.label("Orders in range:");
                ui.label(self.orders_in_range.to_string());
                ui.end_row();
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    RangeChanged,
    ExportPng,
}
