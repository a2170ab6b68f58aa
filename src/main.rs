//! Order Dashboard - E-Commerce Delivery Time & Customer State Viewer
//!
//! Loads a flat order dataset once, then lets the user slice it by delivery
//! date and inspect delivery times and order counts per customer state.

mod charts;
mod config;
mod data;
mod gui;
mod logging;
mod pipeline;
mod stats;

use anyhow::{anyhow, Context};
use config::DashboardConfig;
use data::DataLoader;
use eframe::egui;
use gui::DashboardApp;
use tracing::error;

fn main() -> anyhow::Result<()> {
    logging::init();

    let config = DashboardConfig::load().context("failed to load dashboard config")?;

    // The dashboard cannot run without its dataset.
    let table = DataLoader::load_csv(&config.data_path)
        .inspect_err(|e| {
            error!(path = %config.data_path.display(), error = %e, "failed to load dataset")
        })
        .with_context(|| format!("failed to load dataset {}", config.data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Order Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Order Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config, table)))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}
