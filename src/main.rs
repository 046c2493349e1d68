//! Cricket Insights - Match Performance and Analysis Dashboard
//!
//! A Rust application for exploring cricket match results through canned charts.

use anyhow::Context;
use cricket_insights::config::{AppConfig, CONFIG_FILE};
use cricket_insights::gui::CricketApp;
use eframe::egui;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_or_default(Path::new(CONFIG_FILE))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();
    log::info!(
        "Starting with dataset {} (config: {})",
        config.dataset_path.display(),
        if Path::new(CONFIG_FILE).exists() { CONFIG_FILE } else { "defaults" }
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title("Cricket Match Analysis"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Cricket Match Analysis",
        options,
        Box::new(|cc| Ok(Box::new(CricketApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("window closed with an error")
}
