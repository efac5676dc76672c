mod app;
mod color;
mod config;
mod data;
mod report;
mod state;
mod ui;

use anyhow::Context;
use app::DashboardApp;
use crate::config::AppConfig;
use eframe::egui;
use state::DashboardState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::load()
        .context("loading configuration")?
        .with_args(std::env::args().skip(1));

    let mut state = DashboardState::new(&config);
    if config.dataset_path.exists() {
        let dataset = data::loader::load_file(&config.dataset_path)
            .with_context(|| format!("loading {}", config.dataset_path.display()))?;
        log::info!(
            "Loaded {} records, {} product lines from {}",
            dataset.len(),
            dataset.unique_values(data::model::PRODUCT_LINE).len(),
            config.dataset_path.display()
        );
        state.set_dataset(dataset);
    } else {
        log::warn!(
            "Dataset {} not found; starting empty (File → Open… to load one)",
            config.dataset_path.display()
        );
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&config.window_title)
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        &config.window_title,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
