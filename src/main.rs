mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::LaunchboardApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("launch_records.csv"));

    // A load failure is fatal: no window is ever shown for a dataset that
    // did not parse completely.
    let dataset = match data::loader::load_file(&path) {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("failed to load launch records from {}: {e:#}", path.display());
            std::process::exit(1);
        }
    };
    log::info!(
        "loaded {} launch records from {} ({} sites)",
        dataset.len(),
        path.display(),
        dataset.sites.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchboardApp::new(AppState::new(dataset))))),
    )
}
