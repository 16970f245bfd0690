use std::path::PathBuf;

use air_quality_dashboard::app::AirQualityApp;
use air_quality_dashboard::config::{
    PresentationPolicy, DATA_ENV, DEFAULT_DATA_FILE, DEFAULT_POLICY_FILE, POLICY_ENV,
};
use air_quality_dashboard::state::AppState;
use air_quality_dashboard::ui::panels;
use eframe::egui;

/// First CLI argument, then `AIR_QUALITY_DATA`, then `main_data.csv`.
fn data_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(DATA_ENV))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}

fn policy_path() -> PathBuf {
    std::env::var_os(POLICY_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_POLICY_FILE))
}

fn main() -> eframe::Result {
    env_logger::init();

    let policy = PresentationPolicy::load_or_default(&policy_path());
    let mut state = AppState::new(policy);

    let path = data_path();
    if path.exists() {
        panels::load_into(&mut state, &path);
    } else {
        log::warn!("Data file {} not found; use File → Open", path.display());
        state.status_message = Some(format!("No data file at {}", path.display()));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Air Quality Dashboard",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(AirQualityApp::new(state)))
        }),
    )
}
