mod app;
mod chart;
mod cli;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Result;
use app::LaunchDashApp;
use clap::Parser;
use eframe::egui;

use crate::cli::Args;
use crate::config::DashConfig;
use crate::data::filter::SiteFilter;
use crate::data::loader::initial_dataset;
use crate::state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = DashConfig::load(args.config.as_deref())?;
    let mut state = AppState::new(config.clone());

    // The data file is read once here; a bad file is fatal.
    let explicit = args.data_path.is_some();
    let data_path = args.data_path.unwrap_or_else(|| config.data_path.clone());
    if let Some(dataset) = initial_dataset(&data_path, explicit)? {
        state.set_dataset(dataset);
        state.set_site(SiteFilter::parse(&args.site));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
