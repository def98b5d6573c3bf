mod app;
mod cli;
mod color;
mod data;
mod error;
mod state;
mod ui;

use anyhow::anyhow;
use app::RunplotApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    log::debug!("{args:?}");

    // Load before opening any window so bad input never leaves a half-drawn figure.
    let state = AppState::from_request(args.into_request())?;
    let title = format!("runplot – {}", state.summary());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(RunplotApp::new(state)))),
    )
    .map_err(|e| anyhow!("display failed: {e}"))
}
