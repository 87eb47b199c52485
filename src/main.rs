mod app;
mod chart;
mod config;
mod data;
mod state;
mod ui;

use anyhow::anyhow;
use app::InflationApp;
use config::ViewerConfig;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ViewerConfig::load()?;
    log::info!("Using data source {}", config.source.url);

    // Leave room for the top bar above the chart surface.
    let width = config.chart.width as f32 + 40.0;
    let height = config.chart.height as f32 + 120.0;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Inflation Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(InflationApp::new(&cc.egui_ctx, config)))),
    )
    .map_err(|e| anyhow!("running viewer: {e}"))
}
