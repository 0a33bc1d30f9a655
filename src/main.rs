mod app;
mod color;
mod config;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;

use app::BikeDashboardApp;
use bike_rental_dashboard::data::loader::load_source;
use bike_rental_dashboard::data::summarize_range;
use bike_rental_dashboard::report::{render_json, render_text};
use config::{Cli, ReportFormat};
use state::AppState;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.default_log_filter()),
    )
    .init();

    // Any load failure ends the session here; nothing renders on partial data.
    let dataset = load_source(&cli.source)
        .with_context(|| format!("could not load rental data from {}", cli.source))?;
    let range = cli.initial_range(&dataset)?;

    if let Some(format) = cli.report {
        let Some(range) = range else {
            println!("No rows loaded from {}", cli.source);
            return Ok(());
        };
        let summary = summarize_range(&dataset, &range);
        match format {
            ReportFormat::Text => print!("{}", render_text(&range, &summary)),
            ReportFormat::Json => println!("{}", render_json(&range, &summary)?),
        }
        return Ok(());
    }

    let state = AppState::new(cli.source, dataset, range);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Sharing Dashboard",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can fetch and render the logo.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(BikeDashboardApp::new(state)))
        }),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}
