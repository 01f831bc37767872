mod app;
mod color;
mod ui;

use anyhow::{Context, Result};
use app::LaunchDashApp;
use eframe::egui;
use launch_dash::binding::Dashboard;
use launch_dash::config::DashConfig;
use launch_dash::data::loader::load_file;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashConfig::from_env();
    run(config).inspect_err(|e| log::error!("{e:#}"))
}

fn run(config: DashConfig) -> Result<()> {
    let dataset = load_file(&config.dataset_path)
        .with_context(|| format!("loading dataset {}", config.dataset_path.display()))?;
    let dashboard = Dashboard::new(dataset).context("computing initial views")?;

    if config.headless {
        let output = serde_json::json!({
            "proportion_chart_spec": dashboard.proportion(),
            "scatter_chart_spec": dashboard.scatter(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(dashboard, config.slider)))),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}
