mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod state;
#[cfg(test)]
mod testlog;
mod ui;

use anyhow::Result;

use app::WindowSink;
use chart::sink::{ChartSink, PngSink};
use config::AppConfig;
use data::{filter, loader, report};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let config = AppConfig::default();
    let mut viewer = WindowSink::new(Some(config.chart_path.clone()));
    run(&config, &mut viewer)
}

/// Load → (filter → report) and load → chart. `viewer` receives the chart
/// after it has been saved as an image.
fn run(config: &AppConfig, viewer: &mut impl ChartSink) -> Result<()> {
    let Some(sales) = loader::load_sales(&config.input_path, &config.status_column) else {
        return Ok(());
    };

    let pending = filter::find_pending_payments(&sales, &config.status_column, &config.pending_status);
    report::write_report(pending.as_ref(), &config.report_path)?;

    let mut png = PngSink::new(&config.chart_path);
    chart::render_status_chart(
        Some(&sales),
        &config.status_column,
        &config.style,
        &mut [&mut png, viewer],
    )?;
    Ok(())
}
