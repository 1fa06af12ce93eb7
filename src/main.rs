//! Commit Stats Chart - desktop viewer and PNG exporter
//!
//! Usage: commit_stats_chart [--data <series.json>] [--config <chart.json>]
//!                           [--export <out.png>] [--width <px>]

use anyhow::{bail, Context};
use commit_stats_chart::config::ChartConfig;
use commit_stats_chart::gui::{spawn_series_loader, CommitStatsApp, SeriesSource, APP_TITLE};
use commit_stats_chart::logging;
use commit_stats_chart::StaticChartRenderer;
use eframe::egui;
use std::path::PathBuf;

const DEFAULT_EXPORT_WIDTH: u32 = 480;
const USAGE: &str = "Usage: commit_stats_chart [--data <series.json>] [--config <chart.json>] \
                     [--export <out.png>] [--width <px>]";

#[derive(Debug, Default)]
struct Args {
    data: Option<PathBuf>,
    config: Option<PathBuf>,
    export: Option<PathBuf>,
    width: Option<u32>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .with_context(|| format!("missing value for {}", flag))
        };
        match flag.as_str() {
            "--data" => args.data = Some(PathBuf::from(value()?)),
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--export" => args.export = Some(PathBuf::from(value()?)),
            "--width" => {
                let raw = value()?;
                args.width = Some(raw.parse().with_context(|| format!("invalid width {}", raw))?);
            }
            other => bail!("unknown argument {}\n{}", other, USAGE),
        }
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let args = parse_args()?;
    let config = ChartConfig::resolve(args.config.as_deref()).context("loading chart config")?;
    let source = match args.data {
        Some(path) => SeriesSource::File(path),
        None => SeriesSource::Sample,
    };

    if let Some(out) = args.export {
        let series = source.load()?;
        let width = args.width.unwrap_or(DEFAULT_EXPORT_WIDTH);
        StaticChartRenderer::new(&config)
            .render_to_file(&series, width, &out)
            .with_context(|| format!("exporting chart to {}", out.display()))?;
        return Ok(());
    }

    let window_width = args.width.map(|w| w as f32).unwrap_or(520.0);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window_width, config.total_height() + 200.0])
            .with_min_inner_size([config.y_axis_text_width + 120.0, config.total_height() + 120.0])
            .with_title(APP_TITLE),
        ..Default::default()
    };

    let state_rx = spawn_series_loader(source);
    tracing::info!("starting commit stats viewer");

    // Run the application
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(CommitStatsApp::new(cc, config, state_rx)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {}", e))
}
