#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use log::info;

use timeline_planner::app::PlannerApp;
use timeline_planner::config::PlannerSettings;
use timeline_planner::model::{Granularity, TimelineViewport};
use timeline_planner::{io, logging};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GranularityArg {
    Week,
    Month,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Week => Granularity::Week,
            GranularityArg::Month => Granularity::Month,
        }
    }
}

/// Interactive resource-planning timeline.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON task list (a project document or a bare array of tasks).
    #[arg(long)]
    tasks: Option<PathBuf>,

    /// First day of the initial window (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Paging unit; defaults to the settings file.
    #[arg(long, value_enum)]
    granularity: Option<GranularityArg>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Settings file; defaults to the OS config directory.
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings_path = cli.settings.clone().unwrap_or_else(PlannerSettings::default_path);
    let settings = PlannerSettings::load(&settings_path);

    let level = cli
        .log_level
        .clone()
        .or_else(|| settings.as_ref().ok().and_then(|s| s.log_level.clone()))
        .unwrap_or_else(|| logging::default_log_level().to_string());
    let _logger = logging::init_logging(&level).context("initializing logging")?;

    // Logged only now that the logger is running.
    let settings = settings.unwrap_or_else(|e| {
        log::warn!("{e}; falling back to default settings");
        PlannerSettings::default()
    });

    let anchor = cli.start.unwrap_or_else(|| chrono::Local::now().date_naive());
    let project = match &cli.tasks {
        Some(path) => io::load_project(path)
            .with_context(|| format!("loading tasks from {}", path.display()))?,
        None => PlannerApp::sample_project(anchor),
    };
    info!("loaded project {:?} with {} tasks", project.name, project.tasks.len());

    let granularity = cli.granularity.map(Granularity::from).unwrap_or(settings.granularity);
    let mut viewport = TimelineViewport::for_granularity(anchor, granularity);
    viewport.pixels_per_day = settings.day_width;
    if cli.tasks.is_some() && cli.start.is_none() {
        if let Some(fitted) = viewport.fit_to_tasks(&project.tasks, settings.fit_padding_days) {
            viewport = fitted;
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Timeline Planner"),
        ..Default::default()
    };

    eframe::run_native(
        "Timeline Planner",
        options,
        Box::new(move |_cc| Ok(Box::new(PlannerApp::new(project, viewport, settings)))),
    )
    .map_err(|e| anyhow!("running the UI: {e}"))
}
