// Stormwatch - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Configuration loading and validation
// 4. Session restore
// 5. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use stormwatch::app;
pub use stormwatch::core;
pub use stormwatch::net;
pub use stormwatch::platform;
pub use stormwatch::ui;
pub use stormwatch::util;

use clap::Parser;
use std::path::PathBuf;
use stormwatch::core::model::DataSource;

/// Stormwatch - weather and disaster-alert dashboard.
///
/// Search a location to see current conditions, a 5-day forecast, and
/// overlaid disaster alerts, plus a delegated flood-severity estimate.
#[derive(Parser, Debug)]
#[command(name = "Stormwatch", version, about)]
struct Cli {
    /// Location to fetch on startup (overrides the restored session).
    location: Option<String>,

    /// Data source: fixtures, open-meteo, or openweather.
    #[arg(short = 's', long = "data-source")]
    data_source: Option<String>,

    /// Directory containing config.toml (default: the platform config dir).
    #[arg(long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load config first so the configured log
    // level can participate in logging initialisation.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| platform_paths.config_dir.clone());
    let (config, config_warnings) = platform::config::load_config(&config_dir);

    // Initialise logging subsystem
    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "Stormwatch starting"
    );

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config validation warning");
    }

    let dark_mode = config.dark_mode;
    let font_size = config.font_size;

    // Create application state
    let mut state = app::state::AppState::new(config, platform_paths.clone(), cli.debug);
    for warning in config_warnings {
        state.push_warning(warning);
    }

    // Restore the previous session, if any.
    let session_path = app::session::session_path(&platform_paths.data_dir);
    if let Some(session) = app::session::load(&session_path) {
        app::session::restore(&mut state, session);
    }

    // CLI overrides: data source, then startup location.
    if let Some(ref slug) = cli.data_source {
        match DataSource::parse(slug) {
            Some(source) => state.data_source = source,
            None => {
                tracing::warn!(
                    value = %slug,
                    "Unknown --data-source (expected fixtures, open-meteo, or openweather)"
                );
            }
        }
    }
    if let Some(ref location) = cli.location {
        state.query = location.clone();
        state.initial_fetch = Some(location.clone());
    }

    tracing::info!(source = state.data_source.slug(), "Ready to launch GUI");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([760.0, 500.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_style(&cc.egui_ctx, dark_mode, font_size);
            Ok(Box::new(gui::StormwatchApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch Stormwatch GUI: {e}");
        std::process::exit(1);
    }
}

/// Apply the configured theme and base font size to the egui context.
fn configure_style(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });

    // Scale every text style by the same factor the body size moved,
    // so headings keep their relative weight.
    let scale = font_size / util::constants::DEFAULT_FONT_SIZE;
    let mut style = (*ctx.style()).clone();
    for font_id in style.text_styles.values_mut() {
        font_id.size *= scale;
    }
    ctx.set_style(style);
}
