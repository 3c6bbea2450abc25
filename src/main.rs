//! TomoVis-RS - Main Entry Point
//!
//! Live incremental tomographic reconstruction: a simulated instrument
//! sweeps through projection angles in a background thread while the UI
//! reconstructs and displays the image after every measurement.

use tomovis_rs::{
    config::{AppConfig, AppState, ProjectFile},
    engine::ScanEngine,
    frontend::TomoVisApp,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tomovis_rs=trace")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TomoVis-RS");

    // Load application state (last project, preferences)
    let app_state = AppState::load_or_default();

    // Try to load the last project, or use defaults
    let (config, project_path) = if let Some(last_path) = app_state.last_project.clone() {
        tracing::info!("Restoring last project from {:?}", last_path);
        match ProjectFile::load(&last_path) {
            Ok(project) => (project.config, Some(last_path)),
            Err(e) => {
                tracing::warn!("Failed to load last project: {}", e);
                (AppConfig::default(), None)
            }
        }
    } else {
        (AppConfig::default(), None)
    };

    // Spawn the scan engine thread
    let (engine, handle) = ScanEngine::new(config.scan.clone());
    let engine_thread = std::thread::spawn(move || engine.run());

    // Configure eframe options
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("TomoVis-RS"),
        ..Default::default()
    };

    // Run the eframe application
    let result = eframe::run_native(
        "TomoVis-RS",
        native_options,
        Box::new(|cc| {
            if app_state.ui_preferences.dark_mode {
                cc.egui_ctx.set_visuals(egui::Visuals::dark());
            } else {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
            }

            Ok(Box::new(TomoVisApp::new(
                cc,
                handle,
                config,
                app_state,
                project_path,
            )?))
        }),
    );

    tracing::info!("Shutting down...");
    let _ = engine_thread.join();

    result.map_err(|e| anyhow::anyhow!("UI event loop terminated abnormally: {e}"))?;
    Ok(())
}
