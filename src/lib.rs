//! # TomoVis-RS: Live Incremental Tomographic Reconstruction
//!
//! A real-time visualizer that reconstructs a 2-D tomographic image from a
//! live stream of projection measurements, one angle at a time, refreshing
//! the display after every measurement instead of waiting for the full
//! angular sweep.
//!
//! ## Architecture
//!
//! - **Engine**: drives a simulated rotation stage and line detector
//!   through an angular sweep in a separate thread, emitting one document
//!   per measurement
//! - **Recon core**: a fixed-size window of recent projections feeds a
//!   warm-start iterative reconstruction seeded with the previous estimate,
//!   so per-event cost stays bounded while quality improves as coverage
//!   accumulates
//! - **Frontend**: eframe/egui with egui_dock panes for the reconstruction,
//!   the sinogram, and the latest projection profile
//! - **Communication**: crossbeam channels between the engine thread and
//!   the UI
//!
//! ## Example
//!
//! ```ignore
//! use tomovis_rs::{
//!     config::{AppConfig, AppState},
//!     engine::ScanEngine,
//!     frontend::TomoVisApp,
//! };
//!
//! fn main() -> eframe::Result<()> {
//!     let app_state = AppState::load_or_default();
//!     let config = AppConfig::default();
//!
//!     let (engine, handle) = ScanEngine::new(config.scan.clone());
//!     std::thread::spawn(move || engine.run());
//!
//!     let native_options = eframe::NativeOptions::default();
//!     eframe::run_native(
//!         "TomoVis-RS",
//!         native_options,
//!         Box::new(|cc| {
//!             Ok(Box::new(TomoVisApp::new(
//!                 cc, handle, config, app_state, None,
//!             )?))
//!         }),
//!     )
//! }
//! ```

pub mod app;
pub mod config;
pub mod documents;
pub mod engine;
pub mod error;
pub mod frontend;
pub mod recon;
pub mod types;

// Re-export commonly used types
pub use app::TomoVisApp;
pub use config::{AppConfig, AppState, ProjectFile, ReconConfig, ScanConfig};
pub use documents::{Document, DocumentCallback, DocumentRouter, EventDocument, RunStart};
pub use engine::{EngineCommand, EngineHandle, EngineMessage, ScanEngine};
pub use error::{Result, TomoVisError};
pub use recon::{
    make_algorithm, ArtRecon, DisplaySink, LiveRecon, LiveSinogram, ProjectionWindow,
    ReconAlgorithm, ReconOptions, WindowView,
};
pub use types::{clim, ScanProgress, ScanState};
