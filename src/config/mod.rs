//! Configuration module for TomoVis-RS
//!
//! This module handles application configuration including:
//! - Scan parameters (angular sweep, simulated detector)
//! - Reconstruction parameters (grid size, window size, algorithm)
//! - Application state persistence (last project, UI preferences)
//! - Project files (.tomoproj) saved as TOML
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.tomovis.tomovis-rs/`
//! - **macOS**: `~/Library/Application Support/dev.tomovis.tomovis-rs/`
//! - **Windows**: `%APPDATA%\dev.tomovis.tomovis-rs\`
//!
//! # Validation
//!
//! [`ReconConfig::validate`] and [`ScanConfig::validate`] run before any
//! session starts; a zero window size, grid dimension or angle count is a
//! configuration error, never a runtime surprise.

use crate::error::{Result, TomoVisError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.tomovis.tomovis-rs";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// Project file extension
pub const PROJECT_FILE_EXTENSION: &str = "tomoproj";

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists and return its path
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir()
        .ok_or_else(|| TomoVisError::Config("Could not determine data directory".to_string()))?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn app_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(APP_STATE_FILE))
}

/// Parameters of the simulated angular sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Number of projection angles in the sweep
    pub num_angles: usize,
    /// First angle of the sweep, radians
    pub start_angle: f64,
    /// Last angle of the sweep, radians (inclusive)
    pub stop_angle: f64,
    /// Simulated motor settle time per step, milliseconds
    pub dwell_ms: u64,
    /// Side length of the synthetic phantom, pixels
    pub phantom_size: usize,
    /// Number of detector bins per projection row
    pub detector_width: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            num_angles: 100,
            start_angle: 0.0,
            stop_angle: std::f64::consts::PI,
            dwell_ms: 10,
            phantom_size: 64,
            detector_width: 94,
        }
    }
}

impl ScanConfig {
    /// Validate the scan parameters
    pub fn validate(&self) -> Result<()> {
        if self.num_angles == 0 {
            return Err(TomoVisError::Config(
                "num_angles must be positive".to_string(),
            ));
        }
        if self.phantom_size == 0 {
            return Err(TomoVisError::Config(
                "phantom_size must be positive".to_string(),
            ));
        }
        if self.detector_width == 0 {
            return Err(TomoVisError::Config(
                "detector_width must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// The evenly spaced angles of the sweep, endpoints inclusive
    pub fn angles(&self) -> Vec<f64> {
        if self.num_angles == 1 {
            return vec![self.start_angle];
        }
        let step = (self.stop_angle - self.start_angle) / (self.num_angles as f64 - 1.0);
        (0..self.num_angles)
            .map(|i| self.start_angle + i as f64 * step)
            .collect()
    }
}

/// Parameters of the incremental reconstructor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconConfig {
    /// Reconstruction grid width, pixels
    pub width: usize,
    /// Reconstruction grid height, pixels
    pub height: usize,
    /// Number of most-recent projections fed to each reconstruction pass
    pub window_size: usize,
    /// Iterations of the numerical routine per event
    pub num_iter: usize,
    /// Named algorithm choice, passed through to the routine factory
    pub algorithm: String,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            window_size: 16,
            num_iter: 2,
            algorithm: "art".to_string(),
        }
    }
}

impl ReconConfig {
    /// Validate the reconstruction parameters.
    ///
    /// Raised at construction time, before any session starts.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(TomoVisError::Config(
                "window_size must be positive".to_string(),
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(TomoVisError::Config(
                "reconstruction grid dimensions must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Angular sweep and detector parameters
    pub scan: ScanConfig,
    /// Incremental reconstruction parameters
    pub recon: ReconConfig,
}

impl AppConfig {
    /// Validate all sections
    pub fn validate(&self) -> Result<()> {
        self.scan.validate()?;
        self.recon.validate()
    }
}

/// A saved project file (TOML)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectFile {
    /// The configuration stored in the project
    pub config: AppConfig,
}

impl ProjectFile {
    /// Load a project file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| TomoVisError::Config(format!("Failed to read project file: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| TomoVisError::Config(format!("Failed to parse project file: {}", e)))
    }

    /// Save a project file to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TomoVisError::Serialization(e.to_string()))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| TomoVisError::Config(format!("Failed to write project file: {}", e)))
    }
}

/// UI preferences persisted across sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Use the dark egui theme
    pub dark_mode: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

/// Persistent application state (not project data)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
    /// Path of the most recently opened project, if any
    pub last_project: Option<PathBuf>,
    /// UI preferences
    pub ui_preferences: UiPreferences,
}

impl AppState {
    /// Load app state from the default location
    pub fn load() -> Result<Self> {
        let path = app_state_path().ok_or_else(|| {
            TomoVisError::Config("Could not determine app state path".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| TomoVisError::Config(format!("Failed to read app state: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| TomoVisError::Config(format!("Failed to parse app state: {}", e)))
    }

    /// Load app state, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load app state, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save app state to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        let path = dir.join(APP_STATE_FILE);

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| TomoVisError::Serialization(e.to_string()))?;

        std::fs::write(&path, content)
            .map_err(|e| TomoVisError::Config(format!("Failed to write app state: {}", e)))
    }

    /// Record the most recently opened project
    pub fn set_last_project(&mut self, path: impl AsRef<Path>) {
        self.last_project = Some(path.as_ref().to_path_buf());
    }
}
