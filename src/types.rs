//! Core data types shared between the scan engine and the frontend
//!
//! The pixel container everywhere is [`nalgebra::DMatrix<f64>`]: a
//! reconstruction is a `height x width` matrix, a projection is a
//! `1 x detector_width` row, and the sinogram is a `1 x n_events` row that
//! grows with the scan.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Current state of the scan engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// No scan running
    #[default]
    Idle,
    /// Sweep in progress
    Scanning,
    /// Sweep finished, all events delivered
    Complete,
    /// Scan aborted due to an error
    Failed,
}

impl ScanState {
    /// Whether a sweep is currently producing events
    pub fn is_scanning(&self) -> bool {
        matches!(self, ScanState::Scanning)
    }

    /// Display name for the status bar
    pub fn display_name(&self) -> &'static str {
        match self {
            ScanState::Idle => "Idle",
            ScanState::Scanning => "Scanning",
            ScanState::Complete => "Complete",
            ScanState::Failed => "Failed",
        }
    }
}

/// Progress of the current angular sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanProgress {
    /// Events emitted so far (1-based, equals the latest sequence number)
    pub current: u64,
    /// Total events the sweep will emit
    pub total: u64,
    /// Angle of the most recent measurement, radians
    pub angle: f64,
}

impl ScanProgress {
    /// Fraction complete in `[0, 1]`
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64) as f32
        }
    }
}

/// Compute display color-scale bounds as `(min, max)` over every element
/// of `frame`.
///
/// The bounds always describe the exact matrix they are emitted with, so a
/// degenerate `(v, v)` pair is possible for a constant frame and must be
/// tolerated by sinks.
pub fn clim(frame: &DMatrix<f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in frame.iter() {
        min = min.min(v);
        max = max.max(v);
    }
    if min > max {
        // Empty frame; callers never emit one, but keep the pair ordered.
        (0.0, 0.0)
    } else {
        (min, max)
    }
}
