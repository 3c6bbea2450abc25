//! Simulated instrument: phantom, detector and rotation stage
//!
//! The detector forward-projects a deterministic synthetic phantom at the
//! rotation stage's current angle and returns a `1 x detector_width` image,
//! standing in for a real line detector. The stage simulates motor settle
//! time with a configurable dwell per move.

use crate::recon::algorithm::project;
use nalgebra::DMatrix;
use std::time::Duration;

/// Deterministic test object: two nested ellipses of different density on
/// an empty background.
pub fn ellipse_phantom(side: usize) -> DMatrix<f64> {
    let s = side as f64;
    let cx = (s - 1.0) / 2.0;
    let cy = (s - 1.0) / 2.0;

    DMatrix::from_fn(side, side, |r, c| {
        let x = (c as f64 - cx) / s;
        let y = (r as f64 - cy) / s;

        let outer = (x / 0.42).powi(2) + (y / 0.35).powi(2);
        let inner = ((x - 0.08) / 0.15).powi(2) + ((y + 0.05) / 0.20).powi(2);

        let mut v = 0.0;
        if outer <= 1.0 {
            v += 1.0;
        }
        if inner <= 1.0 {
            v += 0.8;
        }
        v
    })
}

/// Simulated rotation stage with per-move dwell
#[derive(Debug)]
pub struct RotationStage {
    angle: f64,
    dwell: Duration,
}

impl RotationStage {
    /// Create a stage at angle zero
    pub fn new(dwell: Duration) -> Self {
        Self { angle: 0.0, dwell }
    }

    /// Move to `angle` radians, blocking for the dwell time
    pub fn move_to(&mut self, angle: f64) {
        self.angle = angle;
        if !self.dwell.is_zero() {
            std::thread::sleep(self.dwell);
        }
    }

    /// Current angle, radians
    pub fn angle(&self) -> f64 {
        self.angle
    }
}

/// Simulated line detector over a fixed phantom
#[derive(Debug)]
pub struct SimDetector {
    phantom: DMatrix<f64>,
    width: usize,
}

impl SimDetector {
    /// Detector of `width` bins over a `phantom_size`-sided phantom
    pub fn new(phantom_size: usize, width: usize) -> Self {
        Self {
            phantom: ellipse_phantom(phantom_size),
            width,
        }
    }

    /// Number of detector bins
    pub fn width(&self) -> usize {
        self.width
    }

    /// Acquire one projection at the given angle, as a `1 x width` image
    pub fn read(&self, angle: f64) -> DMatrix<f64> {
        project(&self.phantom, angle, self.width)
    }
}
