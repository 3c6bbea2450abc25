//! Incremental reconstruction core
//!
//! Three pieces, all driven by the document stream:
//!
//! - [`ProjectionWindow`] - bounded ring of the most recent projections
//! - [`LiveRecon`] - warm-start reconstruction seeded with its previous
//!   output, emitting an updated image plus color-scale bounds per event
//! - [`LiveSinogram`] - append-only angle-vs-detector diagnostic image
//!
//! Frames leave the core through the [`DisplaySink`] trait: fire-and-forget
//! `display(frame, clim)` calls that must stay cheap at event rate.

pub mod algorithm;
pub mod live;
pub mod sinogram;
pub mod window;

pub use algorithm::{make_algorithm, ArtRecon, ReconAlgorithm, ReconOptions};
pub use live::{LiveRecon, SMALL};
pub use sinogram::LiveSinogram;
pub use window::{ProjectionWindow, WindowView};

use nalgebra::DMatrix;
use std::sync::{Arc, Mutex};

/// Receives display frames from the core.
///
/// Calls are fire-and-forget: no return value, tolerant of high frequency,
/// and must not accumulate unbounded work per call.
pub trait DisplaySink: Send {
    /// Show `frame` with the given color-scale bounds
    fn display(&mut self, frame: &DMatrix<f64>, clim: (f64, f64));
}

/// Sink that discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn display(&mut self, _frame: &DMatrix<f64>, _clim: (f64, f64)) {}
}

/// Sink that records every emitted `(frame, clim)` pair, for tests and
/// headless runs
pub struct RecordingSink {
    frames: Arc<Mutex<Vec<(DMatrix<f64>, (f64, f64))>>>,
}

impl RecordingSink {
    /// Record into the shared vector
    pub fn new(frames: Arc<Mutex<Vec<(DMatrix<f64>, (f64, f64))>>>) -> Self {
        Self { frames }
    }
}

impl DisplaySink for RecordingSink {
    fn display(&mut self, frame: &DMatrix<f64>, clim: (f64, f64)) {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push((frame.clone(), clim));
        }
    }
}
