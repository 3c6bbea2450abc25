//! Shared display state between the document callbacks and the panes
//!
//! The reconstruction and sinogram callbacks emit frames through
//! [`FrameSink`]s that store the latest `(frame, clim)` pair into a
//! [`SharedFrame`]. Panes snapshot the slot each frame and re-upload their
//! texture only when the revision changed, so display updates stay cheap no
//! matter how often the sinks fire.

use crate::recon::DisplaySink;
use nalgebra::DMatrix;
use std::sync::{Arc, Mutex};

/// The latest frame emitted by one callback
#[derive(Debug, Clone)]
pub struct DisplayFrame {
    /// Pixel data
    pub image: DMatrix<f64>,
    /// Color-scale bounds for exactly this image
    pub clim: (f64, f64),
    /// Bumped on every emit
    pub revision: u64,
}

#[derive(Debug, Default)]
struct FrameSlot {
    frame: Option<DisplayFrame>,
    revision: u64,
}

/// Single-slot latest-frame store shared between a sink and a pane
#[derive(Debug, Clone, Default)]
pub struct SharedFrame {
    inner: Arc<Mutex<FrameSlot>>,
}

impl SharedFrame {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored frame
    pub fn set(&self, image: DMatrix<f64>, clim: (f64, f64)) {
        if let Ok(mut slot) = self.inner.lock() {
            slot.revision += 1;
            let revision = slot.revision;
            slot.frame = Some(DisplayFrame {
                image,
                clim,
                revision,
            });
        }
    }

    /// Clone the current frame, if any
    pub fn snapshot(&self) -> Option<DisplayFrame> {
        self.inner.lock().ok()?.frame.clone()
    }

    /// Revision of the stored frame (0 when empty)
    pub fn revision(&self) -> u64 {
        self.inner.lock().map(|slot| slot.revision).unwrap_or(0)
    }
}

/// Display sink that stores frames into a [`SharedFrame`]
pub struct FrameSink {
    shared: SharedFrame,
}

impl FrameSink {
    /// Sink writing into `shared`
    pub fn new(shared: SharedFrame) -> Self {
        Self { shared }
    }
}

impl DisplaySink for FrameSink {
    fn display(&mut self, frame: &DMatrix<f64>, clim: (f64, f64)) {
        self.shared.set(frame.clone(), clim);
    }
}
