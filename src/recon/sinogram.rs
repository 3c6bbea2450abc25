//! Live sinogram accumulation
//!
//! Builds the raw angle-vs-detector-position diagnostic image one scalar at
//! a time, independent of reconstruction. Only the first scalar of each
//! detector reading is retained, matching the one-row-per-angle sinogram
//! convention of the display; the emitted frame is the transposed cache, so
//! the sequence-number axis runs horizontally.

use crate::documents::{DocumentCallback, EventDocument, RunStart};
use crate::error::Result;
use crate::recon::DisplaySink;
use nalgebra::DMatrix;

/// Sinogram accumulator subscribed to the document stream
pub struct LiveSinogram {
    /// Nominal detector-position axis extent, for display only
    width: usize,
    /// One scalar per event this session, append-only
    cache: Vec<f64>,
    /// Where updated frames are emitted
    sink: Box<dyn DisplaySink>,
}

impl LiveSinogram {
    /// Create an accumulator with the given nominal detector width
    pub fn new(width: usize, sink: Box<dyn DisplaySink>) -> Self {
        Self {
            width,
            cache: Vec::new(),
            sink,
        }
    }

    /// Nominal detector-position extent
    pub fn width(&self) -> usize {
        self.width
    }

    /// Scalars accumulated this session
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether nothing has been accumulated yet
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl DocumentCallback for LiveSinogram {
    fn name(&self) -> &'static str {
        "live_sinogram"
    }

    fn on_start(&mut self, _doc: &RunStart) {
        self.cache.clear();
    }

    fn on_event(&mut self, doc: &EventDocument) -> Result<()> {
        self.cache.push(doc.projection[(0, 0)]);

        // Transposed cache: sequence axis horizontal
        let frame = DMatrix::from_row_slice(1, self.cache.len(), &self.cache);
        let bounds = crate::types::clim(&frame);
        self.sink.display(&frame, bounds);
        Ok(())
    }
}
