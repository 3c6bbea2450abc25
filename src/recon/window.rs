//! Windowed reconstruction buffer
//!
//! A fixed-capacity ring of `(projection, angle)` pairs indexed by sequence
//! number modulo window size. Each [`ProjectionWindow::put`] returns the
//! `min(s + 1, window_size)` most recent entries in chronological order,
//! un-wrapping the ring so that the projection/angle correspondence the
//! reconstruction routine sees is always oldest-to-newest.
//!
//! Slots are overwritten silently when a new event maps to an occupied
//! index; the previous occupant is permanently discarded.

use crate::error::{Result, TomoVisError};
use nalgebra::DMatrix;

/// The chronological working set handed to the reconstruction routine
#[derive(Debug, Clone)]
pub struct WindowView {
    /// Projections, oldest first
    pub projections: Vec<DMatrix<f64>>,
    /// Angles in the same order as `projections`
    pub angles: Vec<f64>,
}

impl WindowView {
    /// Number of entries in the view
    pub fn len(&self) -> usize {
        self.projections.len()
    }

    /// Whether the view is empty (never true for a view returned by `put`)
    pub fn is_empty(&self) -> bool {
        self.projections.is_empty()
    }
}

/// Fixed-capacity ring buffer over the most recent projections
#[derive(Debug)]
pub struct ProjectionWindow {
    /// One slot per ring position; `None` until first written this session
    slots: Vec<Option<DMatrix<f64>>>,
    /// Angle per ring position; a neutral default until first written
    angles: Vec<f64>,
    /// Events observed this session
    count: usize,
    /// Ring capacity
    window_size: usize,
}

impl ProjectionWindow {
    /// Create a window holding at most `window_size` projections
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(TomoVisError::Config(
                "window_size must be positive".to_string(),
            ));
        }
        Ok(Self {
            slots: vec![None; window_size],
            angles: vec![0.0; window_size],
            count: 0,
            window_size,
        })
    }

    /// Ring capacity
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Events observed this session
    pub fn count(&self) -> usize {
        self.count
    }

    /// Clear all slots and the event count; called once per session start
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        for angle in &mut self.angles {
            *angle = 0.0;
        }
        self.count = 0;
    }

    /// Store `(projection, angle)` for the 0-based `sequence_index` and
    /// return the chronological view of the window.
    ///
    /// `sequence_index` must be exactly one greater than the previous call's
    /// within a session (starting at 0); a gap or duplicate is a caller
    /// error and fatal to the session.
    pub fn put(
        &mut self,
        sequence_index: usize,
        projection: DMatrix<f64>,
        angle: f64,
    ) -> Result<WindowView> {
        if sequence_index != self.count {
            return Err(TomoVisError::SequenceOrder {
                expected: self.count,
                got: sequence_index,
            });
        }

        let slot = sequence_index % self.window_size;
        self.slots[slot] = Some(projection);
        self.angles[slot] = angle;
        self.count = sequence_index + 1;

        // Un-wrap the ring: walk original sequence indices ascending, so
        // slots beyond the current count are never touched even though the
        // backing arrays always have window_size entries.
        let len = self.count.min(self.window_size);
        let oldest = self.count - len;

        let mut projections = Vec::with_capacity(len);
        let mut angles = Vec::with_capacity(len);
        for seq in oldest..self.count {
            let s = seq % self.window_size;
            let proj = self.slots[s].as_ref().ok_or_else(|| {
                // Unreachable given the monotonicity check above.
                TomoVisError::SequenceOrder {
                    expected: self.count,
                    got: seq,
                }
            })?;
            projections.push(proj.clone());
            angles.push(self.angles[s]);
        }

        Ok(WindowView {
            projections,
            angles,
        })
    }
}
