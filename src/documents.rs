//! Run documents and the callback subscription model
//!
//! The scan engine describes a run as an ordered document stream: one
//! [`RunStart`] followed by N [`EventDocument`]s with 1-based, strictly
//! increasing sequence numbers. Consumers implement [`DocumentCallback`] and
//! register with a [`DocumentRouter`], which fans every document out to all
//! subscribers.
//!
//! Subscribers are independent: a failure in one (for example, the
//! reconstruction routine rejecting a geometry) is logged and surfaced to the
//! caller, but never prevents the remaining subscribers from seeing the same
//! document.

use crate::config::ScanConfig;
use crate::error::{Result, TomoVisError};
use nalgebra::DMatrix;

/// Document marking the start of a new session.
///
/// Receiving this discards all accumulator and buffer state from any prior
/// session.
#[derive(Debug, Clone)]
pub struct RunStart {
    /// Monotonically increasing run identifier within this process
    pub run_id: u64,
    /// Wall-clock time the sweep started
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// The sweep parameters this run was started with
    pub scan: ScanConfig,
}

/// One measurement of the angular sweep
#[derive(Debug, Clone)]
pub struct EventDocument {
    /// 1-based sequence number, strictly increasing by 1 within a run
    pub seq_num: u64,
    /// Detector image, `detector_rows x detector_width` (here `1 x W`)
    pub projection: DMatrix<f64>,
    /// Projection angle, radians
    pub angle: f64,
}

impl EventDocument {
    /// 0-based sequence index used for ring-buffer slot arithmetic.
    ///
    /// `seq_num` is 1-based by contract; a malformed zero saturates to
    /// index 0 instead of underflowing, and the window's monotonicity
    /// check rejects it downstream.
    pub fn seq_index(&self) -> usize {
        self.seq_num.saturating_sub(1) as usize
    }

    /// The central detector row used for reconstruction, as a `1 x W` matrix
    pub fn detector_row(&self) -> DMatrix<f64> {
        DMatrix::from_fn(1, self.projection.ncols(), |_, c| self.projection[(0, c)])
    }
}

/// A document emitted by the scan engine
#[derive(Debug, Clone)]
pub enum Document {
    /// Session start
    Start(RunStart),
    /// One measurement
    Event(EventDocument),
}

/// A consumer of the document stream
pub trait DocumentCallback: Send {
    /// Name used in error logs
    fn name(&self) -> &'static str;

    /// A new session started; reset all per-session state
    fn on_start(&mut self, doc: &RunStart);

    /// Handle one measurement
    fn on_event(&mut self, doc: &EventDocument) -> Result<()>;
}

/// Fans documents out to registered subscribers
#[derive(Default)]
pub struct DocumentRouter {
    subscribers: Vec<Box<dyn DocumentCallback>>,
}

impl DocumentRouter {
    /// Create an empty router
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber
    pub fn subscribe(&mut self, callback: Box<dyn DocumentCallback>) {
        self.subscribers.push(callback);
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver a document to every subscriber.
    ///
    /// Every subscriber sees the document even when an earlier one fails;
    /// the first error is returned after delivery completes.
    pub fn dispatch(&mut self, doc: &Document) -> Result<()> {
        match doc {
            Document::Start(start) => {
                for sub in &mut self.subscribers {
                    sub.on_start(start);
                }
                Ok(())
            }
            Document::Event(event) => {
                let mut first_error: Option<TomoVisError> = None;
                for sub in &mut self.subscribers {
                    if let Err(e) = sub.on_event(event) {
                        tracing::error!(
                            "Subscriber '{}' failed on event {}: {}",
                            sub.name(),
                            event.seq_num,
                            e
                        );
                        if first_error.is_none() {
                            first_error = Some(e);
                        }
                    }
                }
                match first_error {
                    Some(e) => Err(e),
                    None => Ok(()),
                }
            }
        }
    }
}
