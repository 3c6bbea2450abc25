//! Incremental warm-start reconstruction
//!
//! [`LiveRecon`] keeps a running best-estimate image and refines it on every
//! event: the windowed projections are handed to the numerical routine with
//! the *previous* estimate as seed, never a fresh zero or random guess. The
//! seed carries information forward from projections that have already aged
//! out of the window, which is what keeps per-event cost bounded without
//! restarting reconstruction from scratch as history grows.
//!
//! A failed reconstruction leaves the previous estimate in place; the error
//! propagates to the caller with no retry.

use crate::documents::{DocumentCallback, EventDocument, RunStart};
use crate::error::Result;
use crate::recon::algorithm::{ReconAlgorithm, ReconOptions};
use crate::recon::window::ProjectionWindow;
use crate::recon::DisplaySink;
use crate::types::clim;
use nalgebra::DMatrix;

/// Floor value the estimate is reset to on session start.
///
/// Strictly positive so the iterative routine never receives a degenerate
/// all-zero seed.
pub const SMALL: f64 = 1e-6;

/// Incremental reconstructor subscribed to the document stream
pub struct LiveRecon {
    /// Target image width, pixels
    width: usize,
    /// Target image height, pixels
    height: usize,
    /// Options passed through verbatim to the routine
    options: ReconOptions,
    /// Bounded history of recent projections
    window: ProjectionWindow,
    /// The opaque numerical routine
    algorithm: Box<dyn ReconAlgorithm>,
    /// Current best-estimate image, seeded into every reconstruction call
    partial: DMatrix<f64>,
    /// Where updated frames are emitted
    sink: Box<dyn DisplaySink>,
}

impl LiveRecon {
    /// Create a reconstructor for a `width x height` image over a window of
    /// `window_size` projections.
    ///
    /// Grid resolution in `options` defaults to `width`/`height` via
    /// [`ReconOptions::for_grid`] at the call sites; it is passed through
    /// here untouched.
    pub fn new(
        width: usize,
        height: usize,
        window_size: usize,
        options: ReconOptions,
        algorithm: Box<dyn ReconAlgorithm>,
        sink: Box<dyn DisplaySink>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(crate::error::TomoVisError::Config(
                "reconstruction grid dimensions must be positive".to_string(),
            ));
        }
        let window = ProjectionWindow::new(window_size)?;
        Ok(Self {
            width,
            height,
            options,
            window,
            algorithm,
            partial: DMatrix::from_element(height, width, SMALL),
            sink,
        })
    }

    /// The current best-estimate image
    pub fn partial(&self) -> &DMatrix<f64> {
        &self.partial
    }
}

impl DocumentCallback for LiveRecon {
    fn name(&self) -> &'static str {
        "live_recon"
    }

    fn on_start(&mut self, doc: &RunStart) {
        tracing::debug!("Resetting reconstruction for run {}", doc.run_id);
        self.partial = DMatrix::from_element(self.height, self.width, SMALL);
        self.window.reset();
    }

    fn on_event(&mut self, doc: &EventDocument) -> Result<()> {
        let view = self
            .window
            .put(doc.seq_index(), doc.detector_row(), doc.angle)?;

        let updated = self.algorithm.reconstruct(
            &view.projections,
            &view.angles,
            &self.options,
            &self.partial,
        )?;
        self.partial = updated;

        let bounds = clim(&self.partial);
        self.sink.display(&self.partial, bounds);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Document;
    use crate::recon::algorithm::MockReconAlgorithm;
    use crate::recon::NullSink;

    fn event(seq_num: u64, angle: f64) -> EventDocument {
        EventDocument {
            seq_num,
            projection: DMatrix::from_element(1, 8, seq_num as f64),
            angle,
        }
    }

    fn start_doc() -> RunStart {
        RunStart {
            run_id: 1,
            started_at: chrono::Utc::now(),
            scan: crate::config::ScanConfig::default(),
        }
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        let mock = MockReconAlgorithm::new();
        let result = LiveRecon::new(
            0,
            4,
            2,
            ReconOptions::for_grid(0, 4),
            Box::new(mock),
            Box::new(NullSink),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_starts_at_floor() {
        let mock = MockReconAlgorithm::new();
        let recon = LiveRecon::new(
            4,
            3,
            2,
            ReconOptions::for_grid(4, 3),
            Box::new(mock),
            Box::new(NullSink),
        )
        .unwrap();
        assert_eq!(recon.partial().shape(), (3, 4));
        assert!(recon.partial().iter().all(|&v| v == SMALL));
    }

    #[test]
    fn test_event_seeds_with_previous_partial() {
        let mut mock = MockReconAlgorithm::new();
        // Return the seed plus one so each call's seed is checkable
        mock.expect_reconstruct()
            .returning(|_, _, _, init| Ok(init.map(|v| v + 1.0)));

        let mut recon = LiveRecon::new(
            4,
            4,
            3,
            ReconOptions::for_grid(4, 4),
            Box::new(mock),
            Box::new(NullSink),
        )
        .unwrap();

        recon.on_start(&start_doc());
        recon.on_event(&event(1, 0.0)).unwrap();
        assert!(recon.partial().iter().all(|&v| v == SMALL + 1.0));
        recon.on_event(&event(2, 0.1)).unwrap();
        assert!(recon.partial().iter().all(|&v| v == SMALL + 2.0));
    }

    #[test]
    fn test_failure_retains_previous_estimate() {
        let mut mock = MockReconAlgorithm::new();
        let mut call = 0u32;
        mock.expect_reconstruct().returning(move |_, _, _, init| {
            call += 1;
            if call == 2 {
                Err(crate::error::TomoVisError::Reconstruction(
                    "singular geometry".to_string(),
                ))
            } else {
                Ok(init.map(|v| v + 1.0))
            }
        });

        let mut recon = LiveRecon::new(
            4,
            4,
            3,
            ReconOptions::for_grid(4, 4),
            Box::new(mock),
            Box::new(NullSink),
        )
        .unwrap();

        recon.on_start(&start_doc());
        recon.on_event(&event(1, 0.0)).unwrap();
        let before = recon.partial().clone();

        assert!(recon.on_event(&event(2, 0.1)).is_err());
        assert_eq!(recon.partial(), &before);
    }

    #[test]
    fn test_session_restart_resets_window_sequence() {
        let mut mock = MockReconAlgorithm::new();
        mock.expect_reconstruct()
            .returning(|_, _, _, init| Ok(init.clone()));

        let mut recon = LiveRecon::new(
            4,
            4,
            2,
            ReconOptions::for_grid(4, 4),
            Box::new(mock),
            Box::new(NullSink),
        )
        .unwrap();

        recon.on_start(&start_doc());
        recon.on_event(&event(1, 0.0)).unwrap();
        recon.on_event(&event(2, 0.1)).unwrap();

        // New session: sequence numbers restart at 1
        recon.on_start(&start_doc());
        recon.on_event(&event(1, 0.2)).unwrap();
    }

    #[test]
    fn test_routes_through_document_enum() {
        let mut mock = MockReconAlgorithm::new();
        mock.expect_reconstruct()
            .returning(|projections, angles, _, init| {
                assert_eq!(projections.len(), angles.len());
                Ok(init.clone())
            });

        let mut router = crate::documents::DocumentRouter::new();
        router.subscribe(Box::new(
            LiveRecon::new(
                4,
                4,
                2,
                ReconOptions::for_grid(4, 4),
                Box::new(mock),
                Box::new(NullSink),
            )
            .unwrap(),
        ));

        router.dispatch(&Document::Start(start_doc())).unwrap();
        router.dispatch(&Document::Event(event(1, 0.0))).unwrap();
    }
}
