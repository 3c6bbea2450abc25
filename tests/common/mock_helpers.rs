//! Hand-rolled test doubles for the reconstruction seam

use std::sync::{Arc, Mutex};

use nalgebra::DMatrix;
use tomovis_rs::{ReconAlgorithm, ReconOptions, Result, TomoVisError};

/// Everything one reconstruction call received
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub projections: Vec<DMatrix<f64>>,
    pub angles: Vec<f64>,
    pub init: DMatrix<f64>,
}

/// Shared call log for the recording algorithms
pub type CallLog = Arc<Mutex<Vec<CallRecord>>>;

/// Create an empty call log
pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Algorithm double that records every call and returns the seed with every
/// element incremented by one, so successive outputs are distinguishable.
pub struct RecordingRecon {
    pub calls: CallLog,
}

impl RecordingRecon {
    pub fn new(calls: CallLog) -> Self {
        Self { calls }
    }
}

impl ReconAlgorithm for RecordingRecon {
    fn reconstruct(
        &self,
        projections: &[DMatrix<f64>],
        angles: &[f64],
        _options: &ReconOptions,
        init_recon: &DMatrix<f64>,
    ) -> Result<DMatrix<f64>> {
        self.calls.lock().unwrap().push(CallRecord {
            projections: projections.to_vec(),
            angles: angles.to_vec(),
            init: init_recon.clone(),
        });
        Ok(init_recon.map(|v| v + 1.0))
    }
}

/// Recording double that fails on one specific call (1-based)
pub struct FailingRecon {
    pub calls: CallLog,
    fail_on_call: usize,
}

impl FailingRecon {
    pub fn new(calls: CallLog, fail_on_call: usize) -> Self {
        Self {
            calls,
            fail_on_call,
        }
    }
}

impl ReconAlgorithm for FailingRecon {
    fn reconstruct(
        &self,
        projections: &[DMatrix<f64>],
        angles: &[f64],
        _options: &ReconOptions,
        init_recon: &DMatrix<f64>,
    ) -> Result<DMatrix<f64>> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(CallRecord {
            projections: projections.to_vec(),
            angles: angles.to_vec(),
            init: init_recon.clone(),
        });
        if calls.len() == self.fail_on_call {
            return Err(TomoVisError::Reconstruction(
                "singular geometry".to_string(),
            ));
        }
        Ok(init_recon.map(|v| v + 1.0))
    }
}
