//! Test data builders for creating documents

use nalgebra::DMatrix;
use tomovis_rs::{EventDocument, RunStart, ScanConfig};

/// Builder for creating test EventDocuments
pub struct EventBuilder {
    seq_num: u64,
    angle: f64,
    width: usize,
    value: f64,
}

impl EventBuilder {
    pub fn new(seq_num: u64) -> Self {
        Self {
            seq_num,
            angle: 0.0,
            width: 8,
            value: 1.0,
        }
    }

    pub fn angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Constant fill value for the projection row
    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn build(self) -> EventDocument {
        EventDocument {
            seq_num: self.seq_num,
            projection: DMatrix::from_element(1, self.width, self.value),
            angle: self.angle,
        }
    }
}

/// A run start document for tests
pub fn run_start(run_id: u64) -> RunStart {
    RunStart {
        run_id,
        started_at: chrono::Utc::now(),
        scan: ScanConfig::default(),
    }
}
