//! Scan worker thread implementation
//!
//! The worker owns the simulated instrument and runs the sweep loop in a
//! dedicated thread: it pumps commands from the UI, steps the rotation
//! stage through the configured angles, reads the detector at each step,
//! and emits one document per measurement with a strictly increasing
//! 1-based sequence number.
//!
//! Exactly one event is in flight at a time; each step runs to completion
//! before the next command is processed.

use crate::config::ScanConfig;
use crate::documents::{Document, EventDocument, RunStart};
use crate::engine::detector::{RotationStage, SimDetector};
use crate::engine::{EngineCommand, EngineMessage};
use crate::types::ScanProgress;
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Idle poll interval when no sweep is running
const IDLE_SLEEP: Duration = Duration::from_millis(5);

/// State of an in-progress sweep
struct Sweep {
    angles: Vec<f64>,
    next: usize,
}

/// The worker that runs the scan loop
pub struct ScanWorker {
    /// Sweep configuration; replaceable between scans
    config: ScanConfig,
    /// Command receiver from the UI
    command_rx: Receiver<EngineCommand>,
    /// Message sender to the UI
    message_tx: Sender<EngineMessage>,
    /// Running flag
    running: Arc<AtomicBool>,
    /// Simulated detector
    detector: SimDetector,
    /// Simulated rotation stage
    stage: RotationStage,
    /// Current sweep, if one is in progress
    sweep: Option<Sweep>,
    /// Runs started by this worker
    run_counter: u64,
}

impl ScanWorker {
    /// Create a new worker
    pub fn new(
        config: ScanConfig,
        command_rx: Receiver<EngineCommand>,
        message_tx: Sender<EngineMessage>,
        running: Arc<AtomicBool>,
    ) -> Self {
        let detector = SimDetector::new(config.phantom_size, config.detector_width);
        let stage = RotationStage::new(Duration::from_millis(config.dwell_ms));
        Self {
            config,
            command_rx,
            message_tx,
            running,
            detector,
            stage,
            sweep: None,
            run_counter: 0,
        }
    }

    /// Run the main worker loop
    pub fn run(&mut self) {
        tracing::info!("Scan worker started");

        while self.running.load(Ordering::SeqCst) {
            self.process_commands();

            if self.sweep.is_some() {
                self.step();
            } else {
                std::thread::sleep(IDLE_SLEEP);
            }
        }

        let _ = self.message_tx.send(EngineMessage::Shutdown);
        tracing::info!("Scan worker stopped");
    }

    fn process_commands(&mut self) {
        loop {
            match self.command_rx.try_recv() {
                Ok(cmd) => self.handle_command(cmd),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("Command channel disconnected, shutting down");
                    self.running.store(false, Ordering::SeqCst);
                    break;
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::StartScan => self.begin_scan(),
            EngineCommand::StopScan => {
                if self.sweep.take().is_some() {
                    tracing::info!("Scan stopped by request");
                    let _ = self.message_tx.send(EngineMessage::ScanStopped);
                }
            }
            EngineCommand::SetScanConfig(config) => {
                // Takes effect on the next scan; the instrument is rebuilt
                // at scan start.
                self.config = config;
            }
            EngineCommand::Shutdown => {
                self.running.store(false, Ordering::SeqCst);
            }
        }
    }

    /// Start a new session: rebuild the instrument from the current config
    /// and emit the run start document before any event.
    fn begin_scan(&mut self) {
        if let Err(e) = self.config.validate() {
            tracing::error!("Refusing to start scan: {}", e);
            let _ = self.message_tx.send(EngineMessage::Error(e.to_string()));
            return;
        }

        self.detector = SimDetector::new(self.config.phantom_size, self.config.detector_width);
        self.stage = RotationStage::new(Duration::from_millis(self.config.dwell_ms));
        self.run_counter += 1;

        let start = RunStart {
            run_id: self.run_counter,
            started_at: chrono::Utc::now(),
            scan: self.config.clone(),
        };
        tracing::info!(
            "Starting run {} ({} angles over [{:.3}, {:.3}] rad)",
            start.run_id,
            self.config.num_angles,
            self.config.start_angle,
            self.config.stop_angle
        );
        let _ = self
            .message_tx
            .send(EngineMessage::Document(Document::Start(start)));

        self.sweep = Some(Sweep {
            angles: self.config.angles(),
            next: 0,
        });
    }

    /// Perform one measurement step of the current sweep
    fn step(&mut self) {
        let Some(sweep) = self.sweep.as_mut() else {
            return;
        };

        let angle = sweep.angles[sweep.next];
        let seq_num = sweep.next as u64 + 1;
        let total = sweep.angles.len() as u64;
        sweep.next += 1;
        let done = sweep.next == sweep.angles.len();

        self.stage.move_to(angle);
        let projection = self.detector.read(self.stage.angle());

        let event = EventDocument {
            seq_num,
            projection,
            angle,
        };
        let _ = self
            .message_tx
            .send(EngineMessage::Document(Document::Event(event)));
        let _ = self.message_tx.send(EngineMessage::Progress(ScanProgress {
            current: seq_num,
            total,
            angle,
        }));

        if done {
            self.sweep = None;
            tracing::info!("Run {} complete ({} events)", self.run_counter, total);
            let _ = self.message_tx.send(EngineMessage::ScanComplete);
        }
    }
}
