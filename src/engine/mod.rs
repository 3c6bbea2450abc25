//! Scan engine: drives the simulated instrument in a separate thread
//!
//! The engine owns the angular sweep and the simulated detector, keeping
//! the UI responsive while measurements are produced. It communicates with
//! the frontend over crossbeam channels:
//!
//! - [`EngineCommand`] - messages sent from UI to engine (start, stop, ...)
//! - [`EngineMessage`] - messages sent from engine to UI (documents,
//!   progress, errors)
//! - [`EngineHandle`] - UI-side handle for sending commands and draining
//!   messages
//! - [`ScanEngine`] - entry point that builds the channel pair and runs the
//!   worker loop
//!
//! # Example
//!
//! ```ignore
//! use tomovis_rs::config::ScanConfig;
//! use tomovis_rs::engine::{EngineMessage, ScanEngine};
//!
//! let (engine, handle) = ScanEngine::new(ScanConfig::default());
//! std::thread::spawn(move || engine.run());
//!
//! handle.start_scan();
//! for msg in handle.drain() {
//!     if let EngineMessage::Document(doc) = msg {
//!         // feed the document router
//!     }
//! }
//! ```

pub mod detector;
pub mod worker;

pub use detector::{ellipse_phantom, RotationStage, SimDetector};
pub use worker::ScanWorker;

use crate::config::ScanConfig;
use crate::documents::Document;
use crate::types::ScanProgress;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Message sent from the UI to the engine
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Begin a new angular sweep with the current configuration
    StartScan,
    /// Abort the sweep in progress, if any
    StopScan,
    /// Replace the sweep configuration; applies to the next scan
    SetScanConfig(ScanConfig),
    /// Shut the engine down
    Shutdown,
}

/// Message sent from the engine to the UI
#[derive(Debug, Clone)]
pub enum EngineMessage {
    /// A run document (start or event)
    Document(Document),
    /// Sweep progress update
    Progress(ScanProgress),
    /// The sweep delivered all its events
    ScanComplete,
    /// The sweep was aborted by request
    ScanStopped,
    /// The engine refused or failed an operation
    Error(String),
    /// The engine is shutting down
    Shutdown,
}

/// Frontend handle to the engine
pub struct EngineHandle {
    /// Receiver for engine messages
    pub receiver: Receiver<EngineMessage>,
    /// Sender for commands to the engine
    pub command_sender: Sender<EngineCommand>,
}

impl EngineHandle {
    /// Try to receive a message without blocking
    pub fn try_recv(&self) -> Option<EngineMessage> {
        self.receiver.try_recv().ok()
    }

    /// Receive all pending messages
    pub fn drain(&self) -> Vec<EngineMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.receiver.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Send a command to the engine
    pub fn send_command(&self, cmd: EngineCommand) -> bool {
        self.command_sender.send(cmd).is_ok()
    }

    /// Begin a new sweep
    pub fn start_scan(&self) {
        let _ = self.command_sender.send(EngineCommand::StartScan);
    }

    /// Abort the current sweep
    pub fn stop_scan(&self) {
        let _ = self.command_sender.send(EngineCommand::StopScan);
    }

    /// Replace the sweep configuration for the next scan
    pub fn set_scan_config(&self, config: ScanConfig) {
        let _ = self
            .command_sender
            .send(EngineCommand::SetScanConfig(config));
    }

    /// Request shutdown
    pub fn shutdown(&self) {
        let _ = self.command_sender.send(EngineCommand::Shutdown);
    }
}

/// The scan engine that runs in a separate thread
pub struct ScanEngine {
    /// Sweep configuration
    config: ScanConfig,
    /// Receiver for commands from the UI
    command_receiver: Receiver<EngineCommand>,
    /// Sender for messages to the UI
    message_sender: Sender<EngineMessage>,
    /// Running flag
    running: Arc<AtomicBool>,
}

impl ScanEngine {
    /// Create a new engine with communication channels
    pub fn new(config: ScanConfig) -> (Self, EngineHandle) {
        let (cmd_tx, cmd_rx) = bounded(256);
        // Bounded for backpressure; plenty of headroom for a full sweep of
        // documents plus progress updates.
        let (msg_tx, msg_rx) = bounded(10_000);

        let engine = Self {
            config,
            command_receiver: cmd_rx,
            message_sender: msg_tx,
            running: Arc::new(AtomicBool::new(true)),
        };

        let handle = EngineHandle {
            receiver: msg_rx,
            command_sender: cmd_tx,
        };

        (engine, handle)
    }

    /// Run the engine loop
    pub fn run(self) {
        let mut worker = ScanWorker::new(
            self.config,
            self.command_receiver,
            self.message_sender,
            self.running,
        );
        worker.run();
    }

    /// Get a handle to stop the engine
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_engine_creation() {
        let (engine, handle) = ScanEngine::new(ScanConfig::default());

        assert!(engine.running.load(Ordering::SeqCst));
        assert!(handle.send_command(EngineCommand::Shutdown));
    }

    #[test]
    fn test_handle_commands() {
        let (_engine, handle) = ScanEngine::new(ScanConfig::default());

        handle.start_scan();
        handle.set_scan_config(ScanConfig {
            num_angles: 10,
            ..Default::default()
        });
        handle.stop_scan();
        handle.shutdown();
    }
}
