//! Frontend module for the egui UI
//!
//! Receives documents from the scan engine through crossbeam channels,
//! routes them to the reconstruction and sinogram callbacks, and renders
//! the resulting frames in real time.
//!
//! # Architecture
//!
//! The frontend uses an egui_dock workspace with three panes: the live
//! reconstruction, the sinogram, and the most recent projection profile.
//! Document handling runs on the UI thread, one event at a time, inside
//! [`TomoVisApp::update`]; the engine thread only produces documents.
//!
//! # Main Types
//!
//! - [`TomoVisApp`] - Main application state implementing [`eframe::App`]
//! - [`SharedFrame`] / [`FrameSink`] - latest-frame hand-off between
//!   callbacks and panes
//! - [`ImageView`] - cached grayscale texture over a shared frame

pub mod image_view;
pub mod panes;
pub mod state;

pub use image_view::ImageView;
pub use state::{DisplayFrame, FrameSink, SharedFrame};

use std::path::PathBuf;

use egui::{Ui, WidgetText};
use egui_dock::{DockState, NodeIndex};

use crate::config::{AppConfig, AppState};
use crate::documents::{Document, DocumentRouter};
use crate::engine::{EngineHandle, EngineMessage};
use crate::error::{Result, TomoVisError};
use crate::recon::{make_algorithm, LiveRecon, LiveSinogram, ReconOptions};
use crate::types::{ScanProgress, ScanState};

/// The panes of the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneKind {
    /// Live reconstruction image
    Reconstruction,
    /// Accumulated sinogram
    Sinogram,
    /// Latest projection row
    Profile,
}

impl PaneKind {
    fn title(&self) -> &'static str {
        match self {
            PaneKind::Reconstruction => "Reconstruction",
            PaneKind::Sinogram => "Sinogram",
            PaneKind::Profile => "Projection Profile",
        }
    }
}

/// Tab viewer that bridges egui_dock with the pane render functions
struct TomoTabViewer<'a> {
    recon_view: &'a mut ImageView,
    sinogram_view: &'a mut ImageView,
    recon_frame: &'a SharedFrame,
    sinogram_frame: &'a SharedFrame,
    profile: Option<&'a [f64]>,
}

impl egui_dock::TabViewer for TomoTabViewer<'_> {
    type Tab = PaneKind;

    fn title(&mut self, tab: &mut PaneKind) -> WidgetText {
        WidgetText::from(tab.title())
    }

    fn ui(&mut self, ui: &mut Ui, tab: &mut PaneKind) {
        match tab {
            PaneKind::Reconstruction => {
                panes::recon_view::render(self.recon_view, self.recon_frame, ui)
            }
            PaneKind::Sinogram => {
                panes::sinogram_view::render(self.sinogram_view, self.sinogram_frame, ui)
            }
            PaneKind::Profile => panes::profile_view::render(self.profile, ui),
        }
    }
}

/// Build the default dock layout: reconstruction left, sinogram top right,
/// profile bottom right.
fn build_default_layout() -> DockState<PaneKind> {
    let mut dock = DockState::new(vec![PaneKind::Reconstruction]);
    let [_recon, right] =
        dock.main_surface_mut()
            .split_right(NodeIndex::root(), 0.5, vec![PaneKind::Sinogram]);
    dock.main_surface_mut()
        .split_below(right, 0.55, vec![PaneKind::Profile]);
    dock
}

/// Main application state
pub struct TomoVisApp {
    /// Handle to the scan engine thread
    handle: EngineHandle,
    /// Fans documents out to the reconstruction and sinogram callbacks
    router: DocumentRouter,
    /// Current configuration
    config: AppConfig,
    /// Persistent application state
    app_state: AppState,
    /// Path of the loaded project, if any
    #[allow(dead_code)]
    project_path: Option<PathBuf>,
    /// Dock layout
    dock_state: DockState<PaneKind>,
    /// Latest reconstruction frame
    recon_frame: SharedFrame,
    /// Latest sinogram frame
    sinogram_frame: SharedFrame,
    /// Texture cache for the reconstruction pane
    recon_view: ImageView,
    /// Texture cache for the sinogram pane
    sinogram_view: ImageView,
    /// Most recent detector row, for the profile pane
    profile: Option<Vec<f64>>,
    /// Engine state as last reported
    scan_state: ScanState,
    /// Sweep progress as last reported
    progress: Option<ScanProgress>,
    /// Most recent error, shown in the toolbar
    last_error: Option<String>,
}

impl TomoVisApp {
    /// Build the application: validates the configuration and wires the
    /// document callbacks to their display sinks.
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        handle: EngineHandle,
        config: AppConfig,
        app_state: AppState,
        project_path: Option<PathBuf>,
    ) -> Result<Self> {
        config.validate()?;

        let recon_frame = SharedFrame::new();
        let sinogram_frame = SharedFrame::new();

        let mut router = DocumentRouter::new();
        router.subscribe(Box::new(LiveSinogram::new(
            config.scan.detector_width,
            Box::new(FrameSink::new(sinogram_frame.clone())),
        )));

        let options = ReconOptions::for_grid(config.recon.width, config.recon.height)
            .with_num_iter(config.recon.num_iter);
        let algorithm = make_algorithm(&config.recon.algorithm)?;
        router.subscribe(Box::new(LiveRecon::new(
            config.recon.width,
            config.recon.height,
            config.recon.window_size,
            options,
            algorithm,
            Box::new(FrameSink::new(recon_frame.clone())),
        )?));

        Ok(Self {
            handle,
            router,
            config,
            app_state,
            project_path,
            dock_state: build_default_layout(),
            recon_frame,
            sinogram_frame,
            recon_view: ImageView::new(),
            sinogram_view: ImageView::new(),
            profile: None,
            scan_state: ScanState::Idle,
            progress: None,
            last_error: None,
        })
    }

    /// Drain the engine channel and route documents. Returns whether any
    /// message was processed.
    fn process_engine_messages(&mut self) -> bool {
        let messages = self.handle.drain();
        let had_messages = !messages.is_empty();

        for msg in messages {
            match msg {
                EngineMessage::Document(doc) => {
                    match &doc {
                        Document::Start(_) => {
                            self.scan_state = ScanState::Scanning;
                            self.progress = None;
                            self.profile = None;
                            self.last_error = None;
                        }
                        Document::Event(event) => {
                            self.profile =
                                Some(event.detector_row().iter().copied().collect());
                        }
                    }

                    if let Err(e) = self.router.dispatch(&doc) {
                        match e {
                            TomoVisError::SequenceOrder { .. } => {
                                // Fatal to the session; abort the sweep.
                                self.scan_state = ScanState::Failed;
                                self.handle.stop_scan();
                                self.last_error = Some(e.to_string());
                            }
                            other => {
                                // Reconstruction failures leave the previous
                                // estimate on screen; keep scanning.
                                self.last_error = Some(other.to_string());
                            }
                        }
                    }
                }
                EngineMessage::Progress(progress) => {
                    self.progress = Some(progress);
                }
                EngineMessage::ScanComplete => {
                    self.scan_state = ScanState::Complete;
                }
                EngineMessage::ScanStopped => {
                    if self.scan_state != ScanState::Failed {
                        self.scan_state = ScanState::Idle;
                    }
                }
                EngineMessage::Error(e) => {
                    self.scan_state = ScanState::Failed;
                    self.last_error = Some(e);
                }
                EngineMessage::Shutdown => {
                    tracing::info!("Engine shut down");
                }
            }
        }

        had_messages
    }

    fn toolbar(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let scanning = self.scan_state.is_scanning();

            if ui
                .add_enabled(!scanning, egui::Button::new("Start Scan"))
                .clicked()
            {
                self.handle.start_scan();
            }
            if ui
                .add_enabled(scanning, egui::Button::new("Stop"))
                .clicked()
            {
                self.handle.stop_scan();
            }

            ui.separator();
            ui.label(self.scan_state.display_name());
            ui.separator();
            ui.label(format!(
                "window: {} | grid: {}x{}",
                self.config.recon.window_size, self.config.recon.width, self.config.recon.height
            ));

            if let Some(progress) = self.progress {
                ui.separator();
                ui.add(
                    egui::ProgressBar::new(progress.fraction())
                        .desired_width(160.0)
                        .text(format!("{}/{}", progress.current, progress.total)),
                );
                ui.label(format!("angle: {:.3} rad", progress.angle));
            }

            if let Some(error) = &self.last_error {
                ui.separator();
                ui.colored_label(egui::Color32::RED, error);
            }
        });
    }
}

impl eframe::App for TomoVisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let had_messages = self.process_engine_messages();

        if self.scan_state.is_scanning() || had_messages {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |_ui| {
            let mut viewer = TomoTabViewer {
                recon_view: &mut self.recon_view,
                sinogram_view: &mut self.sinogram_view,
                recon_frame: &self.recon_frame,
                sinogram_frame: &self.sinogram_frame,
                profile: self.profile.as_deref(),
            };

            egui_dock::DockArea::new(&mut self.dock_state)
                .style(egui_dock::Style::from_egui(ctx.style().as_ref()))
                .show(ctx, &mut viewer);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state: {}", e);
        }
        self.handle.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pane_titles() {
        assert_eq!(PaneKind::Reconstruction.title(), "Reconstruction");
        assert_eq!(PaneKind::Sinogram.title(), "Sinogram");
        assert_eq!(PaneKind::Profile.title(), "Projection Profile");
    }

    #[test]
    fn test_default_layout_has_all_panes() {
        let dock = build_default_layout();
        let tabs: Vec<PaneKind> = dock.iter_all_tabs().map(|(_, tab)| *tab).collect();
        assert_eq!(tabs.len(), 3);
        assert!(tabs.contains(&PaneKind::Reconstruction));
        assert!(tabs.contains(&PaneKind::Sinogram));
        assert!(tabs.contains(&PaneKind::Profile));
    }
}
