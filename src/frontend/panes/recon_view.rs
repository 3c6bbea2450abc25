//! Reconstruction pane: the live best-estimate image

use egui::Ui;

use crate::frontend::image_view::ImageView;
use crate::frontend::state::SharedFrame;

/// Render the reconstruction pane
pub fn render(view: &mut ImageView, frame: &SharedFrame, ui: &mut Ui) {
    ui.heading("Reconstruction");
    ui.separator();
    view.show(ui, "recon_frame", frame);
}
