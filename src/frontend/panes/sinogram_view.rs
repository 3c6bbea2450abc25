//! Sinogram pane: sequence number vs detector position

use egui::Ui;

use crate::frontend::image_view::ImageView;
use crate::frontend::state::SharedFrame;

/// Render the sinogram pane
pub fn render(view: &mut ImageView, frame: &SharedFrame, ui: &mut Ui) {
    ui.heading("Sinogram");
    ui.separator();
    view.show(ui, "sinogram_frame", frame);
}
