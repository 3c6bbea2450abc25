//! Grayscale raster rendering for matrix frames
//!
//! Maps a `DMatrix<f64>` through its color-scale bounds to an 8-bit
//! grayscale [`egui::ColorImage`] and keeps the uploaded texture cached
//! until the frame revision changes.

use crate::frontend::state::SharedFrame;
use egui::{ColorImage, TextureHandle, TextureOptions, Ui};
use nalgebra::DMatrix;

/// Convert a frame to a grayscale image using the given bounds.
///
/// A degenerate `(v, v)` clim renders mid-gray rather than dividing by
/// zero.
pub fn to_color_image(frame: &DMatrix<f64>, clim: (f64, f64)) -> ColorImage {
    let (h, w) = frame.shape();
    let (lo, hi) = clim;
    let span = hi - lo;

    let mut gray = Vec::with_capacity(w * h);
    for r in 0..h {
        for c in 0..w {
            let norm = if span > 0.0 {
                ((frame[(r, c)] - lo) / span).clamp(0.0, 1.0)
            } else {
                0.5
            };
            gray.push((norm * 255.0) as u8);
        }
    }

    ColorImage::from_gray([w, h], &gray)
}

/// A pane-owned texture over a [`SharedFrame`]
#[derive(Default)]
pub struct ImageView {
    texture: Option<TextureHandle>,
    last_revision: u64,
}

impl ImageView {
    /// Create an empty view
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the latest frame, re-uploading the texture only when the
    /// revision changed.
    pub fn show(&mut self, ui: &mut Ui, name: &str, shared: &SharedFrame) {
        let Some(frame) = shared.snapshot() else {
            ui.centered_and_justified(|ui| {
                ui.label("Waiting for data...");
            });
            return;
        };

        if frame.revision != self.last_revision || self.texture.is_none() {
            let image = to_color_image(&frame.image, frame.clim);
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    self.texture =
                        Some(ui.ctx().load_texture(name, image, TextureOptions::NEAREST));
                }
            }
            self.last_revision = frame.revision;
        }

        if let Some(texture) = &self.texture {
            let avail = ui.available_size();
            ui.add(egui::Image::new(texture).fit_to_exact_size(avail));
        }
        ui.small(format!("clim: [{:.4}, {:.4}]", frame.clim.0, frame.clim.1));
    }
}
