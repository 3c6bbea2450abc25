//! The numerical reconstruction routine seam
//!
//! The incremental reconstructor treats the routine as opaque: anything
//! implementing [`ReconAlgorithm`] can be plugged in, and the core only
//! relies on the contract that the output matches the shape of the
//! `init_recon` seed and that the call is deterministic for identical
//! inputs.
//!
//! [`ArtRecon`] is the default implementation: a relaxed algebraic
//! reconstruction technique over a nearest-bin parallel-beam geometry. The
//! same geometry is exported as [`project`] so the simulated detector and
//! the solver agree on the forward model.

use crate::error::{Result, TomoVisError};
use nalgebra::DMatrix;

/// Options passed through verbatim to the reconstruction routine
#[derive(Debug, Clone, PartialEq)]
pub struct ReconOptions {
    /// Reconstruction grid width, pixels
    pub num_gridx: usize,
    /// Reconstruction grid height, pixels
    pub num_gridy: usize,
    /// Iterations per call
    pub num_iter: usize,
    /// ART relaxation factor
    pub relax: f64,
}

impl ReconOptions {
    /// Options with grid resolution defaulted from the target image size
    pub fn for_grid(width: usize, height: usize) -> Self {
        Self {
            num_gridx: width,
            num_gridy: height,
            num_iter: 2,
            relax: 1.0,
        }
    }

    /// Override the iteration count
    pub fn with_num_iter(mut self, num_iter: usize) -> Self {
        self.num_iter = num_iter;
        self
    }
}

/// An iterative tomographic reconstruction routine.
///
/// Contract: `projections[i]` is a `1 x W` detector row measured at
/// `angles[i]`, both ordered consistently (oldest first here); the return
/// value has the same shape as `init_recon`. Deterministic given identical
/// inputs; may fail on malformed geometry.
#[cfg_attr(test, mockall::automock)]
pub trait ReconAlgorithm: Send {
    /// Reconstruct an image from `projections`/`angles`, seeded with
    /// `init_recon`.
    fn reconstruct(
        &self,
        projections: &[DMatrix<f64>],
        angles: &[f64],
        options: &ReconOptions,
        init_recon: &DMatrix<f64>,
    ) -> Result<DMatrix<f64>>;
}

/// Build the routine named by the configuration
pub fn make_algorithm(name: &str) -> Result<Box<dyn ReconAlgorithm>> {
    match name {
        "art" => Ok(Box::new(ArtRecon)),
        other => Err(TomoVisError::Config(format!(
            "Unknown reconstruction algorithm '{}'",
            other
        ))),
    }
}

/// Nearest-bin parallel-beam geometry for one view
struct Geometry {
    cx: f64,
    cy: f64,
    cos_t: f64,
    sin_t: f64,
    center: f64,
    width: usize,
}

impl Geometry {
    fn new(grid_h: usize, grid_w: usize, angle: f64, width: usize) -> Self {
        let (sin_t, cos_t) = angle.sin_cos();
        Self {
            cx: (grid_w as f64 - 1.0) / 2.0,
            cy: (grid_h as f64 - 1.0) / 2.0,
            cos_t,
            sin_t,
            center: width as f64 / 2.0,
            width,
        }
    }

    /// Detector bin hit by pixel `(r, c)`, if inside the detector
    fn bin(&self, r: usize, c: usize) -> Option<usize> {
        let t = (c as f64 - self.cx) * self.cos_t + (r as f64 - self.cy) * self.sin_t;
        let b = (t + self.center).round();
        if b >= 0.0 && (b as usize) < self.width {
            Some(b as usize)
        } else {
            None
        }
    }
}

/// Parallel-beam forward projection of `image` at `angle` onto a detector
/// of `width` bins.
///
/// Nearest-bin pixel-driven model: every pixel contributes its full value
/// to exactly one detector bin, so the bin sum equals the image sum
/// whenever the detector covers the image diagonal.
pub fn project(image: &DMatrix<f64>, angle: f64, width: usize) -> DMatrix<f64> {
    let (h, w) = image.shape();
    let geom = Geometry::new(h, w, angle, width);

    let mut row = DMatrix::zeros(1, width);
    for r in 0..h {
        for c in 0..w {
            if let Some(b) = geom.bin(r, c) {
                row[(0, b)] += image[(r, c)];
            }
        }
    }
    row
}

/// Relaxed ART over the nearest-bin parallel-beam geometry
#[derive(Debug, Default, Clone, Copy)]
pub struct ArtRecon;

impl ReconAlgorithm for ArtRecon {
    fn reconstruct(
        &self,
        projections: &[DMatrix<f64>],
        angles: &[f64],
        options: &ReconOptions,
        init_recon: &DMatrix<f64>,
    ) -> Result<DMatrix<f64>> {
        if projections.is_empty() {
            return Err(TomoVisError::Reconstruction(
                "no projections supplied".to_string(),
            ));
        }
        if projections.len() != angles.len() {
            return Err(TomoVisError::Reconstruction(format!(
                "{} projections but {} angles",
                projections.len(),
                angles.len()
            )));
        }
        let width = projections[0].ncols();
        for p in projections {
            if p.nrows() != 1 || p.ncols() != width {
                return Err(TomoVisError::Reconstruction(format!(
                    "projection shape {}x{} does not match expected 1x{}",
                    p.nrows(),
                    p.ncols(),
                    width
                )));
            }
        }
        if init_recon.shape() != (options.num_gridy, options.num_gridx) {
            return Err(TomoVisError::Reconstruction(format!(
                "init_recon shape {}x{} does not match grid {}x{}",
                init_recon.nrows(),
                init_recon.ncols(),
                options.num_gridy,
                options.num_gridx
            )));
        }

        let h = options.num_gridy;
        let w = options.num_gridx;

        let mut image = init_recon.clone();
        for _ in 0..options.num_iter {
            for (proj, &angle) in projections.iter().zip(angles.iter()) {
                let geom = Geometry::new(h, w, angle, width);

                // Forward pass: per-bin sum and pixel count
                let mut sums = vec![0.0f64; width];
                let mut counts = vec![0usize; width];
                for r in 0..h {
                    for c in 0..w {
                        if let Some(b) = geom.bin(r, c) {
                            sums[b] += image[(r, c)];
                            counts[b] += 1;
                        }
                    }
                }

                // Residual per bin, spread evenly over contributing pixels
                let mut corr = vec![0.0f64; width];
                for b in 0..width {
                    if counts[b] > 0 {
                        corr[b] = (proj[(0, b)] - sums[b]) / counts[b] as f64;
                    }
                }

                // Backproject with relaxation
                for r in 0..h {
                    for c in 0..w {
                        if let Some(b) = geom.bin(r, c) {
                            image[(r, c)] += options.relax * corr[b];
                        }
                    }
                }
            }
        }

        Ok(image)
    }
}
