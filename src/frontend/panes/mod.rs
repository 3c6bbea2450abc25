//! Individual pane render functions
//!
//! Each pane is a plain render function taking its own state plus the
//! borrows it needs; the dock tab viewer dispatches to these based on
//! [`crate::frontend::PaneKind`].

pub mod profile_view;
pub mod recon_view;
pub mod sinogram_view;
