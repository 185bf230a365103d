//! Template-based classification and calibration.
//!
//! This crate provides the concrete collaborators the discovery engine needs
//! on real screenshots:
//! - loading a directory of tile templates (`<name>.png`, one per tile kind,
//!   plus one template for an empty slot),
//! - a [`TemplateClassifier`] scoring patches against every template with a
//!   weighted sum of grayscale SSIM, colour-histogram correlation and
//!   normalized cross-correlation,
//! - [`calibrate`], which locates the anchor cell by sliding every non-empty
//!   template over the frame.
//!
//! Templates are normalized to the grid's cell size on load, so every score
//! is computed between equally sized images.

mod calibrate;
mod classifier;
mod error;
mod frame;
mod score;
mod templates;

pub use calibrate::{calibrate, Calibration, CalibrationParams};
pub use classifier::{ClassifierParams, TemplateClassifier, TemplateMatch};
pub use error::{CalibrationError, TemplateError};
pub use frame::{frame_image, frame_view, patch_image};
pub use score::{hist_correlation, ncc_gray, ncc_rgb, ssim_gray};
pub use templates::{load_templates, Template, TemplateSet, TemplateSetParams};
