//! Framing stages that run before any dye is applied.
//!
//! - **Autocrop** - strips a uniform border from an uploaded image (`autocrop.rs`)
//! - **Cover fit** - rasterizes the image into the destination canvas,
//!   cropping the long side symmetrically (`cover_fit.rs`)

pub mod autocrop;
pub mod cover_fit;

pub use autocrop::{autocrop, autocrop_detailed, AutocropOptions, AutocropResult, CropBounds};
pub use cover_fit::{cover_fit, cover_fit_rect, CoverFitRect};
