//! DyeStag Rust Extensions
//!
//! Textile dye simulation: procedural resist/dye masks for fifteen dyeing
//! techniques (ombré, tie-dye, shibori, batik, ikat, space dye, ...)
//! composited onto a photo while keeping its shading. Python bindings via
//! PyO3 and WASM bindings for JavaScript are optional features.
//!
//! ## Image Format
//! All entry points take and return RGBA u8 images as `(height, width, 4)`
//! arrays, row-major, origin top-left.
//!
//! ## Pipeline
//! 1. [`autocrop`] (optional, once per upload) strips a uniform border.
//! 2. [`render_technique`] cover-fits the image into the destination canvas,
//!    evaluates the technique mask per pixel, tints toward the dye color and
//!    runs the bleed pass.
//!
//! Every operation is a pure function of its inputs. Re-rendering with new
//! parameters is the only way to "cancel" a render.

pub mod color;
pub mod error;
pub mod filters;
pub mod framing;
pub mod noise;
pub mod patterns;
pub mod render;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use color::DyeColor;
pub use error::{DyeError, Result};
pub use framing::{autocrop, autocrop_detailed, cover_fit, cover_fit_rect};
pub use patterns::{render_mask, MaskSample, Technique};
pub use render::{render_technique, RenderParams};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray3};
    use pyo3::prelude::*;

    use crate::color::DyeColor;
    use crate::framing::autocrop::{autocrop as autocrop_impl, DEFAULT_TOLERANCE};
    use crate::patterns::{render_mask, Technique};
    use crate::render::{render_technique as render_impl, RenderParams};

    // ========================================================================
    // Technique Render
    // ========================================================================

    /// Render a dyeing technique onto an RGBA u8 image.
    ///
    /// # Arguments
    /// * `image` - Source RGBA image (any size)
    /// * `technique` - Technique key, e.g. "tieDyeSpiral"
    /// * `dye` - Hex dye color, "#RGB" or "#RRGGBB"
    /// * `width`, `height` - Output canvas size
    /// * `intensity` - Dye strength (0.0-1.0)
    /// * `scale` - Pattern scale (0.2-2.2 typical)
    /// * `softness` - Bleed steps (0-8)
    /// * `seed` - Pattern seed
    #[pyfunction]
    #[pyo3(signature = (image, technique="tieDyeSpiral", dye="#C2185B", width=512, height=512, intensity=0.85, scale=1.0, softness=2.0, seed=1337))]
    #[allow(clippy::too_many_arguments)]
    pub fn render_technique<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        technique: &str,
        dye: &str,
        width: usize,
        height: usize,
        intensity: f32,
        scale: f32,
        softness: f32,
        seed: u32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let params = RenderParams {
            technique: technique.parse::<Technique>()?,
            dye: DyeColor::from_hex(dye)?,
            width,
            height,
            intensity,
            scale,
            softness,
            seed,
        };
        let result = render_impl(image.as_array(), &params)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Autocrop
    // ========================================================================

    /// Remove a uniform border from an RGBA u8 image.
    ///
    /// Returns the original image unchanged when no border is found or the
    /// crop would keep less than 25% of either dimension.
    #[pyfunction]
    #[pyo3(signature = (image, tolerance=DEFAULT_TOLERANCE))]
    pub fn autocrop<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        tolerance: f32,
    ) -> Bound<'py, PyArray3<u8>> {
        autocrop_impl(image.as_array(), tolerance).into_pyarray(py)
    }

    // ========================================================================
    // Technique Catalog
    // ========================================================================

    /// List `(key, label)` pairs for every technique.
    #[pyfunction]
    pub fn technique_catalog() -> Vec<(&'static str, &'static str)> {
        Technique::catalog()
    }

    /// Evaluate a technique's mask as a (height, width) f32 array in 0.0-1.0.
    #[pyfunction]
    #[pyo3(signature = (technique, width, height, scale=1.0, seed=1337))]
    pub fn technique_mask<'py>(
        py: Python<'py>,
        technique: &str,
        width: usize,
        height: usize,
        scale: f32,
        seed: u32,
    ) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let mask = render_mask(technique.parse::<Technique>()?, width, height, scale, seed)?;
        Ok(mask.into_pyarray(py))
    }

    /// Python module definition
    #[pymodule]
    pub fn dyestag_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(render_technique, m)?)?;
        m.add_function(wrap_pyfunction!(autocrop, m)?)?;
        m.add_function(wrap_pyfunction!(technique_catalog, m)?)?;
        m.add_function(wrap_pyfunction!(technique_mask, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::dyestag_rust;
