//! WebAssembly exports for DyeStag.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images cross
//! the boundary as flat RGBA byte arrays (`ImageData.data` layout).

use ndarray::ArrayView3;
use wasm_bindgen::prelude::*;

use crate::color::DyeColor;
use crate::error::DyeError;
use crate::framing::autocrop::autocrop_detailed;
use crate::patterns::Technique;
use crate::render::{render_technique, RenderParams};

fn view_rgba(data: &[u8], width: usize, height: usize) -> Result<ArrayView3<'_, u8>, JsError> {
    ArrayView3::from_shape((height, width, 4), data)
        .map_err(|_| JsError::from(DyeError::InvalidDimensions { width, height }))
}

// ============================================================================
// Technique Render
// ============================================================================

/// Render a dyeing technique.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width`, `height` - Source image size in pixels
/// * `technique` - Technique key, e.g. "shiboriKumo"
/// * `dye` - Hex dye color
/// * `out_width`, `out_height` - Destination canvas size
///
/// # Returns
/// Flat array of RGBA bytes, `out_width * out_height * 4` long
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn render_technique_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    technique: &str,
    dye: &str,
    out_width: usize,
    out_height: usize,
    intensity: f32,
    scale: f32,
    softness: f32,
    seed: u32,
) -> Result<Vec<u8>, JsError> {
    let source = view_rgba(data, width, height)?;
    let params = RenderParams {
        technique: technique.parse::<Technique>()?,
        dye: DyeColor::from_hex(dye)?,
        width: out_width,
        height: out_height,
        intensity,
        scale,
        softness,
        seed,
    };

    let result = render_technique(source, &params)?;
    Ok(result.into_raw_vec_and_offset().0)
}

// ============================================================================
// Autocrop
// ============================================================================

/// Border-removal result for JavaScript callers.
#[wasm_bindgen]
pub struct AutocropOutput {
    data: Vec<u8>,
    width: usize,
    height: usize,
    cropped: bool,
}

#[wasm_bindgen]
impl AutocropOutput {
    /// Flat RGBA bytes of the (possibly) cropped image
    #[wasm_bindgen(getter)]
    pub fn data(&self) -> Vec<u8> {
        self.data.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn cropped(&self) -> bool {
        self.cropped
    }
}

/// Remove a uniform border from a flat RGBA image.
#[wasm_bindgen]
pub fn autocrop_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    tolerance: f32,
) -> Result<AutocropOutput, JsError> {
    let source = view_rgba(data, width, height)?;
    let result = autocrop_detailed(source, tolerance);

    Ok(AutocropOutput {
        width: result.bounds.width(),
        height: result.bounds.height(),
        cropped: result.cropped,
        data: result.image.into_raw_vec_and_offset().0,
    })
}

/// Technique keys in catalog order.
#[wasm_bindgen]
pub fn technique_keys() -> Vec<String> {
    Technique::ALL.iter().map(|t| t.key().to_string()).collect()
}

/// Human-readable technique labels, parallel to [`technique_keys`].
#[wasm_bindgen]
pub fn technique_labels() -> Vec<String> {
    Technique::ALL.iter().map(|t| t.label().to_string()).collect()
}
