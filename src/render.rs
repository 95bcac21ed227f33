//! Full technique render: cover fit, per-pixel mask and tint, optional bleed.
//!
//! ```text
//! source --cover_fit--> canvas (width x height)
//!        --mask + tint--> dyed canvas
//!        --bleed (0-8 steps)--> output
//! ```
//!
//! Every stage allocates its own output; the source is only read.

use ndarray::{Array3, ArrayView3};
use serde::{Deserialize, Serialize};

use crate::color::DyeColor;
use crate::error::Result;
use crate::filters::bleed::{bleed_steps, bleed_with};
use crate::filters::core::{check_dimensions, check_rgba, fill_rows, rgba_from_vec, Execution};
use crate::filters::tint::composite_pixel;
use crate::framing::cover_fit::cover_fit_with;
use crate::patterns::{clamp_scale, MaskSample, Technique};

/// Parameters for one technique render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderParams {
    pub technique: Technique,
    /// Dye strength, 0.0-1.0
    pub intensity: f32,
    /// Pattern-scale factor (UI range 0.2-2.2)
    pub scale: f32,
    /// Bleed steps, `floor(softness)` capped at 8
    pub softness: f32,
    pub seed: u32,
    /// Destination canvas width in pixels
    pub width: usize,
    /// Destination canvas height in pixels
    pub height: usize,
    pub dye: DyeColor,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            technique: Technique::default(),
            intensity: 0.85,
            scale: 1.0,
            softness: 2.0,
            seed: 1337,
            width: 512,
            height: 512,
            dye: DyeColor::default(),
        }
    }
}

impl RenderParams {
    pub fn new(technique: Technique, dye: DyeColor, width: usize, height: usize) -> Self {
        Self { technique, dye, width, height, ..Self::default() }
    }

    /// Intensity clamped to 0.0-1.0 (non-finite -> 0.0).
    pub fn clamped_intensity(&self) -> f32 {
        if self.intensity.is_finite() {
            self.intensity.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn clamped_scale(&self) -> f32 {
        clamp_scale(self.scale)
    }

    pub fn bleed_steps(&self) -> u32 {
        bleed_steps(self.softness)
    }
}

/// Render a technique onto a source image.
///
/// # Arguments
/// * `source` - RGBA image (height, width, 4), any size
/// * `params` - Technique, dye, destination size and pattern controls
///
/// # Returns
/// RGBA image of shape (params.height, params.width, 4)
///
/// # Errors
/// [`DyeError::InvalidDimensions`](crate::error::DyeError::InvalidDimensions)
/// for an empty source, a non-RGBA source, or a zero-sized destination.
pub fn render_technique(source: ArrayView3<u8>, params: &RenderParams) -> Result<Array3<u8>> {
    render_technique_with(source, params, Execution::Parallel)
}

/// [`render_technique`] with an explicit row execution strategy.
pub fn render_technique_with(
    source: ArrayView3<u8>,
    params: &RenderParams,
    execution: Execution,
) -> Result<Array3<u8>> {
    check_rgba(&source)?;
    check_dimensions(params.width, params.height)?;

    tracing::debug!(
        technique = %params.technique,
        width = params.width,
        height = params.height,
        seed = params.seed,
        bleed_steps = params.bleed_steps(),
        "rendering technique"
    );

    let canvas = cover_fit_with(source, params.width, params.height, execution)?;
    let dyed = apply_dye_with(canvas.view(), params, execution)?;
    bleed_with(dyed.view(), params.softness, execution)
}

/// Mask and tint an already-sized canvas (no cover fit, no bleed).
pub fn apply_dye(canvas: ArrayView3<u8>, params: &RenderParams) -> Result<Array3<u8>> {
    apply_dye_with(canvas, params, Execution::Parallel)
}

fn apply_dye_with(
    canvas: ArrayView3<u8>,
    params: &RenderParams,
    execution: Execution,
) -> Result<Array3<u8>> {
    let (height, width) = check_rgba(&canvas)?;
    let intensity = params.clamped_intensity();
    let scale = params.clamped_scale();
    let technique = params.technique;
    let (dye, seed) = (params.dye, params.seed);

    let mut data = vec![0u8; width * height * 4];
    fill_rows(&mut data, width * 4, execution, |y, row| {
        for x in 0..width {
            let base = [
                canvas[[y, x, 0]],
                canvas[[y, x, 1]],
                canvas[[y, x, 2]],
                canvas[[y, x, 3]],
            ];
            let mask = technique.mask(&MaskSample::at_pixel(x, y, width, height, scale, seed));
            row[x * 4..x * 4 + 4].copy_from_slice(&composite_pixel(base, dye, mask, intensity));
        }
    });

    rgba_from_vec(data, width, height)
}
