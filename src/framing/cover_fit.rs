//! Cover-fit sampling.
//!
//! Fills a destination canvas completely from a source of any aspect
//! ratio: scale by `max(w / iw, h / ih)`, then crop the overflowing
//! dimension symmetrically. No letterboxing, no distortion.

use ndarray::{Array3, ArrayView3};

use crate::error::Result;
use crate::filters::core::{
    check_dimensions, check_rgba, fill_rows, rgba_from_vec, sample_bilinear_clamped, Execution,
};

/// Source rectangle drawn onto the destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFitRect {
    /// Left edge in source pixels
    pub sx: f32,
    /// Top edge in source pixels
    pub sy: f32,
    /// Width in source pixels
    pub sw: f32,
    /// Height in source pixels
    pub sh: f32,
    /// Destination pixels per source pixel
    pub scale: f32,
}

impl CoverFitRect {
    pub fn aspect(&self) -> f32 {
        self.sw / self.sh
    }
}

/// Compute the centered source rectangle for a cover fit.
///
/// # Arguments
/// * `iw`, `ih` - Source size in pixels
/// * `w`, `h` - Destination size in pixels
pub fn cover_fit_rect(iw: usize, ih: usize, w: usize, h: usize) -> Result<CoverFitRect> {
    check_dimensions(iw, ih)?;
    check_dimensions(w, h)?;

    let scale = (w as f32 / iw as f32).max(h as f32 / ih as f32);
    let sw = w as f32 / scale;
    let sh = h as f32 / scale;

    Ok(CoverFitRect {
        sx: (iw as f32 - sw) / 2.0,
        sy: (ih as f32 - sh) / 2.0,
        sw,
        sh,
        scale,
    })
}

/// Rasterize `source` into a `width` x `height` canvas using a cover fit.
///
/// # Returns
/// RGBA image of shape (height, width, 4)
pub fn cover_fit(source: ArrayView3<u8>, width: usize, height: usize) -> Result<Array3<u8>> {
    cover_fit_with(source, width, height, Execution::Parallel)
}

/// [`cover_fit`] with an explicit row execution strategy.
pub fn cover_fit_with(
    source: ArrayView3<u8>,
    width: usize,
    height: usize,
    execution: Execution,
) -> Result<Array3<u8>> {
    let (ih, iw) = check_rgba(&source)?;
    let rect = cover_fit_rect(iw, ih, width, height)?;
    tracing::trace!(?rect, iw, ih, width, height, "cover fit");

    let step_x = rect.sw / width as f32;
    let step_y = rect.sh / height as f32;

    let mut data = vec![0u8; width * height * 4];
    fill_rows(&mut data, width * 4, execution, |y, row| {
        // Destination pixel centers mapped back to source pixel-index space
        let sy = rect.sy + (y as f32 + 0.5) * step_y - 0.5;
        for x in 0..width {
            let sx = rect.sx + (x as f32 + 0.5) * step_x - 0.5;
            let px = sample_bilinear_clamped(&source, sx, sy);
            for c in 0..4 {
                row[x * 4 + c] = px[c].round().clamp(0.0, 255.0) as u8;
            }
        }
    });

    rgba_from_vec(data, width, height)
}
