//! Bleed/softness pass approximating dye diffusion at pattern edges.
//!
//! Each step composites the canvas onto itself twice, source-over at 35%
//! opacity: once shifted by +0.5px on both axes, then (reading the result
//! of the first draw) once shifted by -0.5px. Half-pixel shifts resample
//! bilinearly, so each draw averages a 2x2 neighborhood: a box
//! low-pass, not a Gaussian.
//!
//! Steps run strictly in order; pixels within one draw are independent.
//! The shift is in pixels regardless of canvas size.

use ndarray::{Array3, ArrayView3};

use super::core::{
    check_rgba, fill_rows, from_premultiplied_f32, rgba_from_vec, sample_bilinear_transparent,
    to_premultiplied_f32, Execution,
};
use crate::error::Result;

/// Upper bound on bleed iterations.
pub const MAX_BLEED_STEPS: u32 = 8;
/// Opacity of each self-composite draw.
pub const BLEED_OPACITY: f32 = 0.35;
/// Shift of each draw, in pixels.
pub const BLEED_SHIFT: f32 = 0.5;

/// Number of bleed iterations for a softness value: `min(8, floor(softness))`.
pub fn bleed_steps(softness: f32) -> u32 {
    if !softness.is_finite() || softness <= 0.0 {
        return 0;
    }
    (softness.floor() as u32).min(MAX_BLEED_STEPS)
}

/// Apply the bleed pass to an RGBA image.
///
/// # Arguments
/// * `image` - RGBA image (height, width, 4)
/// * `softness` - Softness control; `floor(softness)` steps, at most 8
///
/// # Returns
/// New image of the same size
pub fn bleed(image: ArrayView3<u8>, softness: f32) -> Result<Array3<u8>> {
    bleed_with(image, softness, Execution::Parallel)
}

/// [`bleed`] with an explicit row execution strategy.
pub fn bleed_with(image: ArrayView3<u8>, softness: f32, execution: Execution) -> Result<Array3<u8>> {
    let (height, width) = check_rgba(&image)?;
    let steps = bleed_steps(softness);
    if steps == 0 {
        return Ok(image.to_owned());
    }

    let mut canvas = to_premultiplied_f32(&image);
    for step in 0..steps {
        canvas = draw_shifted(&canvas, width, height, BLEED_SHIFT, execution);
        canvas = draw_shifted(&canvas, width, height, -BLEED_SHIFT, execution);
        tracing::trace!(step = step + 1, of = steps, "bleed step");
    }

    rgba_from_vec(from_premultiplied_f32(&canvas), width, height)
}

/// Composite `canvas` over itself, offset by `shift` on both axes.
fn draw_shifted(
    canvas: &[f32],
    width: usize,
    height: usize,
    shift: f32,
    execution: Execution,
) -> Vec<f32> {
    let mut out = vec![0.0f32; canvas.len()];
    fill_rows(&mut out, width * 4, execution, |y, row| {
        for x in 0..width {
            let src = sample_bilinear_transparent(
                canvas,
                width,
                height,
                x as f32 - shift,
                y as f32 - shift,
            );
            let idx = (y * width + x) * 4;
            let dst = &canvas[idx..idx + 4];
            let keep = 1.0 - src[3] * BLEED_OPACITY;
            for c in 0..4 {
                row[x * 4 + c] = src[c] * BLEED_OPACITY + dst[c] * keep;
            }
        }
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn solid(h: usize, w: usize, rgba: [u8; 4]) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((h, w, 4));
        for y in 0..h {
            for x in 0..w {
                for c in 0..4 {
                    img[[y, x, c]] = rgba[c];
                }
            }
        }
        img
    }

    #[test]
    fn test_bleed_steps() {
        assert_eq!(bleed_steps(0.0), 0);
        assert_eq!(bleed_steps(0.99), 0);
        assert_eq!(bleed_steps(3.7), 3);
        assert_eq!(bleed_steps(8.0), 8);
        assert_eq!(bleed_steps(120.0), 8);
        assert_eq!(bleed_steps(-2.0), 0);
        assert_eq!(bleed_steps(f32::NAN), 0);
    }

    #[test]
    fn test_zero_softness_is_copy() {
        let mut img = solid(3, 3, [10, 20, 30, 255]);
        img[[1, 1, 0]] = 250;
        assert_eq!(bleed(img.view(), 0.5).unwrap(), img);
    }

    #[test]
    fn test_uniform_opaque_unchanged() {
        // Partially transparent edge samples still composite to the same color
        let img = solid(6, 5, [120, 60, 200, 255]);
        assert_eq!(bleed(img.view(), 4.0).unwrap(), img);
    }

    #[test]
    fn test_bleed_spreads_bright_pixel() {
        let mut img = solid(7, 7, [0, 0, 0, 255]);
        img[[3, 3, 0]] = 255;
        img[[3, 3, 1]] = 255;
        img[[3, 3, 2]] = 255;

        let out = bleed(img.view(), 1.0).unwrap();
        assert!(out[[3, 3, 0]] < 255, "center should darken");
        assert!(out[[3, 4, 0]] > 0 || out[[4, 4, 0]] > 0, "neighbors should lighten");
        assert!(out[[3, 2, 0]] > 0 || out[[2, 2, 0]] > 0, "both shift directions used");
        // Far corner untouched
        assert_eq!(out[[0, 0, 0]], 0);
    }

    #[test]
    fn test_single_step_exact_bytes() {
        // White | black, one row. Worked in premultiplied space:
        //   +0.5 draw: [1.0, 0.0875] (alpha stays 1.0)
        //   -0.5 draw: [0.271875 * 0.35 + 0.825, 0.021875 * 0.35 + 0.0875 * 0.9125]
        //            = [0.92015625, 0.0875]
        let mut img = solid(1, 2, [0, 0, 0, 255]);
        for c in 0..3 {
            img[[0, 0, c]] = 255;
        }
        let out = bleed(img.view(), 1.0).unwrap();
        assert_eq!(
            out.into_raw_vec_and_offset().0,
            vec![235, 235, 235, 255, 22, 22, 22, 255]
        );
    }

    #[test]
    fn test_step_cap() {
        let mut img = solid(9, 9, [30, 30, 30, 255]);
        img[[4, 4, 1]] = 240;
        let capped = bleed(img.view(), 8.0).unwrap();
        let over = bleed(img.view(), 40.0).unwrap();
        assert_eq!(capped, over);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut img = solid(11, 8, [0, 90, 0, 255]);
        img[[2, 5, 0]] = 255;
        img[[9, 1, 2]] = 255;
        img[[6, 6, 3]] = 0;
        let par = bleed_with(img.view(), 3.0, Execution::Parallel).unwrap();
        let seq = bleed_with(img.view(), 3.0, Execution::Sequential).unwrap();
        assert_eq!(par, seq);
    }
}
