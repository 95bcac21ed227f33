//! Core utilities shared by the dye pipeline stages.
//!
//! This module provides:
//! - RGBA buffer validation
//! - Row-parallel buffer filling (rayon) with a sequential twin
//! - Bilinear sampling (edge-clamped and transparent-outside)
//! - Premultiplied f32 conversion

use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

use crate::error::{DyeError, Result};

/// How a stage walks its output rows.
///
/// Both strategies produce byte-identical output; rows never share state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    #[default]
    Parallel,
    Sequential,
}

/// Reject zero-sized canvases.
pub fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(DyeError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Validate an RGBA image view and return `(height, width)`.
pub fn check_rgba(image: &ArrayView3<u8>) -> Result<(usize, usize)> {
    let (height, width, channels) = image.dim();
    check_dimensions(width, height)?;
    if channels != 4 {
        return Err(DyeError::InvalidDimensions { width, height });
    }
    Ok((height, width))
}

/// Wrap a flat RGBA buffer as a (height, width, 4) array.
pub fn rgba_from_vec(data: Vec<u8>, width: usize, height: usize) -> Result<Array3<u8>> {
    check_dimensions(width, height)?;
    Array3::from_shape_vec((height, width, 4), data)
        .map_err(|_| DyeError::InvalidDimensions { width, height })
}

/// Fill `data` row by row, in parallel.
///
/// `fill` receives the row index and that row's slice of `row_len` elements.
pub fn par_fill_rows<T, F>(data: &mut [T], row_len: usize, fill: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    fill_rows(data, row_len, Execution::Parallel, fill);
}

/// Fill `data` row by row with the requested strategy.
pub fn fill_rows<T, F>(data: &mut [T], row_len: usize, execution: Execution, fill: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if row_len == 0 {
        return;
    }
    match execution {
        Execution::Parallel => data
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| fill(y, row)),
        Execution::Sequential => data
            .chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| fill(y, row)),
    }
}

/// Bilinear RGBA sample with edge clamping.
///
/// `x`/`y` are in pixel-index space (integer = pixel center).
pub fn sample_bilinear_clamped(image: &ArrayView3<u8>, x: f32, y: f32) -> [f32; 4] {
    let (height, width, _) = image.dim();
    let x = x.clamp(0.0, (width - 1) as f32);
    let y = y.clamp(0.0, (height - 1) as f32);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let mut out = [0.0f32; 4];
    for (c, value) in out.iter_mut().enumerate() {
        let v00 = image[[y0, x0, c]] as f32;
        let v10 = image[[y0, x1, c]] as f32;
        let v01 = image[[y1, x0, c]] as f32;
        let v11 = image[[y1, x1, c]] as f32;
        *value = v00 * (1.0 - fx) * (1.0 - fy)
            + v10 * fx * (1.0 - fy)
            + v01 * (1.0 - fx) * fy
            + v11 * fx * fy;
    }
    out
}

/// Bilinear sample of a premultiplied f32 RGBA buffer; outside pixels are transparent.
pub fn sample_bilinear_transparent(
    data: &[f32],
    width: usize,
    height: usize,
    x: f32,
    y: f32,
) -> [f32; 4] {
    let fetch = |xi: isize, yi: isize| -> [f32; 4] {
        if xi < 0 || yi < 0 || xi >= width as isize || yi >= height as isize {
            return [0.0; 4];
        }
        let idx = (yi as usize * width + xi as usize) * 4;
        [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]
    };

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (xi, yi) = (x0 as isize, y0 as isize);

    let p00 = fetch(xi, yi);
    let p10 = fetch(xi + 1, yi);
    let p01 = fetch(xi, yi + 1);
    let p11 = fetch(xi + 1, yi + 1);

    let mut out = [0.0f32; 4];
    for c in 0..4 {
        out[c] = p00[c] * (1.0 - fx) * (1.0 - fy)
            + p10[c] * fx * (1.0 - fy)
            + p01[c] * (1.0 - fx) * fy
            + p11[c] * fx * fy;
    }
    out
}

/// Convert an RGBA u8 image to a flat premultiplied f32 buffer (0.0-1.0).
pub fn to_premultiplied_f32(image: &ArrayView3<u8>) -> Vec<f32> {
    let (height, width, _) = image.dim();
    let mut out = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let a = image[[y, x, 3]] as f32 / 255.0;
            for c in 0..3 {
                out.push(image[[y, x, c]] as f32 / 255.0 * a);
            }
            out.push(a);
        }
    }
    out
}

/// Convert a flat premultiplied f32 buffer back to straight-alpha RGBA u8.
pub fn from_premultiplied_f32(data: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for px in data.chunks_exact(4) {
        let a = px[3].clamp(0.0, 1.0);
        for &c in &px[..3] {
            let straight = if a > 0.0 { c / a } else { 0.0 };
            out.push((straight * 255.0).round().clamp(0.0, 255.0) as u8);
        }
        out.push((a * 255.0).round() as u8);
    }
    out
}
