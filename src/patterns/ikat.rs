//! Yarn resists: ikat warp and ikat weft.
//!
//! The yarn is bound before weaving, so bands come out with frayed,
//! slightly misregistered edges along the thread direction.

use std::f32::consts::TAU;

use super::{wave, MaskSample};
use crate::noise::hash_noise_2d;

const FRAY: f32 = 1.4;

#[inline]
fn soft_band(band: f32) -> f32 {
    0.35 + 0.65 * band
}

/// Vertical bands, 18 cycles across the width, frayed along the warp.
pub fn warp(s: &MaskSample) -> f32 {
    let fray = (hash_noise_2d(s.nx * 8.0, s.ny * 80.0, s.seed_offset(81)) - 0.5) * FRAY;
    soft_band(wave(s.nx * 18.0 * s.scale * TAU + fray))
}

/// Horizontal bands, 16 cycles down the height, frayed along the weft.
pub fn weft(s: &MaskSample) -> f32 {
    let fray = (hash_noise_2d(s.nx * 80.0, s.ny * 8.0, s.seed_offset(83)) - 0.5) * FRAY;
    soft_band(wave(s.ny * 16.0 * s.scale * TAU + fray))
}
