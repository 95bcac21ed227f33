//! Wax resists: batik crackle and batik floral.

use std::f32::consts::TAU;

use super::MaskSample;
use crate::noise::hash_noise_2d;

/// Half-width of a crackle vein around the 0.5 crossing.
const VEIN_WIDTH: f32 = 0.04;

/// Wax crackle: dye seeps into thin veins where two noise fields cross.
///
/// Everything off the veins is treated as open cloth; the veins themselves
/// keep a faint 0.15 tint.
pub fn crackle(s: &MaskSample) -> f32 {
    let coarse = hash_noise_2d(s.nx * 16.0 * s.scale, s.ny * 16.0 * s.scale, s.seed_offset(71));
    let fine = hash_noise_2d(s.nx * 32.0 * s.scale, s.ny * 32.0 * s.scale, s.seed_offset(72));
    let n = 0.5 + 0.5 * (coarse - fine);

    if (n - 0.5).abs() < VEIN_WIDTH {
        0.15
    } else {
        1.0
    }
}

/// Waxed motif lattice from two crossed sinusoids.
pub fn floral(s: &MaskSample) -> f32 {
    let motif = (s.nx * 10.0 * s.scale * TAU).sin() * (s.ny * 8.0 * s.scale * TAU).sin();
    if motif.abs() > 0.72 {
        0.22
    } else {
        1.0
    }
}
