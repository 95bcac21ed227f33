//! Dye-bath techniques: ombre, dip dye, space dye.
//!
//! No resist at all; the pattern comes from how long or how unevenly each
//! part of the cloth sat in the bath.

use super::MaskSample;
use crate::noise::hash_noise_2d;

/// Height of the dip line, as a fraction of the canvas.
const DIP_LEVEL: f32 = 0.55;
/// Maximum vertical wander of the dip line.
const DIP_JITTER: f32 = 0.06;
/// Slope of the wicking ramp above the dip line.
const DIP_BLEED: f32 = 10.0;

/// Vertical gradient, lightest at the top.
pub fn ombre(s: &MaskSample) -> f32 {
    s.ny
}

/// Hard dip line with a short capillary bleed above it.
pub fn dip_dye(s: &MaskSample) -> f32 {
    let jitter = (hash_noise_2d(s.nx * 6.0 * s.scale, 0.5, s.seed_offset(7)) - 0.5) * DIP_JITTER;
    let edge = DIP_LEVEL + jitter;

    if s.ny >= edge {
        1.0
    } else {
        (1.0 - (edge - s.ny) * DIP_BLEED).max(0.0)
    }
}

/// Irregular diagonal color runs along the yarn.
pub fn space_dye(s: &MaskSample) -> f32 {
    let across = (s.nx + s.ny) * 12.0 * s.scale;
    let along = (s.nx - s.ny) * 1.5 * s.scale;
    let streak = 0.25 + 0.9 * hash_noise_2d(across, along, s.seed_offset(91));
    streak.min(1.0)
}
