//! Shibori resists: itajime, arashi, kumo, nui, kanoko.

use std::f32::consts::TAU;

use super::{wave, MaskSample};
use crate::noise::hash_noise_2d;

/// Itajime clamp block edge in pixels at scale 1.0.
const ITAJIME_CELL: f32 = 80.0;
/// Fraction of the block, measured from its edge, that the dye reaches.
const ITAJIME_EDGE: f32 = 0.22;
/// Width of the bleed ramp past the dyed edge, as a fraction of the block.
const ITAJIME_RAMP: f32 = 0.1;

/// Arashi stripe period in pixels at scale 1.0.
const ARASHI_PERIOD: f32 = 18.0;

/// Folded-and-clamped blocks: dyed edges, pale interiors.
pub fn itajime(s: &MaskSample) -> f32 {
    let cell = (ITAJIME_CELL / s.scale).max(8.0);
    let lx = s.px.rem_euclid(cell);
    let ly = s.py.rem_euclid(cell);
    let dist = lx.min(cell - lx).min(ly).min(cell - ly);

    let edge = ITAJIME_EDGE * cell;
    if dist > edge {
        let bleed = (1.0 - (dist - edge) / (ITAJIME_RAMP * cell)).clamp(0.0, 1.0);
        0.18 + 0.5 * bleed
    } else {
        1.0
    }
}

/// Pole-wrapped diagonal stripes with rough, thread-compressed edges.
pub fn arashi(s: &MaskSample) -> f32 {
    let period = (ARASHI_PERIOD / s.scale).max(2.0);
    let roughness = (hash_noise_2d(s.px / 6.0, s.py / 6.0, s.seed_offset(31)) - 0.5) * 1.2;
    let stripe = wave((s.px + s.py) / period * TAU + roughness);

    if stripe > 0.58 {
        1.0
    } else {
        0.22
    }
}

/// Spider-web rings around a wandering center.
pub fn kumo(s: &MaskSample) -> f32 {
    let cx = 0.5 + (hash_noise_2d(s.nx * 3.0, s.ny * 3.0, s.seed_offset(41)) - 0.5) * 0.2;
    let cy = 0.5 + (hash_noise_2d(s.nx * 3.0, s.ny * 3.0, s.seed_offset(42)) - 0.5) * 0.2;
    let dist = ((s.nx - cx).powi(2) + (s.ny - cy).powi(2)).sqrt();

    if wave(dist * 22.0 * s.scale * TAU) > 0.72 {
        0.2
    } else {
        1.0
    }
}

/// Gathered running-stitch lines.
pub fn nui(s: &MaskSample) -> f32 {
    let phase = (hash_noise_2d(s.nx * 40.0, s.ny * 40.0, s.seed_offset(53)) - 0.5) * 1.5;
    let line = wave(s.ny * 26.0 * s.scale * TAU + phase);

    if line > 0.62 {
        0.25
    } else {
        1.0
    }
}

/// Scattered bound spots from a low-frequency field, softened by fiber bleed.
pub fn kanoko(s: &MaskSample) -> f32 {
    let field = hash_noise_2d(s.nx * 10.0 * s.scale, s.ny * 10.0 * s.scale, s.seed_offset(61));
    let fiber = 0.85 + 0.15 * hash_noise_2d(s.px / 3.0, s.py / 3.0, s.seed_offset(67));
    let base = if field > 0.62 { 0.2 } else { 1.0 };
    base * fiber
}
