//! Tied resists: tie-dye spiral, bandhani dots, leheriya.

use std::f32::consts::TAU;

use super::{wave, MaskSample};
use crate::noise::SeededStream;

/// Dye strength inside a tied spiral band.
const SPIRAL_RESIST: f32 = 0.1;

/// Bandhani cell edge in pixels at scale 1.0.
const BANDHANI_CELL: f32 = 28.0;
const BANDHANI_CORE: f32 = 0.11;
const BANDHANI_HALO: f32 = 0.19;

/// Spiral arms around the canvas center.
///
/// Phase is `3 * angle + 18 * scale * radius` turns; crests above 0.72 are
/// the tied-off bands.
pub fn tie_dye_spiral(s: &MaskSample) -> f32 {
    let dx = s.nx - 0.5;
    let dy = s.ny - 0.5;
    let radius = (dx * dx + dy * dy).sqrt();
    let angle = dy.atan2(dx);

    let amplitude = wave(angle * 3.0 + radius * 18.0 * s.scale * TAU);
    if amplitude > 0.72 {
        SPIRAL_RESIST
    } else {
        1.0
    }
}

/// Tiny bound dots, one per grid cell, each with a pale halo.
///
/// The dot center is jittered inside its cell by the cell's own stream, so
/// the layout depends only on `(cell, seed)`.
pub fn bandhani_dots(s: &MaskSample) -> f32 {
    let cell = (BANDHANI_CELL / s.scale).max(4.0);
    let cx = (s.px / cell).floor();
    let cy = (s.py / cell).floor();

    let mut stream = SeededStream::for_cell(cx as i32, cy as i32, s.seed);
    let center_x = (cx + 0.3 + 0.4 * stream.next_f32()) * cell;
    let center_y = (cy + 0.3 + 0.4 * stream.next_f32()) * cell;

    let dist = ((s.px - center_x).powi(2) + (s.py - center_y).powi(2)).sqrt();
    if dist < BANDHANI_CORE * cell {
        0.06
    } else if dist < BANDHANI_HALO * cell {
        0.35
    } else {
        1.0
    }
}

/// Diagonal wave bands from rolled-and-tied cloth.
pub fn leheriya(s: &MaskSample) -> f32 {
    if wave((s.nx + s.ny) * 14.0 * s.scale * TAU) > 0.55 {
        1.0
    } else {
        0.25
    }
}
