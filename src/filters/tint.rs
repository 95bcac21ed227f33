//! Luminance-preserving dye tint and mask compositing.
//!
//! The tint keeps the source's shading: folds and shadows of the original
//! fabric stay visible through the dye instead of being flattened to a
//! solid color.
//!
//! ```text
//! L      = (0.2126 R + 0.7152 G + 0.0722 B) / 255
//! tinted = dye * (0.35 + 0.65 L)
//! mix    = clamp01(intensity * mask)
//! out    = base * (1 - mix) + tinted * mix      (alpha unchanged)
//! ```

use crate::color::{luminance, DyeColor};

/// Shade applied to the dye at zero luminance.
pub const SHADE_FLOOR: f32 = 0.35;
/// Shade range added at full luminance.
pub const SHADE_RANGE: f32 = 0.65;

/// Dye an RGB triple, keeping its relative brightness.
///
/// # Returns
/// Tinted channels in 0.0-255.0 (not yet rounded)
#[inline]
pub fn tint(base: [u8; 3], dye: DyeColor) -> [f32; 3] {
    let shade = SHADE_FLOOR + SHADE_RANGE * luminance(base[0], base[1], base[2]);
    let [dr, dg, db] = dye.channels();
    [
        (dr as f32 * shade).clamp(0.0, 255.0),
        (dg as f32 * shade).clamp(0.0, 255.0),
        (db as f32 * shade).clamp(0.0, 255.0),
    ]
}

/// Rounded u8 version of [`tint`].
#[inline]
pub fn tint_u8(base: [u8; 3], dye: DyeColor) -> [u8; 3] {
    tint(base, dye).map(|v| v.round() as u8)
}

/// Blend weight for a pixel: `clamp01(intensity * mask)`.
#[inline]
pub fn mix_amount(intensity: f32, mask: f32) -> f32 {
    let mix = intensity * mask;
    if mix.is_nan() {
        0.0
    } else {
        mix.clamp(0.0, 1.0)
    }
}

/// Composite one RGBA pixel toward its dyed color.
///
/// Alpha passes through unchanged.
#[inline]
pub fn composite_pixel(base: [u8; 4], dye: DyeColor, mask: f32, intensity: f32) -> [u8; 4] {
    let mix = mix_amount(intensity, mask);
    let tinted = tint([base[0], base[1], base[2]], dye);

    let mut out = [0u8; 4];
    for c in 0..3 {
        let v = base[c] as f32 * (1.0 - mix) + tinted[c] * mix;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = base[3];
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: DyeColor = DyeColor::new(255, 0, 0);

    #[test]
    fn test_tint_white_is_full_dye() {
        assert_eq!(tint_u8([255, 255, 255], RED), [255, 0, 0]);
    }

    #[test]
    fn test_tint_black_keeps_shade_floor() {
        // 255 * 0.35 = 89.25
        assert_eq!(tint_u8([0, 0, 0], RED), [89, 0, 0]);
    }

    #[test]
    fn test_composite_zero_mix_is_identity() {
        let base = [12, 200, 77, 140];
        assert_eq!(composite_pixel(base, RED, 0.0, 1.0), base);
        assert_eq!(composite_pixel(base, RED, 1.0, 0.0), base);
    }

    #[test]
    fn test_composite_preserves_alpha() {
        let out = composite_pixel([100, 100, 100, 33], RED, 1.0, 1.0);
        assert_eq!(out[3], 33);
    }

    #[test]
    fn test_intensity_monotonic_no_overshoot() {
        let base = [40, 180, 220, 255];
        let dye = DyeColor::new(200, 30, 90);
        let tinted = tint_u8([base[0], base[1], base[2]], dye);
        let mask = 0.8;

        let mut prev = base;
        for step in 0..=20 {
            let intensity = step as f32 / 20.0;
            let out = composite_pixel(base, dye, mask, intensity);
            for c in 0..3 {
                let lo = base[c].min(tinted[c]);
                let hi = base[c].max(tinted[c]);
                assert!((lo..=hi).contains(&out[c]), "channel {c} overshoot: {}", out[c]);
                // Distance to the tinted target never grows
                let d_prev = (prev[c] as i32 - tinted[c] as i32).abs();
                let d_now = (out[c] as i32 - tinted[c] as i32).abs();
                assert!(d_now <= d_prev);
            }
            prev = out;
        }
    }

    #[test]
    fn test_luminance_order_preserved() {
        let dye = DyeColor::new(30, 120, 210);
        let dark = [50, 50, 50, 255];
        let light = [180, 180, 180, 255];
        let dark_out = composite_pixel(dark, dye, 1.0, 1.0);
        let light_out = composite_pixel(light, dye, 1.0, 1.0);
        for c in 0..3 {
            assert!(dark_out[c] <= light_out[c]);
        }
        assert!(
            luminance(dark_out[0], dark_out[1], dark_out[2])
                < luminance(light_out[0], light_out[1], light_out[2])
        );
    }

    #[test]
    fn test_mix_amount_clamps() {
        assert_eq!(mix_amount(2.0, 1.0), 1.0);
        assert_eq!(mix_amount(-1.0, 1.0), 0.0);
        assert_eq!(mix_amount(f32::NAN, 0.5), 0.0);
    }
}
