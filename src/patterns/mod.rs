//! Procedural resist/dye masks for textile techniques.
//!
//! Each technique maps a pixel to a dye strength in [0, 1]:
//! `0.0` = fully resisted (tied, folded, waxed or stitched), `1.0` = fully dyed.
//!
//! ## Technique Families
//!
//! - **Dye baths**: ombre, dip dye, space dye (`dye.rs`)
//! - **Tied**: tie-dye spiral, bandhani dots, leheriya (`tie.rs`)
//! - **Shibori**: itajime, arashi, kumo, nui, kanoko (`shibori.rs`)
//! - **Wax resist**: batik crackle, batik floral (`batik.rs`)
//! - **Yarn resist**: ikat warp, ikat weft (`ikat.rs`)
//!
//! Every technique is multiplied by the same fabric-grain factor so all
//! patterns share one fiber texture. Masks are never stored; they are
//! evaluated per pixel from coordinates, scale and seed only.

pub mod batik;
pub mod dye;
pub mod ikat;
pub mod shibori;
pub mod tie;

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{DyeError, Result};
use crate::filters::core::{check_dimensions, par_fill_rows};
use crate::noise::hash_noise_2d;

/// Smallest accepted pattern scale.
pub const MIN_SCALE: f32 = 0.05;
/// Largest accepted pattern scale.
pub const MAX_SCALE: f32 = 8.0;

/// Clamp a pattern-scale factor to the supported range.
///
/// Non-finite input falls back to 1.0.
#[inline]
pub fn clamp_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        1.0
    }
}

/// Map a pixel index onto [0, 1] so the first and last row/column land on 0 and 1.
#[inline]
pub fn normalize(p: usize, extent: usize) -> f32 {
    if extent > 1 {
        p as f32 / (extent - 1) as f32
    } else {
        0.0
    }
}

// ============================================================================
// Mask input
// ============================================================================

/// Everything a mask function may look at for one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskSample {
    /// Normalized x (0.0 at the left column, 1.0 at the right)
    pub nx: f32,
    /// Normalized y (0.0 at the top row, 1.0 at the bottom)
    pub ny: f32,
    /// Pixel-space x
    pub px: f32,
    /// Pixel-space y
    pub py: f32,
    /// Pattern-scale factor, clamped on construction
    scale: f32,
    pub seed: u32,
}

impl MaskSample {
    pub fn new(nx: f32, ny: f32, px: f32, py: f32, scale: f32, seed: u32) -> Self {
        Self { nx, ny, px, py, scale: clamp_scale(scale), seed }
    }

    /// Sample for pixel `(x, y)` of a `width` x `height` canvas.
    pub fn at_pixel(x: usize, y: usize, width: usize, height: usize, scale: f32, seed: u32) -> Self {
        Self::new(
            normalize(x, width),
            normalize(y, height),
            x as f32,
            y as f32,
            scale,
            seed,
        )
    }

    /// Pattern-scale factor, within `MIN_SCALE..=MAX_SCALE`.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub(crate) fn seed_offset(&self, delta: u32) -> u32 {
        self.seed.wrapping_add(delta)
    }
}

/// Two-level sinusoid normalized to [0, 1].
#[inline]
pub(crate) fn wave(phase: f32) -> f32 {
    0.5 + 0.5 * phase.sin()
}

/// Fiber-level irregularity shared by every technique.
///
/// `0.85 + 0.15 * (0.6 * n1 + 0.4 * n2)` with `n1` sampled at 60x and `n2`
/// at 140x the normalized coordinates.
#[inline]
pub fn fabric_grain(nx: f32, ny: f32, seed: u32) -> f32 {
    let n1 = hash_noise_2d(nx * 60.0, ny * 60.0, seed.wrapping_add(101));
    let n2 = hash_noise_2d(nx * 140.0, ny * 140.0, seed.wrapping_add(211));
    0.85 + 0.15 * (0.6 * n1 + 0.4 * n2)
}

// ============================================================================
// Technique registry
// ============================================================================

/// The closed set of dyeing techniques.
///
/// Serialized as the camelCase key (`"tieDyeSpiral"`, `"shiboriKumo"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Technique {
    Ombre,
    DipDye,
    #[default]
    TieDyeSpiral,
    BandhaniDots,
    Leheriya,
    ShiboriItajime,
    ShiboriArashi,
    ShiboriKumo,
    ShiboriNui,
    ShiboriKanoko,
    BatikCrackle,
    BatikFloral,
    IkatWarp,
    IkatWeft,
    SpaceDye,
}

impl Technique {
    /// All techniques, in catalog order.
    pub const ALL: [Technique; 15] = [
        Technique::Ombre,
        Technique::DipDye,
        Technique::TieDyeSpiral,
        Technique::BandhaniDots,
        Technique::Leheriya,
        Technique::ShiboriItajime,
        Technique::ShiboriArashi,
        Technique::ShiboriKumo,
        Technique::ShiboriNui,
        Technique::ShiboriKanoko,
        Technique::BatikCrackle,
        Technique::BatikFloral,
        Technique::IkatWarp,
        Technique::IkatWeft,
        Technique::SpaceDye,
    ];

    /// Stable string key.
    pub const fn key(self) -> &'static str {
        match self {
            Technique::Ombre => "ombre",
            Technique::DipDye => "dipDye",
            Technique::TieDyeSpiral => "tieDyeSpiral",
            Technique::BandhaniDots => "bandhaniDots",
            Technique::Leheriya => "leheriya",
            Technique::ShiboriItajime => "shiboriItajime",
            Technique::ShiboriArashi => "shiboriArashi",
            Technique::ShiboriKumo => "shiboriKumo",
            Technique::ShiboriNui => "shiboriNui",
            Technique::ShiboriKanoko => "shiboriKanoko",
            Technique::BatikCrackle => "batikCrackle",
            Technique::BatikFloral => "batikFloral",
            Technique::IkatWarp => "ikatWarp",
            Technique::IkatWeft => "ikatWeft",
            Technique::SpaceDye => "spaceDye",
        }
    }

    /// Human-readable label for technique pickers.
    pub const fn label(self) -> &'static str {
        match self {
            Technique::Ombre => "Ombré",
            Technique::DipDye => "Dip Dye",
            Technique::TieDyeSpiral => "Tie-Dye Spiral",
            Technique::BandhaniDots => "Bandhani Dots",
            Technique::Leheriya => "Leheriya Waves",
            Technique::ShiboriItajime => "Itajime Shibori (Fold & Clamp)",
            Technique::ShiboriArashi => "Arashi Shibori (Pole Wrap)",
            Technique::ShiboriKumo => "Kumo Shibori (Spider Web)",
            Technique::ShiboriNui => "Nui Shibori (Stitch Resist)",
            Technique::ShiboriKanoko => "Kanoko Shibori (Bound Resist)",
            Technique::BatikCrackle => "Batik Crackle",
            Technique::BatikFloral => "Batik Floral",
            Technique::IkatWarp => "Ikat (Warp)",
            Technique::IkatWeft => "Ikat (Weft)",
            Technique::SpaceDye => "Space Dye",
        }
    }

    /// `(key, label)` pairs for every technique, in catalog order.
    pub fn catalog() -> Vec<(&'static str, &'static str)> {
        Self::ALL.iter().map(|t| (t.key(), t.label())).collect()
    }

    /// Technique-specific strength before the fabric grain is applied.
    pub fn base_mask(self, s: &MaskSample) -> f32 {
        match self {
            Technique::Ombre => dye::ombre(s),
            Technique::DipDye => dye::dip_dye(s),
            Technique::TieDyeSpiral => tie::tie_dye_spiral(s),
            Technique::BandhaniDots => tie::bandhani_dots(s),
            Technique::Leheriya => tie::leheriya(s),
            Technique::ShiboriItajime => shibori::itajime(s),
            Technique::ShiboriArashi => shibori::arashi(s),
            Technique::ShiboriKumo => shibori::kumo(s),
            Technique::ShiboriNui => shibori::nui(s),
            Technique::ShiboriKanoko => shibori::kanoko(s),
            Technique::BatikCrackle => batik::crackle(s),
            Technique::BatikFloral => batik::floral(s),
            Technique::IkatWarp => ikat::warp(s),
            Technique::IkatWeft => ikat::weft(s),
            Technique::SpaceDye => dye::space_dye(s),
        }
    }

    /// Final dye strength in [0, 1], fabric grain included.
    pub fn mask(self, s: &MaskSample) -> f32 {
        let strength = self.base_mask(s) * fabric_grain(s.nx, s.ny, s.seed);
        if strength.is_nan() {
            0.0
        } else {
            strength.clamp(0.0, 1.0)
        }
    }

    /// Dye strength from raw coordinates.
    pub fn mask_at(self, nx: f32, ny: f32, px: f32, py: f32, scale: f32, seed: u32) -> f32 {
        self.mask(&MaskSample::new(nx, ny, px, py, scale, seed))
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Technique {
    type Err = DyeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.key() == s)
            .ok_or_else(|| DyeError::UnknownTechnique(s.to_string()))
    }
}

// ============================================================================
// Mask preview
// ============================================================================

/// Evaluate a technique's mask over a whole canvas.
///
/// # Returns
/// Array of shape (height, width) with values 0.0-1.0
pub fn render_mask(
    technique: Technique,
    width: usize,
    height: usize,
    scale: f32,
    seed: u32,
) -> Result<Array2<f32>> {
    check_dimensions(width, height)?;
    let scale = clamp_scale(scale);

    let mut data = vec![0.0f32; width * height];
    par_fill_rows(&mut data, width, |y, row| {
        for (x, value) in row.iter_mut().enumerate() {
            *value = technique.mask(&MaskSample::at_pixel(x, y, width, height, scale, seed));
        }
    });

    Array2::from_shape_vec((height, width), data)
        .map_err(|_| DyeError::InvalidDimensions { width, height })
}
