//! Automatic border removal.
//!
//! Uploaded photos often carry a flat background or scanner border. Dyeing
//! that border produces a large flat slab of color, so it is eroded away
//! before any technique is applied:
//!
//! 1. Sample the four edges sparsely (stride `max(1, min(w, h) / 60)`).
//! 2. Average the samples into a background estimate.
//! 3. Move each side inward while every sampled pixel of its row/column is
//!    opaque (`alpha > 10`) and within `tolerance` (Euclidean RGB distance)
//!    of the background.
//! 4. If the remaining width or height would be below 25% of the original,
//!    keep the original image.
//!
//! The four sides are independent and are scanned concurrently. Autocrop
//! never fails: odd input comes back unchanged.

use ndarray::{s, Array3, ArrayView3};
use serde::{Deserialize, Serialize};

/// Default RGB distance for a pixel to count as background.
pub const DEFAULT_TOLERANCE: f32 = 18.0;
/// Largest meaningful tolerance (distance from black to white).
pub const MAX_TOLERANCE: f32 = 441.7;
/// Minimum fraction of each dimension a crop must keep.
pub const MIN_KEEP_FRACTION: f32 = 0.25;
/// Pixels at or below this alpha never count as background.
const ALPHA_FLOOR: u8 = 10;

/// Autocrop configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocropOptions {
    /// Euclidean RGB distance tolerated between border pixels and the background
    pub tolerance: f32,
}

impl Default for AutocropOptions {
    fn default() -> Self {
        Self { tolerance: DEFAULT_TOLERANCE }
    }
}

impl AutocropOptions {
    /// Tolerance clamped to `0..=MAX_TOLERANCE` (non-finite -> default).
    pub fn clamped_tolerance(&self) -> f32 {
        clamp_tolerance(self.tolerance)
    }

    /// Run [`autocrop_detailed`] with these options.
    pub fn apply(&self, image: ArrayView3<u8>) -> AutocropResult {
        autocrop_detailed(image, self.tolerance)
    }
}

/// Inclusive pixel bounds of the retained region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBounds {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl CropBounds {
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            left: 0,
            top: 0,
            right: width.saturating_sub(1),
            bottom: height.saturating_sub(1),
        }
    }

    pub fn width(&self) -> usize {
        self.right + 1 - self.left
    }

    pub fn height(&self) -> usize {
        self.bottom + 1 - self.top
    }
}

/// Autocrop result with metadata.
#[derive(Debug, Clone)]
pub struct AutocropResult {
    /// Cropped image, or a copy of the original when nothing was removed
    pub image: Array3<u8>,
    /// Bounds of `image` within the original
    pub bounds: CropBounds,
    /// Estimated background color (R, G, B)
    pub background: [f32; 3],
    /// Whether any border was removed
    pub cropped: bool,
}

/// Sparse sampling stride for an image of the given size.
pub fn sample_stride(width: usize, height: usize) -> usize {
    (width.min(height) / 60).max(1)
}

fn clamp_tolerance(tolerance: f32) -> f32 {
    if tolerance.is_finite() {
        tolerance.clamp(0.0, MAX_TOLERANCE)
    } else {
        DEFAULT_TOLERANCE
    }
}

/// Read a pixel as RGBA; 3-channel images are treated as opaque.
#[inline]
fn pixel(image: &ArrayView3<u8>, y: usize, x: usize) -> [u8; 4] {
    let alpha = if image.dim().2 >= 4 { image[[y, x, 3]] } else { 255 };
    [image[[y, x, 0]], image[[y, x, 1]], image[[y, x, 2]], alpha]
}

/// Average color of the sparse edge samples.
pub fn estimate_background(image: &ArrayView3<u8>, stride: usize) -> [f32; 3] {
    let (height, width, _) = image.dim();
    let mut sum = [0.0f64; 3];
    let mut count = 0usize;

    let mut add = |y: usize, x: usize| {
        let p = pixel(image, y, x);
        for c in 0..3 {
            sum[c] += p[c] as f64;
        }
        count += 1;
    };

    for x in (0..width).step_by(stride) {
        add(0, x);
        add(height - 1, x);
    }
    for y in (0..height).step_by(stride) {
        add(y, 0);
        add(y, width - 1);
    }

    let n = count.max(1) as f64;
    [(sum[0] / n) as f32, (sum[1] / n) as f32, (sum[2] / n) as f32]
}

struct BorderTest<'a, 'b> {
    image: &'a ArrayView3<'b, u8>,
    background: [f32; 3],
    tolerance_sq: f32,
    stride: usize,
}

impl BorderTest<'_, '_> {
    #[inline]
    fn matches(&self, y: usize, x: usize) -> bool {
        let p = pixel(self.image, y, x);
        if p[3] <= ALPHA_FLOOR {
            return false;
        }
        let dist_sq: f32 = (0..3)
            .map(|c| (p[c] as f32 - self.background[c]).powi(2))
            .sum();
        dist_sq <= self.tolerance_sq
    }

    fn row_is_background(&self, y: usize) -> bool {
        let width = self.image.dim().1;
        (0..width).step_by(self.stride).all(|x| self.matches(y, x))
    }

    fn column_is_background(&self, x: usize) -> bool {
        let height = self.image.dim().0;
        (0..height).step_by(self.stride).all(|y| self.matches(y, x))
    }
}

/// Remove a uniform border from an RGBA image.
///
/// # Arguments
/// * `image` - RGBA (or RGB) image (height, width, channels)
/// * `tolerance` - RGB distance tolerated as background (UI range 5-60, default 18)
///
/// # Returns
/// Cropped image, or an unchanged copy when no border is found or the crop
/// would keep less than 25% of either dimension
pub fn autocrop(image: ArrayView3<u8>, tolerance: f32) -> Array3<u8> {
    autocrop_detailed(image, tolerance).image
}

/// Remove a uniform border, reporting bounds and the background estimate.
pub fn autocrop_detailed(image: ArrayView3<u8>, tolerance: f32) -> AutocropResult {
    let (height, width, channels) = image.dim();
    let unchanged = |background: [f32; 3]| AutocropResult {
        image: image.to_owned(),
        bounds: CropBounds::full(width, height),
        background,
        cropped: false,
    };

    if width == 0 || height == 0 || channels < 3 {
        tracing::debug!(width, height, channels, "autocrop skipped: unsupported image");
        return unchanged([0.0; 3]);
    }

    let stride = sample_stride(width, height);
    let background = estimate_background(&image, stride);
    let tolerance = clamp_tolerance(tolerance);
    let test = BorderTest {
        image: &image,
        background,
        tolerance_sq: tolerance * tolerance,
        stride,
    };

    let ((top, bottom), (left, right)) = rayon::join(
        || {
            rayon::join(
                || (0..height).find(|&y| !test.row_is_background(y)),
                || (0..height).rev().find(|&y| !test.row_is_background(y)),
            )
        },
        || {
            rayon::join(
                || (0..width).find(|&x| !test.column_is_background(x)),
                || (0..width).rev().find(|&x| !test.column_is_background(x)),
            )
        },
    );

    let (Some(top), Some(bottom), Some(left), Some(right)) = (top, bottom, left, right) else {
        tracing::debug!(?background, tolerance, "autocrop kept original: no content found");
        return unchanged(background);
    };

    let bounds = CropBounds { left, top, right, bottom };
    let too_narrow = (bounds.width() as f32) < width as f32 * MIN_KEEP_FRACTION;
    let too_short = (bounds.height() as f32) < height as f32 * MIN_KEEP_FRACTION;
    if too_narrow || too_short {
        tracing::debug!(?bounds, width, height, "autocrop kept original: crop below 25% guard");
        return unchanged(background);
    }

    if bounds == CropBounds::full(width, height) {
        return unchanged(background);
    }

    tracing::debug!(?bounds, ?background, "autocrop removed border");
    AutocropResult {
        image: image.slice(s![top..=bottom, left..=right, ..]).to_owned(),
        bounds,
        background,
        cropped: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed(size: usize, border: usize, frame: [u8; 3], fill: [u8; 3]) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((size, size, 4));
        for y in 0..size {
            for x in 0..size {
                let inside = (border..size - border).contains(&x) && (border..size - border).contains(&y);
                let rgb = if inside { fill } else { frame };
                for c in 0..3 {
                    img[[y, x, c]] = rgb[c];
                }
                img[[y, x, 3]] = 255;
            }
        }
        img
    }

    #[test]
    fn test_black_border_removed() {
        let mut img = framed(100, 10, [0, 0, 0], [255, 255, 255]);
        for y in 40..60 {
            for x in 40..60 {
                img[[y, x, 0]] = 200;
                img[[y, x, 1]] = 30;
                img[[y, x, 2]] = 30;
            }
        }

        let result = autocrop_detailed(img.view(), DEFAULT_TOLERANCE);
        assert!(result.cropped);
        assert_eq!(result.bounds, CropBounds { left: 10, top: 10, right: 89, bottom: 89 });
        assert_eq!(result.image.dim(), (80, 80, 4));
        assert_eq!(result.background, [0.0, 0.0, 0.0]);
        assert_eq!(result.image[[0, 0, 0]], 255);
    }

    #[test]
    fn test_no_border_unchanged() {
        // Horizontal gradient: no row is uniform, edge columns are far from the mean
        let mut img = Array3::<u8>::zeros((50, 64, 4));
        for y in 0..50 {
            for x in 0..64 {
                let v = (x * 4) as u8;
                img[[y, x, 0]] = v;
                img[[y, x, 1]] = v;
                img[[y, x, 2]] = v;
                img[[y, x, 3]] = 255;
            }
        }
        let result = autocrop_detailed(img.view(), DEFAULT_TOLERANCE);
        assert!(!result.cropped);
        assert_eq!(result.image, img);
    }

    #[test]
    fn test_idempotent_after_crop() {
        let mut img = framed(100, 10, [0, 0, 0], [255, 255, 255]);
        // Content touching the inner edge of the frame on every side
        for y in 10..90 {
            for x in 10..90 {
                img[[y, x, 0]] = (x * 3) as u8;
                img[[y, x, 2]] = (y * 3) as u8;
            }
        }
        let once = autocrop(img.view(), DEFAULT_TOLERANCE);
        let twice = autocrop(once.view(), DEFAULT_TOLERANCE);
        assert_eq!(once.dim(), (80, 80, 4));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_uniform_image_kept() {
        let img = framed(40, 0, [9, 9, 9], [9, 9, 9]);
        let result = autocrop_detailed(img.view(), DEFAULT_TOLERANCE);
        assert!(!result.cropped);
        assert_eq!(result.image, img);
    }

    #[test]
    fn test_guard_rejects_tiny_content() {
        let mut img = framed(100, 0, [240, 240, 240], [240, 240, 240]);
        for y in 48..53 {
            for x in 48..53 {
                img[[y, x, 0]] = 0;
            }
        }
        let result = autocrop_detailed(img.view(), DEFAULT_TOLERANCE);
        assert!(!result.cropped);
        assert_eq!(result.image.dim(), (100, 100, 4));
    }

    #[test]
    fn test_transparent_border_not_background() {
        let mut img = framed(60, 6, [0, 0, 0], [90, 160, 90]);
        for y in 0..60 {
            for x in 0..60 {
                if !(6..54).contains(&x) || !(6..54).contains(&y) {
                    img[[y, x, 3]] = 0;
                }
            }
        }
        assert!(!autocrop_detailed(img.view(), DEFAULT_TOLERANCE).cropped);
    }

    #[test]
    fn test_tolerance_controls_erosion() {
        // Outer columns are 30 red units off the gray frame
        let mut img = framed(90, 15, [100, 100, 100], [250, 20, 20]);
        for y in 0..90 {
            for x in [0usize, 89] {
                img[[y, x, 0]] = 130;
            }
        }
        assert!(!autocrop_detailed(img.view(), 5.0).cropped);
        assert!(autocrop_detailed(img.view(), 60.0).cropped);
    }

    #[test]
    fn test_rgb_input_and_empty_input() {
        let img = Array3::<u8>::zeros((0, 0, 4));
        assert_eq!(autocrop(img.view(), 18.0).dim(), (0, 0, 4));

        let mut rgb = Array3::<u8>::zeros((40, 40, 3));
        for y in 8..32 {
            for x in 8..32 {
                rgb[[y, x, 1]] = 255;
            }
        }
        assert_eq!(autocrop(rgb.view(), 18.0).dim(), (24, 24, 3));
    }

    #[test]
    fn test_sample_stride() {
        assert_eq!(sample_stride(10, 10), 1);
        assert_eq!(sample_stride(600, 1200), 10);
    }

    #[test]
    fn test_options_from_json_and_clamp() {
        let opts: AutocropOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, AutocropOptions::default());

        let opts: AutocropOptions = serde_json::from_str(r#"{"tolerance": 1000}"#).unwrap();
        assert_eq!(opts.clamped_tolerance(), MAX_TOLERANCE);
        assert_eq!(AutocropOptions { tolerance: f32::NAN }.clamped_tolerance(), DEFAULT_TOLERANCE);

        let img = framed(40, 5, [0, 0, 0], [200, 200, 200]);
        assert_eq!(AutocropOptions::default().apply(img.view()).image.dim(), (30, 30, 4));
    }
}
