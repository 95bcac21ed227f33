//! Shared image fixtures for integration tests.

#![allow(dead_code)]

use ndarray::Array3;

/// Solid opaque RGBA image.
pub fn solid(width: usize, height: usize, rgb: [u8; 3]) -> Array3<u8> {
    let mut img = Array3::<u8>::zeros((height, width, 4));
    for y in 0..height {
        for x in 0..width {
            img[[y, x, 0]] = rgb[0];
            img[[y, x, 1]] = rgb[1];
            img[[y, x, 2]] = rgb[2];
            img[[y, x, 3]] = 255;
        }
    }
    img
}

/// Square image with a `border`-pixel frame around a filled center.
pub fn framed(size: usize, border: usize, frame: [u8; 3], fill: [u8; 3]) -> Array3<u8> {
    let mut img = solid(size, size, frame);
    for y in border..size - border {
        for x in border..size - border {
            img[[y, x, 0]] = fill[0];
            img[[y, x, 1]] = fill[1];
            img[[y, x, 2]] = fill[2];
        }
    }
    img
}

/// Opaque diagonal gradient with some per-channel variation.
pub fn gradient(width: usize, height: usize) -> Array3<u8> {
    let mut img = Array3::<u8>::zeros((height, width, 4));
    for y in 0..height {
        for x in 0..width {
            img[[y, x, 0]] = (x * 255 / width.max(1)) as u8;
            img[[y, x, 1]] = (y * 255 / height.max(1)) as u8;
            img[[y, x, 2]] = ((x + y) * 127 / (width + height).max(1)) as u8;
            img[[y, x, 3]] = 255;
        }
    }
    img
}

/// RGBA pixel at (x, y).
pub fn pixel(img: &Array3<u8>, x: usize, y: usize) -> [u8; 4] {
    [img[[y, x, 0]], img[[y, x, 1]], img[[y, x, 2]], img[[y, x, 3]]]
}
