//! Per-pixel and whole-canvas filters of the dye pipeline.
//!
//! ## Image Format
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | RGBA8 | (H, W, 4) | u8 | RGB + alpha, 0-255 |
//!
//! ## Architecture
//!
//! - **Alpha preservation** - the tint never touches alpha
//! - **Thread-safe** - rows are filled in parallel with rayon; output is
//!   identical to a sequential walk
//!
//! ## Filter Categories
//!
//! - **Tint**: luminance-preserving dye tint and mask blend (`tint.rs`)
//! - **Bleed**: iterative half-pixel self-composite softening (`bleed.rs`)

pub mod core;
pub mod tint;
pub mod bleed;

pub use self::core::Execution;
