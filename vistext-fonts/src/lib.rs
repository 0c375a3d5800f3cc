//! Glyph rasterization for the vistext font atlas.
//!
//! This crate provides:
//! - Owned font data with a `'static` swash reference (`FontData`)
//! - The `Rasterizer` trait, the narrow seam the atlas builder consumes
//! - `SwashRasterizer`, the production rasterizer backed by swash
//!
//! # Architecture
//!
//! A rasterizer is process-scoped state: it owns the scaling caches and is
//! passed explicitly into whoever builds an atlas. Faces opened through it are
//! plain owned values; dropping a face closes it.
//!
//! Sizes follow the classic typographic convention: character sizes are given
//! in 1/64 points and resolved to pixels with the display DPI, and glyph
//! advances are reported in 26.6 fixed point.

pub mod error;
pub mod font_data;
pub mod rasterizer;

// Re-export main types for convenience
pub use error::RasterError;
pub use font_data::FontData;
pub use rasterizer::{
    CharSize, Dpi, GlyphBitmap, MAX_PIXELS_PER_EM, Rasterizer, SwashFace, SwashRasterizer,
};
