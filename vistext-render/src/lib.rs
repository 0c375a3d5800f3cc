//! GPU font atlas and text metrics for vistext.
//!
//! This crate provides:
//!
//! - `FontAtlas`: rasterizes the printable ASCII range (codes 32-127) into a
//!   single-row alpha texture and keeps per-glyph placement and metrics
//! - Single-line text measurement from those metrics
//! - Texture backends for wgpu and for plain memory
//! - Display DPI sources (fixed, or queried from a winit window)

pub mod atlas;
pub mod backend;
pub mod dpi;
pub mod error;
pub mod glyph;

// Re-export main public types
pub use atlas::{AtlasBuilder, FONT_SCALE, FontAtlas, LoadedAtlas, SharedFontAtlas};
pub use backend::{
    ATLAS_SAMPLING, AtlasSampling, AtlasTexture, CpuAtlasBackend, CpuTexture, TextureBackend,
    TextureRegion, WgpuAtlasBackend,
};
pub use dpi::{BASE_DPI, Dpi, DpiSource, FixedDpi, dpi_for_scale_factor};
pub use error::AtlasError;
pub use glyph::{FIRST_CODE, GLYPH_PADDING, Glyph, GlyphTable, LAST_CODE, TextExtent};

/// Atlas rasterized with swash and uploaded through wgpu.
pub type GpuFontAtlas = FontAtlas<vistext_fonts::SwashFace, AtlasTexture>;

/// Atlas rasterized with swash and kept in memory.
pub type CpuFontAtlas = FontAtlas<vistext_fonts::SwashFace, CpuTexture>;
