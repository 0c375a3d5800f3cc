//! Font atlas text rendering for GPU scientific visualization.
//!
//! The work is split across the workspace crates; this crate ties them
//! together for the `vistext` binary and re-exports the public surface:
//!
//! - [`vistext_config`]: YAML configuration
//! - [`vistext_fonts`]: the rasterizer seam and the swash rasterizer
//! - [`vistext_render`]: the font atlas, text metrics, and texture backends

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;

pub use vistext_config::{Config, LogLevel};
pub use vistext_fonts::{Dpi, Rasterizer, SwashRasterizer};
pub use vistext_render::{
    AtlasBuilder, AtlasError, CpuFontAtlas, FontAtlas, Glyph, GlyphTable, GpuFontAtlas,
    TextExtent,
};
