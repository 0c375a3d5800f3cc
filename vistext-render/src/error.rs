//! Typed error types for vistext-render.
//!
//! Every variant corresponds to a failure that aborts an atlas build. A
//! single glyph that fails to rasterize is not an error here: it is logged
//! and left absent from the glyph table.

use std::path::PathBuf;

use thiserror::Error;
use vistext_fonts::RasterError;

/// Reasons an atlas build can fail.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// No GPU texture backend is available yet.
    #[error("Rendering subsystem not initialized")]
    PlatformNotReady,

    /// The font file is missing, corrupt, or in an unsupported format.
    #[error("Cannot open font file '{}': {source}", path.display())]
    FontOpen {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying rasterizer error.
        #[source]
        source: RasterError,
    },

    /// The face rejected the requested point size.
    #[error("Cannot set font height: {point_size} pts: {source}")]
    SizeRequest {
        /// Requested size in points.
        point_size: u32,
        /// Underlying rasterizer error.
        #[source]
        source: RasterError,
    },

    /// The GPU backend could not allocate the atlas texture.
    #[error("Atlas texture allocation failed: {0}")]
    TextureAllocation(String),
}
