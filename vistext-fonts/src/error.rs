//! Typed error variants for the vistext-fonts crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by a [`Rasterizer`](crate::Rasterizer).
#[derive(Debug, Error)]
pub enum RasterError {
    /// The font file could not be read from disk.
    #[error("Cannot read font file '{}': {source}", path.display())]
    Io {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The bytes were read but are not a font the rasterizer understands.
    #[error("Unsupported or corrupt font data in '{}'", path.display())]
    InvalidFont {
        /// Path of the rejected file.
        path: PathBuf,
    },

    /// The face rejected the requested character size.
    #[error("Invalid character size: {0}")]
    InvalidSize(String),

    /// A glyph was requested before any character size was set on the face.
    #[error("No character size set on face")]
    NoSizeSet,

    /// A single glyph could not be rendered.
    #[error("Cannot render glyph {ch:?}")]
    GlyphRender {
        /// Character that failed.
        ch: char,
    },
}
