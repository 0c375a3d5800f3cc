//! The rasterizer seam consumed by the atlas builder.

mod swash_backend;

use std::path::Path;

use crate::error::RasterError;

pub use swash_backend::{SwashFace, SwashRasterizer};

/// Largest pixels-per-em a face accepts (16-bit ppem, as in sfnt hinting).
pub const MAX_PIXELS_PER_EM: f32 = 65535.0;

/// Display resolution in dots per inch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dpi {
    pub horizontal: u32,
    pub vertical: u32,
}

impl Dpi {
    pub const fn new(horizontal: u32, vertical: u32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Same resolution on both axes.
    pub const fn uniform(dpi: u32) -> Self {
        Self::new(dpi, dpi)
    }
}

/// Character size request, in 1/64 points, resolved at a given DPI.
///
/// A zero `width_64ths` means "same as height", matching the usual
/// `set_char_size` convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSize {
    pub width_64ths: u32,
    pub height_64ths: u32,
    pub dpi: Dpi,
}

impl CharSize {
    /// Vertical pixels per em.
    pub fn pixels_per_em_y(&self) -> f32 {
        self.height_64ths as f32 / 64.0 * self.dpi.vertical as f32 / 72.0
    }

    /// Horizontal pixels per em.
    pub fn pixels_per_em_x(&self) -> f32 {
        let width = if self.width_64ths == 0 {
            self.height_64ths
        } else {
            self.width_64ths
        };
        width as f32 / 64.0 * self.dpi.horizontal as f32 / 72.0
    }

    /// Check the request against the limits every face shares.
    pub fn validate(&self) -> Result<(), RasterError> {
        if self.height_64ths == 0 {
            return Err(RasterError::InvalidSize("character height is zero".into()));
        }
        if self.dpi.horizontal == 0 || self.dpi.vertical == 0 {
            return Err(RasterError::InvalidSize(format!(
                "display resolution {}x{} dpi",
                self.dpi.horizontal, self.dpi.vertical
            )));
        }
        let (x, y) = (self.pixels_per_em_x(), self.pixels_per_em_y());
        if !(x.is_finite() && y.is_finite()) || x > MAX_PIXELS_PER_EM || y > MAX_PIXELS_PER_EM {
            return Err(RasterError::InvalidSize(format!(
                "{x}x{y} pixels per em exceeds {MAX_PIXELS_PER_EM}"
            )));
        }
        Ok(())
    }
}

/// One rendered glyph: an 8-bit coverage bitmap plus placement metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub rows: u32,
    /// Horizontal distance from the pen to the left ink edge.
    pub left: i32,
    /// Vertical distance from the baseline up to the top ink edge.
    pub top: i32,
    /// Horizontal pen advance, 26.6 fixed point.
    pub advance_x: i32,
    /// Vertical pen advance, 26.6 fixed point.
    pub advance_y: i32,
    /// `width * rows` coverage bytes, row-major, no row padding.
    pub pixels: Vec<u8>,
}

/// Converts a font file plus character code into bitmaps and metrics.
///
/// Implementations hold whatever library-wide state the rasterizer needs.
/// Faces are owned by the caller and closed when dropped.
pub trait Rasterizer {
    type Face;

    /// Open face 0 of the font file at `path`.
    fn open_face(&mut self, path: &Path) -> Result<Self::Face, RasterError>;

    /// Set the character size subsequent renders use.
    fn set_char_size(&mut self, face: &mut Self::Face, size: CharSize) -> Result<(), RasterError>;

    /// Render `ch` and report its metrics.
    fn render_char(&mut self, face: &Self::Face, ch: char) -> Result<GlyphBitmap, RasterError>;
}
