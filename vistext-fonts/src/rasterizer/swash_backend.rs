use std::path::{Path, PathBuf};

use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::{Format, Transform};

use super::{CharSize, GlyphBitmap, Rasterizer};
use crate::error::RasterError;
use crate::font_data::FontData;

/// Rasterizer backed by swash.
///
/// Holds the scale context (outline and hinting caches) shared by every face
/// it renders. Create one per process and pass it to the atlas builder.
pub struct SwashRasterizer {
    context: ScaleContext,
    hinting: bool,
}

impl Default for SwashRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SwashRasterizer {
    pub fn new() -> Self {
        Self {
            context: ScaleContext::new(),
            hinting: true,
        }
    }

    /// Enable or disable outline hinting for subsequent renders.
    pub fn with_hinting(mut self, hinting: bool) -> Self {
        self.hinting = hinting;
        self
    }
}

/// An open face plus the size most recently set on it.
#[derive(Debug)]
pub struct SwashFace {
    font: FontData,
    path: PathBuf,
    scale: Option<FaceScale>,
}

#[derive(Debug, Clone, Copy)]
struct FaceScale {
    pixels_per_em: f32,
    /// Horizontal stretch applied when the display DPI differs per axis.
    stretch_x: f32,
}

impl SwashFace {
    /// Path the face was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn font(&self) -> &FontData {
        &self.font
    }
}

impl Rasterizer for SwashRasterizer {
    type Face = SwashFace;

    fn open_face(&mut self, path: &Path) -> Result<SwashFace, RasterError> {
        let font = FontData::from_file(path)?;
        log::debug!("Opened font face {}", path.display());
        Ok(SwashFace {
            font,
            path: path.to_path_buf(),
            scale: None,
        })
    }

    fn set_char_size(&mut self, face: &mut SwashFace, size: CharSize) -> Result<(), RasterError> {
        size.validate()?;
        let pixels_per_em = size.pixels_per_em_y();
        let stretch_x = size.pixels_per_em_x() / pixels_per_em;
        log::debug!(
            "Face {}: {} px/em (x stretch {}) at {}x{} dpi",
            face.path.display(),
            pixels_per_em,
            stretch_x,
            size.dpi.horizontal,
            size.dpi.vertical
        );
        face.scale = Some(FaceScale {
            pixels_per_em,
            stretch_x,
        });
        Ok(())
    }

    fn render_char(&mut self, face: &SwashFace, ch: char) -> Result<GlyphBitmap, RasterError> {
        let scale = face.scale.ok_or(RasterError::NoSizeSet)?;
        let font = face.font.font_ref;
        // Unmapped characters resolve to glyph 0 (.notdef), which still renders.
        let glyph_id = font.charmap().map(ch);

        let advance = font
            .glyph_metrics(&[])
            .scale(scale.pixels_per_em)
            .advance_width(glyph_id)
            * scale.stretch_x;

        let mut scaler = self
            .context
            .builder(font)
            .size(scale.pixels_per_em)
            .hint(self.hinting)
            .build();

        let transform = (scale.stretch_x != 1.0).then(|| Transform::scale(scale.stretch_x, 1.0));
        let image = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .transform(transform)
            .render(&mut scaler, glyph_id);

        let advance_x = (advance * 64.0).round() as i32;
        match image {
            Some(image) => Ok(GlyphBitmap {
                width: image.placement.width,
                rows: image.placement.height,
                left: image.placement.left,
                top: image.placement.top,
                advance_x,
                advance_y: 0,
                pixels: image.data,
            }),
            // Blank glyphs such as the space have an outline but no coverage.
            None if scaler.scale_outline(glyph_id).is_some() => Ok(GlyphBitmap {
                advance_x,
                ..GlyphBitmap::default()
            }),
            None => Err(RasterError::GlyphRender { ch }),
        }
    }
}
