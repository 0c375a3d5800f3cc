//! Font atlas: rasterizes the printable ASCII range into one texture.
//!
//! The atlas is a single row of glyph bitmaps laid out left to right. Every
//! bitmap sits inside a one-pixel transparent border so nearest sampling at a
//! cell edge never picks up a neighbour:
//!
//! ```text
//!  x=0                 x=w0+2
//!  +-----------------+ +-------------+
//!  | . . . . . . . . | | . . . . . . |
//!  | . [ bitmap 0 ] .| | .[ bmp 1 ] . |  ...
//!  | . . . . . . . . | | . . . . . . |
//!  +-----------------+ +-------------+
//! ```
//!
//! A rebuild happens into a fresh [`LoadedAtlas`]; the previous one is only
//! replaced once the new one is complete, so a failed reload keeps the old
//! font usable.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use vistext_fonts::{CharSize, GlyphBitmap, RasterError, Rasterizer};

use crate::backend::{TextureBackend, TextureRegion};
use crate::dpi::DpiSource;
use crate::error::AtlasError;
use crate::glyph::{FIRST_CODE, GLYPH_PADDING, Glyph, GlyphTable, LAST_CODE, TextExtent};

/// Point sizes are requested as `point_size * FONT_SCALE` 64ths of a point.
pub const FONT_SCALE: u32 = 72;

/// An atlas shared across threads. The lock guards the texture and the glyph
/// table together.
pub type SharedFontAtlas<F, T> = Arc<Mutex<FontAtlas<F, T>>>;

/// Everything one successful build produced.
///
/// Owns the rasterizer face and the texture together; dropping this value
/// releases both.
pub struct LoadedAtlas<F, T> {
    face: F,
    texture: T,
    width: u32,
    height: u32,
    glyphs: GlyphTable,
    font_path: PathBuf,
    point_size: u32,
}

impl<F, T> LoadedAtlas<F, T> {
    pub fn face(&self) -> &F {
        &self.face
    }

    pub fn texture(&self) -> &T {
        &self.texture
    }

    /// Atlas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Atlas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    pub fn point_size(&self) -> u32 {
        self.point_size
    }
}

/// The collaborators a build needs, passed in explicitly.
///
/// `gpu` is `None` until the rendering subsystem exists; building before then
/// fails with [`AtlasError::PlatformNotReady`].
pub struct AtlasBuilder<'a, R, G> {
    rasterizer: &'a mut R,
    gpu: Option<&'a G>,
    dpi: &'a dyn DpiSource,
}

impl<'a, R, G> AtlasBuilder<'a, R, G>
where
    R: Rasterizer,
    G: TextureBackend,
{
    pub fn new(rasterizer: &'a mut R, gpu: Option<&'a G>, dpi: &'a dyn DpiSource) -> Self {
        Self {
            rasterizer,
            gpu,
            dpi,
        }
    }

    /// Build a complete atlas for `path` at `point_size` points.
    pub fn build(
        &mut self,
        path: &Path,
        point_size: u32,
    ) -> Result<LoadedAtlas<R::Face, G::Texture>, AtlasError> {
        let Some(gpu) = self.gpu else {
            log::error!("Cannot load font {}: rendering not initialized", path.display());
            return Err(AtlasError::PlatformNotReady);
        };

        let mut face = self.rasterizer.open_face(path).map_err(|source| {
            log::error!("Cannot open font file: {}: {}", path.display(), source);
            AtlasError::FontOpen {
                path: path.to_path_buf(),
                source,
            }
        })?;

        // On error `face` drops here, closing it.
        self.set_size(&mut face, point_size)?;

        let bitmaps = self.rasterize_range(&face);
        let width = bitmaps
            .iter()
            .fold(0u32, |w, (_, b)| w.saturating_add(b.width + GLYPH_PADDING));
        let height = bitmaps.iter().map(|(_, b)| b.rows).max().unwrap_or(0) + GLYPH_PADDING;

        let mut texture = gpu.create_alpha_texture(width, height).inspect_err(|e| {
            log::error!("Cannot create atlas texture for {}: {}", path.display(), e);
        })?;

        let mut glyphs = GlyphTable::new();
        let mut x = 0u32;
        for (code, bitmap) in &bitmaps {
            let region = TextureRegion {
                x: x + 1,
                y: 1,
                width: bitmap.width,
                height: bitmap.rows,
            };
            gpu.write_alpha_region(&mut texture, region, &bitmap.pixels);
            glyphs.insert(
                *code,
                Glyph {
                    width: bitmap.width + GLYPH_PADDING,
                    height: bitmap.rows + GLYPH_PADDING,
                    bearing_x: bitmap.left,
                    bearing_y: bitmap.top,
                    advance_x: bitmap.advance_x >> 6,
                    advance_y: bitmap.advance_y >> 6,
                    atlas_offset_u: (x as f64 / width as f64) as f32,
                },
            );
            x += bitmap.width + GLYPH_PADDING;
        }

        log::info!(
            "Built font atlas for {} at {} pt: {}x{} px, {} glyphs",
            path.display(),
            point_size,
            width,
            height,
            glyphs.present_count()
        );

        Ok(LoadedAtlas {
            face,
            texture,
            width,
            height,
            glyphs,
            font_path: path.to_path_buf(),
            point_size,
        })
    }

    fn set_size(&mut self, face: &mut R::Face, point_size: u32) -> Result<(), AtlasError> {
        let fail = |source: RasterError| {
            log::error!("Cannot set font height: {} pts: {}", point_size, source);
            AtlasError::SizeRequest { point_size, source }
        };
        if point_size == 0 {
            return Err(fail(RasterError::InvalidSize(
                "point size must be at least 1".into(),
            )));
        }
        let dpi = self.dpi.display_dpi();
        let size = CharSize {
            width_64ths: 0,
            height_64ths: point_size.saturating_mul(FONT_SCALE),
            dpi,
        };
        self.rasterizer.set_char_size(face, size).map_err(fail)
    }

    /// Render every code in range, keeping the ones that succeed.
    ///
    /// The bitmaps are reused for placement so the texture is always filled
    /// with exactly what was measured.
    fn rasterize_range(&mut self, face: &R::Face) -> Vec<(u8, GlyphBitmap)> {
        let mut bitmaps = Vec::with_capacity((LAST_CODE - FIRST_CODE + 1) as usize);
        for code in FIRST_CODE..=LAST_CODE {
            let ch = char::from(code);
            match self.rasterizer.render_char(face, ch) {
                Ok(bitmap) if bitmap_len(&bitmap) == Some(bitmap.pixels.len()) => {
                    bitmaps.push((code, bitmap));
                }
                Ok(bitmap) => log::warn!(
                    "Cannot load glyph {:?}: {} bytes for a {}x{} bitmap",
                    ch,
                    bitmap.pixels.len(),
                    bitmap.width,
                    bitmap.rows
                ),
                Err(e) => log::warn!("Cannot load glyph {:?}: {}", ch, e),
            }
        }
        bitmaps
    }
}

/// Byte length a `width` x `rows` coverage bitmap must have, or `None` when the
/// reported dimensions cannot describe a real buffer.
fn bitmap_len(bitmap: &GlyphBitmap) -> Option<usize> {
    let len = (bitmap.width as usize).checked_mul(bitmap.rows as usize)?;
    // The padded footprint must still fit the atlas coordinate space.
    bitmap.width.checked_add(GLYPH_PADDING)?;
    bitmap.rows.checked_add(GLYPH_PADDING)?;
    Some(len)
}

/// The glyph atlas a renderer draws text from.
///
/// Starts empty. Until a build succeeds every query reports "nothing": no
/// glyphs, no texture, and a zero extent from [`measure`](Self::measure).
pub struct FontAtlas<F, T> {
    current: Option<LoadedAtlas<F, T>>,
}

impl<F, T> Default for FontAtlas<F, T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<F, T> FontAtlas<F, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an atlas for `path` and swap it in.
    ///
    /// On failure the previously loaded atlas, if any, is left untouched.
    pub fn load<R, G>(
        &mut self,
        builder: &mut AtlasBuilder<'_, R, G>,
        path: impl AsRef<Path>,
        point_size: u32,
    ) -> Result<(), AtlasError>
    where
        R: Rasterizer<Face = F>,
        G: TextureBackend<Texture = T>,
    {
        let loaded = builder.build(path.as_ref(), point_size)?;
        self.current = Some(loaded);
        Ok(())
    }

    /// Release the texture and the face.
    pub fn unload(&mut self) {
        self.current = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn loaded(&self) -> Option<&LoadedAtlas<F, T>> {
        self.current.as_ref()
    }

    pub fn texture(&self) -> Option<&T> {
        self.current.as_ref().map(|a| &a.texture)
    }

    pub fn glyphs(&self) -> Option<&GlyphTable> {
        self.current.as_ref().map(|a| &a.glyphs)
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs().and_then(|g| g.get_char(ch))
    }

    /// Atlas width in pixels, 0 when nothing is loaded.
    pub fn width(&self) -> u32 {
        self.current.as_ref().map_or(0, |a| a.width)
    }

    /// Atlas height in pixels, 0 when nothing is loaded.
    pub fn height(&self) -> u32 {
        self.current.as_ref().map_or(0, |a| a.height)
    }

    pub fn font_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|a| a.font_path.as_path())
    }

    pub fn point_size(&self) -> Option<u32> {
        self.current.as_ref().map(|a| a.point_size)
    }

    /// Extent of `text` on a single line.
    pub fn measure(&self, text: &str) -> TextExtent {
        self.glyphs().map_or_else(TextExtent::default, |g| g.measure(text))
    }

    pub fn measure_bytes(&self, text: &[u8]) -> TextExtent {
        self.glyphs()
            .map_or_else(TextExtent::default, |g| g.measure_bytes(text))
    }

    pub fn into_shared(self) -> SharedFontAtlas<F, T> {
        Arc::new(Mutex::new(self))
    }
}
