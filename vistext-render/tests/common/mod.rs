//! Scripted rasterizer shared by the atlas integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use vistext_fonts::{CharSize, GlyphBitmap, RasterError, Rasterizer};

/// Bitmap of `width` x `rows` filled with `fill`, advance given in whole pixels.
pub fn bitmap(width: u32, rows: u32, left: i32, top: i32, advance_px: i32, fill: u8) -> GlyphBitmap {
    GlyphBitmap {
        width,
        rows,
        left,
        top,
        advance_x: advance_px * 64,
        advance_y: 0,
        pixels: vec![fill; (width * rows) as usize],
    }
}

/// A fake font: fixed glyphs per character, optional failures.
#[derive(Clone, Default)]
pub struct ScriptedFont {
    glyphs: HashMap<char, GlyphBitmap>,
    failing: HashSet<char>,
    reject_size: bool,
}

impl ScriptedFont {
    /// Every printable code renders as `width` x `rows` filled with its own
    /// code; the space is blank.
    pub fn uniform(width: u32, rows: u32, advance_px: i32) -> Self {
        let mut font = Self::default();
        for code in 33u8..=127 {
            font.glyphs.insert(
                char::from(code),
                bitmap(width, rows, 1, rows as i32, advance_px, code),
            );
        }
        font.glyphs.insert(' ', bitmap(0, 0, 0, 0, advance_px, 0));
        font
    }

    /// Glyph widths vary with the code so placement bugs show up.
    pub fn varied() -> Self {
        let mut font = Self::default();
        for code in 32u8..=127 {
            let width = (code % 7) as u32 + 1;
            let rows = (code % 5) as u32 + 3;
            font.glyphs.insert(
                char::from(code),
                bitmap(width, rows, (code % 3) as i32 - 1, rows as i32, width as i32 + 1, code),
            );
        }
        font
    }

    pub fn with_glyph(mut self, ch: char, bitmap: GlyphBitmap) -> Self {
        self.glyphs.insert(ch, bitmap);
        self
    }

    pub fn failing(mut self, ch: char) -> Self {
        self.failing.insert(ch);
        self
    }

    pub fn rejecting_size(mut self) -> Self {
        self.reject_size = true;
        self
    }
}

/// Face handle; counts closes through a shared counter.
pub struct ScriptedFace {
    pub path: PathBuf,
    pub size: Option<CharSize>,
    closed: Rc<Cell<usize>>,
}

impl Drop for ScriptedFace {
    fn drop(&mut self) {
        self.closed.set(self.closed.get() + 1);
    }
}

/// Rasterizer serving [`ScriptedFont`]s by path.
#[derive(Default)]
pub struct ScriptedRasterizer {
    fonts: HashMap<PathBuf, ScriptedFont>,
    pub opened: usize,
    pub renders: usize,
    pub sizes: Vec<CharSize>,
    closed: Rc<Cell<usize>>,
}

impl ScriptedRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, path: impl Into<PathBuf>, font: ScriptedFont) -> Self {
        self.fonts.insert(path.into(), font);
        self
    }

    /// Number of faces dropped so far.
    pub fn closed(&self) -> usize {
        self.closed.get()
    }
}

impl Rasterizer for ScriptedRasterizer {
    type Face = ScriptedFace;

    fn open_face(&mut self, path: &Path) -> Result<ScriptedFace, RasterError> {
        if !self.fonts.contains_key(path) {
            return Err(RasterError::InvalidFont {
                path: path.to_path_buf(),
            });
        }
        self.opened += 1;
        Ok(ScriptedFace {
            path: path.to_path_buf(),
            size: None,
            closed: Rc::clone(&self.closed),
        })
    }

    fn set_char_size(&mut self, face: &mut ScriptedFace, size: CharSize) -> Result<(), RasterError> {
        self.sizes.push(size);
        if self.fonts[&face.path].reject_size {
            return Err(RasterError::InvalidSize("scripted rejection".into()));
        }
        size.validate()?;
        face.size = Some(size);
        Ok(())
    }

    fn render_char(&mut self, face: &ScriptedFace, ch: char) -> Result<GlyphBitmap, RasterError> {
        self.renders += 1;
        if face.size.is_none() {
            return Err(RasterError::NoSizeSet);
        }
        let font = &self.fonts[&face.path];
        if font.failing.contains(&ch) {
            return Err(RasterError::GlyphRender { ch });
        }
        font.glyphs
            .get(&ch)
            .cloned()
            .ok_or(RasterError::GlyphRender { ch })
    }
}
