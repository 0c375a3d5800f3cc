//! Per-character glyph metrics and the dense lookup table built from them.

/// First character code rasterized into the atlas (space).
pub const FIRST_CODE: u8 = 32;

/// Last character code rasterized into the atlas (inclusive).
pub const LAST_CODE: u8 = 127;

/// Transparent border added around every glyph, summed over both sides.
pub const GLYPH_PADDING: u32 = 2;

/// Placement and metrics of one glyph in the atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Footprint width in the atlas, padding included.
    pub width: u32,
    /// Footprint height in the atlas, padding included.
    pub height: u32,
    /// Offset from the pen origin to the left ink edge.
    pub bearing_x: i32,
    /// Offset from the baseline up to the top ink edge.
    pub bearing_y: i32,
    /// Whole-pixel horizontal pen advance.
    pub advance_x: i32,
    /// Whole-pixel vertical pen advance (zero for horizontal text).
    pub advance_y: i32,
    /// Normalized horizontal texture coordinate of the footprint's left edge.
    pub atlas_offset_u: f32,
}

impl Glyph {
    /// Width of the inked bitmap, without the transparent border.
    pub fn ink_width(&self) -> u32 {
        self.width.saturating_sub(GLYPH_PADDING)
    }

    /// Height of the inked bitmap, without the transparent border.
    pub fn ink_height(&self) -> u32 {
        self.height.saturating_sub(GLYPH_PADDING)
    }

    /// True when the stored footprint has no area. A rendered glyph always
    /// keeps its border, so even a space is 2x2 and not empty.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Pixel extent of a measured string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

/// Glyph lookup keyed by byte value.
///
/// Every slot carries an explicit present/absent marker: a code outside the
/// atlas range, or one the rasterizer could not render, is `None` and is
/// never confused with an inkless glyph (the space) that rendered fine.
#[derive(Clone, PartialEq)]
pub struct GlyphTable {
    slots: [Option<Glyph>; 256],
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self { slots: [None; 256] }
    }
}

impl std::fmt::Debug for GlyphTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphTable")
            .field("present", &self.present_count())
            .finish()
    }
}

impl GlyphTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `code` is one the atlas rasterizes.
    pub fn in_range(code: u8) -> bool {
        (FIRST_CODE..=LAST_CODE).contains(&code)
    }

    /// Store a glyph. Codes outside the atlas range are ignored.
    pub fn insert(&mut self, code: u8, glyph: Glyph) {
        if Self::in_range(code) {
            self.slots[code as usize] = Some(glyph);
        }
    }

    pub fn get(&self, code: u8) -> Option<&Glyph> {
        self.slots[code as usize].as_ref()
    }

    /// Look up a character; anything that is not a single byte is absent.
    pub fn get_char(&self, ch: char) -> Option<&Glyph> {
        u8::try_from(ch).ok().and_then(|code| self.get(code))
    }

    /// Present glyphs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Glyph)> {
        (FIRST_CODE..=LAST_CODE).filter_map(|code| self.get(code).map(|g| (code, g)))
    }

    pub fn present_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Bounding box of `text` laid out on one line, left to right.
    ///
    /// Each present glyph's right edge is `pen + bearing_x + ink_width` and
    /// the height is the tallest stored (padded) footprint. Inkless glyphs
    /// such as the space still count: their edge sits at the pen and their
    /// 2px footprint sets the height.
    pub fn measure(&self, text: &str) -> TextExtent {
        self.measure_glyphs(text.chars().map(|ch| self.get_char(ch)))
    }

    /// Like [`measure`](Self::measure), over raw bytes.
    pub fn measure_bytes(&self, text: &[u8]) -> TextExtent {
        self.measure_glyphs(text.iter().map(|&code| self.get(code)))
    }

    fn measure_glyphs<'a>(&self, glyphs: impl Iterator<Item = Option<&'a Glyph>>) -> TextExtent {
        let mut pen_x: i64 = 0;
        let mut right: i64 = 0;
        let mut height = 0;
        for glyph in glyphs.flatten() {
            let left = pen_x + glyph.bearing_x as i64;
            pen_x += glyph.advance_x as i64;
            if glyph.is_empty() {
                continue;
            }
            right = right.max(left + glyph.ink_width() as i64);
            height = height.max(glyph.height);
        }
        TextExtent {
            width: right.clamp(0, u32::MAX as i64) as u32,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(ink_w: u32, ink_h: u32, bearing_x: i32, advance_x: i32) -> Glyph {
        Glyph {
            width: ink_w + GLYPH_PADDING,
            height: ink_h + GLYPH_PADDING,
            bearing_x,
            bearing_y: ink_h as i32,
            advance_x,
            advance_y: 0,
            atlas_offset_u: 0.0,
        }
    }

    fn table() -> GlyphTable {
        let mut t = GlyphTable::new();
        t.insert(b' ', glyph(0, 0, 0, 5));
        t.insert(b'A', glyph(10, 14, 1, 11));
        t.insert(b'j', glyph(4, 18, -2, 5));
        t.insert(b'.', glyph(2, 2, 1, 4));
        t
    }

    #[test]
    fn measure_empty_is_zero() {
        assert_eq!(table().measure(""), TextExtent::default());
        assert_eq!(GlyphTable::new().measure("hello"), TextExtent::default());
    }

    #[test]
    fn measure_single_glyph_uses_ink_width_and_padded_height() {
        let extent = table().measure("A");
        assert_eq!(extent, TextExtent { width: 11, height: 16 });
    }

    #[test]
    fn space_counts_with_its_padded_footprint() {
        let t = table();
        assert_eq!(t.measure(" "), TextExtent { width: 0, height: 2 });
        // edges at 0, 5 and 10
        assert_eq!(t.measure("   "), TextExtent { width: 10, height: 2 });
        // pen at 5 after the space, then 5 + 1 + 10
        assert_eq!(t.measure(" A"), TextExtent { width: 16, height: 16 });
    }

    #[test]
    fn zero_sized_footprint_is_skipped() {
        let mut t = GlyphTable::new();
        let mut hollow = glyph(0, 0, 3, 7);
        hollow.width = 0;
        hollow.height = 0;
        t.insert(b'~', hollow);
        t.insert(b'A', glyph(10, 14, 1, 11));
        assert_eq!(t.measure("~"), TextExtent::default());
        // still advances the pen
        assert_eq!(t.measure("~A").width, 7 + 1 + 10);
    }

    #[test]
    fn absent_and_out_of_range_characters_contribute_nothing() {
        let t = table();
        assert_eq!(t.measure("A\u{e9}"), t.measure("A"));
        assert_eq!(t.measure("\u{1F600}"), TextExtent::default());
        assert_eq!(t.measure_bytes(&[0x07, b'A', 0xFF]), t.measure("A"));
        // 'B' is in range but was never rasterized
        assert_eq!(t.measure("BA"), t.measure("A"));
    }

    #[test]
    fn negative_bearing_never_yields_negative_width() {
        let mut t = GlyphTable::new();
        t.insert(b'x', glyph(3, 3, -10, 0));
        assert_eq!(t.measure("x").width, 0);
        assert_eq!(t.measure("x").height, 5);
    }

    #[test]
    fn width_tracks_widest_edge_not_last() {
        let mut t = GlyphTable::new();
        t.insert(b'W', glyph(20, 10, 0, 2));
        t.insert(b'.', glyph(2, 2, 0, 2));
        // the second glyph ends at 4, the first at 20
        assert_eq!(t.measure("W.").width, 20);
    }

    #[test]
    fn width_is_monotone_when_appending() {
        let t = table();
        let text = "Aj.A..jA";
        let mut last = 0;
        for end in 0..=text.len() {
            let w = t.measure(&text[..end]).width;
            assert!(w >= last, "width shrank at {end}: {w} < {last}");
            last = w;
        }
    }

    #[test]
    fn insert_ignores_codes_outside_range() {
        let mut t = GlyphTable::new();
        t.insert(10, glyph(1, 1, 0, 1));
        t.insert(200, glyph(1, 1, 0, 1));
        assert_eq!(t.present_count(), 0);
        assert!(t.get(10).is_none());
        assert!(GlyphTable::in_range(127));
        assert!(!GlyphTable::in_range(128));
        assert!(!GlyphTable::in_range(31));
    }

    #[test]
    fn iter_yields_codes_in_order() {
        let codes: Vec<u8> = table().iter().map(|(c, _)| c).collect();
        assert_eq!(codes, vec![b' ', b'.', b'A', b'j']);
    }
}
