//! End-to-end tests: swash rasterizer, in-memory atlas, PNG export.
//!
//! These need a real outline font and skip quietly when none is installed.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use clap::Parser;
use vistext::cli::{self, Cli};
use vistext::{Config, CpuFontAtlas, SwashRasterizer};
use vistext_render::{AtlasBuilder, CpuAtlasBackend, FixedDpi, GLYPH_PADDING};

const CANDIDATE_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn system_font() -> Option<PathBuf> {
    CANDIDATE_FONTS
        .iter()
        .map(Path::new)
        .find(|p| p.exists())
        .map(Path::to_path_buf)
}

fn build(path: &Path, point_size: u32) -> CpuFontAtlas {
    let mut rasterizer = SwashRasterizer::new();
    let backend = CpuAtlasBackend::new();
    let dpi = FixedDpi::default();
    let mut builder = AtlasBuilder::new(&mut rasterizer, Some(&backend), &dpi);
    let mut atlas = CpuFontAtlas::new();
    atlas.load(&mut builder, path, point_size).unwrap();
    atlas
}

#[test]
fn test_real_font_atlas_layout() {
    let Some(path) = system_font() else { return };
    let atlas = build(&path, 12);
    let glyphs = atlas.glyphs().unwrap();

    // 127 (DEL) depends on the font's .notdef outline
    assert!(glyphs.present_count() >= 95);
    let total: u32 = glyphs.iter().map(|(_, g)| g.width).sum();
    assert_eq!(atlas.width(), total);
    let tallest = glyphs.iter().map(|(_, g)| g.height).max().unwrap();
    assert_eq!(atlas.height(), tallest);

    let space = atlas.glyph(' ').unwrap();
    assert_eq!(space.width, GLYPH_PADDING);
    assert!(space.advance_x > 0);
    for (_, glyph) in glyphs.iter() {
        assert!((0.0..1.0).contains(&glyph.atlas_offset_u));
    }
}

#[test]
fn test_real_font_measure() {
    let Some(path) = system_font() else { return };
    let atlas = build(&path, 12);

    let one = atlas.measure("M");
    let two = atlas.measure("MM");
    assert!(one.width > 0 && one.height > 0);
    assert!(two.width > one.width);
    assert_eq!(atlas.measure("").width, 0);
    // the space is inkless but keeps its 2px footprint
    assert_eq!(atlas.measure(" ").height, GLYPH_PADDING);
    assert!(atlas.measure("   ").width >= atlas.measure(" ").width);
}

#[test]
fn test_atlas_command_writes_png() {
    let Some(path) = system_font() else { return };
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("atlas.png");

    let args: Vec<&OsStr> = vec![
        OsStr::new("vistext"),
        OsStr::new("atlas"),
        OsStr::new("--font"),
        path.as_os_str(),
        OsStr::new("--size"),
        OsStr::new("16"),
        OsStr::new("--out"),
        out.as_os_str(),
    ];
    let cli = Cli::try_parse_from(args).unwrap();
    cli::run(&cli, &Config::default()).unwrap();

    let image = image::open(&out).unwrap().into_luma8();
    let atlas = build(&path, 16);
    assert_eq!(image.dimensions(), (atlas.width(), atlas.height()));
    assert_eq!(image.as_raw().as_slice(), atlas.texture().unwrap().pixels());
}

#[test]
fn test_measure_command_without_font_fails() {
    let cli = Cli::try_parse_from(["vistext", "measure", "abc"]).unwrap();
    assert!(cli::run(&cli, &Config::default()).is_err());
}
