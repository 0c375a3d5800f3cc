//! Command-line interface for vistext.
//!
//! Developer tooling around the font atlas: export a built atlas as a PNG and
//! measure strings against it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use vistext_config::{Config, LogLevel};
use vistext_fonts::{Dpi, SwashRasterizer};
use vistext_render::{
    AtlasBuilder, BASE_DPI, CpuAtlasBackend, CpuFontAtlas, FixedDpi, GpuFontAtlas,
    WgpuAtlasBackend,
};

/// vistext - font atlas tooling
#[derive(Parser, Debug)]
#[command(name = "vistext")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.config/vistext/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the atlas and write it as a grayscale PNG
    Atlas {
        #[command(flatten)]
        font: FontArgs,

        /// Output image path
        #[arg(short, long, value_name = "PATH", default_value = "atlas.png")]
        out: PathBuf,

        /// Also build the atlas on a headless GPU device
        #[arg(long)]
        gpu: bool,
    },
    /// Print the pixel extent of a string
    Measure {
        #[command(flatten)]
        font: FontArgs,

        /// Text to measure
        text: String,
    },
}

/// Font selection shared by every subcommand; unset values come from config.
#[derive(Args, Debug, Clone, Default)]
pub struct FontArgs {
    /// Font file
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Font size in points
    #[arg(long, value_name = "POINTS")]
    pub size: Option<u32>,

    /// Display resolution, either `96` or `110x120`
    #[arg(long, value_name = "DPI", value_parser = parse_dpi)]
    pub dpi: Option<Dpi>,
}

/// Font, size and DPI after merging CLI flags over config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSettings {
    pub path: PathBuf,
    pub point_size: u32,
    pub dpi: Dpi,
}

impl FontArgs {
    pub fn resolve(&self, config: &Config) -> Result<FontSettings> {
        let Some(path) = self.font.clone().or_else(|| config.font_path.clone()) else {
            bail!("no font given: pass --font or set font_path in the config file");
        };
        let dpi = self
            .dpi
            .or(config.dpi_override.map(|d| Dpi::new(d.horizontal, d.vertical)))
            .unwrap_or(Dpi::uniform(BASE_DPI as u32));
        Ok(FontSettings {
            path,
            point_size: self.size.unwrap_or(config.font_size),
            dpi,
        })
    }
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    match value.to_ascii_lowercase().as_str() {
        "off" => Ok(LogLevel::Off),
        "error" => Ok(LogLevel::Error),
        "warn" => Ok(LogLevel::Warn),
        "info" => Ok(LogLevel::Info),
        "debug" => Ok(LogLevel::Debug),
        "trace" => Ok(LogLevel::Trace),
        other => Err(format!("unknown log level '{other}'")),
    }
}

fn parse_dpi(value: &str) -> Result<Dpi, String> {
    let parse = |s: &str| -> Result<u32, String> {
        match s.trim().parse::<u32>() {
            Ok(0) => Err("dpi must be positive".to_string()),
            Ok(v) => Ok(v),
            Err(e) => Err(format!("invalid dpi '{s}': {e}")),
        }
    };
    match value.split_once(['x', 'X', ',']) {
        Some((h, v)) => Ok(Dpi::new(parse(h)?, parse(v)?)),
        None => parse(value).map(Dpi::uniform),
    }
}

/// Load the config named on the command line, or the default one.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Execute the parsed command.
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Commands::Atlas { font, out, gpu } => {
            let settings = font.resolve(config)?;
            export_atlas(&settings, config.hinting, out)?;
            if *gpu {
                let (w, h) = build_on_gpu(&settings, config.hinting)?;
                println!("GPU atlas: {w}x{h} px");
            }
            Ok(())
        }
        Commands::Measure { font, text } => {
            let settings = font.resolve(config)?;
            let atlas = build_cpu_atlas(&settings, config.hinting)?;
            let extent = atlas.measure(text);
            println!("{} {}", extent.width, extent.height);
            Ok(())
        }
    }
}

fn build_cpu_atlas(settings: &FontSettings, hinting: bool) -> Result<CpuFontAtlas> {
    let mut rasterizer = SwashRasterizer::new().with_hinting(hinting);
    let backend = CpuAtlasBackend::new();
    let dpi = FixedDpi(settings.dpi);
    let mut builder = AtlasBuilder::new(&mut rasterizer, Some(&backend), &dpi);

    let mut atlas = CpuFontAtlas::new();
    atlas
        .load(&mut builder, &settings.path, settings.point_size)
        .with_context(|| format!("building atlas for {}", settings.path.display()))?;
    Ok(atlas)
}

fn export_atlas(settings: &FontSettings, hinting: bool, out: &Path) -> Result<()> {
    let atlas = build_cpu_atlas(settings, hinting)?;
    let Some(texture) = atlas.texture() else {
        bail!("atlas has no texture");
    };
    if texture.width() == 0 {
        bail!("no glyphs could be rasterized from {}", settings.path.display());
    }

    let image = image::GrayImage::from_raw(texture.width(), texture.height(), texture.pixels().to_vec())
        .context("atlas pixel buffer does not match its dimensions")?;
    image
        .save(out)
        .with_context(|| format!("writing {}", out.display()))?;

    let glyphs = atlas.glyphs().map_or(0, |g| g.present_count());
    println!(
        "Wrote {} ({}x{} px, {} glyphs)",
        out.display(),
        texture.width(),
        texture.height(),
        glyphs
    );
    Ok(())
}

async fn request_headless_device() -> Result<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::default();
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .context("Failed to find wgpu adapter")?;

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("vistext atlas device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::default(),
            ..Default::default()
        })
        .await?;
    Ok((device, queue))
}

/// Build the atlas on a real GPU to check it fits the adapter.
fn build_on_gpu(settings: &FontSettings, hinting: bool) -> Result<(u32, u32)> {
    let runtime = tokio::runtime::Runtime::new()?;
    let (device, queue) = runtime.block_on(request_headless_device())?;
    let backend = WgpuAtlasBackend::new(Arc::new(device), Arc::new(queue));

    let mut rasterizer = SwashRasterizer::new().with_hinting(hinting);
    let dpi = FixedDpi(settings.dpi);
    let mut builder = AtlasBuilder::new(&mut rasterizer, Some(&backend), &dpi);

    let mut atlas = GpuFontAtlas::new();
    atlas
        .load(&mut builder, &settings.path, settings.point_size)
        .with_context(|| format!("building GPU atlas for {}", settings.path.display()))?;
    Ok((atlas.width(), atlas.height()))
}
