//! Texture backends the atlas uploads into.
//!
//! The atlas only needs three operations from a graphics API: allocate a
//! zero-filled single-channel texture, write a sub-region of it, and free it.
//! Freeing is tied to `Drop` of the backend's texture type, so the texture
//! lives exactly as long as the atlas that owns it.

mod cpu;
mod gpu;

pub use cpu::{CpuAtlasBackend, CpuTexture};
pub use gpu::{AtlasTexture, WgpuAtlasBackend};

use crate::error::AtlasError;

/// Sampling state every atlas texture is created with.
///
/// Glyph cells sit edge to edge, so sampling must never blend across them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasSampling {
    pub address_mode: wgpu::AddressMode,
    pub filter: wgpu::FilterMode,
}

/// Clamp to edge on both axes, nearest filtering for min and mag.
pub const ATLAS_SAMPLING: AtlasSampling = AtlasSampling {
    address_mode: wgpu::AddressMode::ClampToEdge,
    filter: wgpu::FilterMode::Nearest,
};

/// Rectangle written by [`TextureBackend::write_alpha_region`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Graphics API operations consumed by the atlas builder.
pub trait TextureBackend {
    /// Owned texture handle; dropping it releases the texture.
    type Texture;

    /// Allocate a `width` x `height` alpha-only texture, every texel zero,
    /// configured with [`ATLAS_SAMPLING`].
    fn create_alpha_texture(&self, width: u32, height: u32) -> Result<Self::Texture, AtlasError>;

    /// Copy `pixels` (`region.width * region.height` bytes, row-major) into
    /// `region` of `texture`.
    fn write_alpha_region(&self, texture: &mut Self::Texture, region: TextureRegion, pixels: &[u8]);
}
