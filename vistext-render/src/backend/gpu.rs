//! wgpu implementation of the atlas texture backend.

use std::sync::Arc;

use wgpu::*;

use super::{ATLAS_SAMPLING, TextureBackend, TextureRegion};
use crate::error::AtlasError;

/// Creates atlas textures on a wgpu device.
#[derive(Clone)]
pub struct WgpuAtlasBackend {
    device: Arc<Device>,
    queue: Arc<Queue>,
}

impl WgpuAtlasBackend {
    pub fn new(device: Arc<Device>, queue: Arc<Queue>) -> Self {
        Self { device, queue }
    }
}

/// The atlas texture with the view and sampler a draw call binds.
pub struct AtlasTexture {
    /// The GPU texture (kept alive to ensure view/sampler remain valid)
    pub texture: Texture,
    /// View for binding to shaders
    pub view: TextureView,
    /// Nearest, clamp-to-edge sampler
    pub sampler: Sampler,
    /// Logical width in pixels (the allocation is at least 1)
    pub width: u32,
    /// Logical height in pixels (the allocation is at least 1)
    pub height: u32,
}

impl std::fmt::Debug for AtlasTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtlasTexture")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl TextureBackend for WgpuAtlasBackend {
    type Texture = AtlasTexture;

    fn create_alpha_texture(&self, width: u32, height: u32) -> Result<AtlasTexture, AtlasError> {
        let max = self.device.limits().max_texture_dimension_2d;
        if width > max || height > max {
            return Err(AtlasError::TextureAllocation(format!(
                "{width}x{height} exceeds device limit {max}"
            )));
        }

        // wgpu rejects zero-sized textures; an atlas with no glyphs still
        // gets a 1x1 transparent texel.
        let size = Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&TextureDescriptor {
            label: Some("Font Atlas Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TextureFormat::R8Unorm,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let zeros = vec![0u8; size.width as usize * size.height as usize];
        self.queue.write_texture(
            TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: Origin3d::ZERO,
                aspect: TextureAspect::All,
            },
            &zeros,
            TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(size.width),
                rows_per_image: Some(size.height),
            },
            size,
        );

        let view = texture.create_view(&TextureViewDescriptor::default());
        let sampler = self.device.create_sampler(&SamplerDescriptor {
            label: Some("Font Atlas Sampler"),
            address_mode_u: ATLAS_SAMPLING.address_mode,
            address_mode_v: ATLAS_SAMPLING.address_mode,
            address_mode_w: ATLAS_SAMPLING.address_mode,
            mag_filter: ATLAS_SAMPLING.filter,
            min_filter: ATLAS_SAMPLING.filter,
            mipmap_filter: FilterMode::Nearest,
            ..Default::default()
        });

        Ok(AtlasTexture {
            texture,
            view,
            sampler,
            width,
            height,
        })
    }

    fn write_alpha_region(&self, texture: &mut AtlasTexture, region: TextureRegion, pixels: &[u8]) {
        if region.width == 0 || region.height == 0 {
            return;
        }
        self.queue.write_texture(
            TexelCopyTextureInfo {
                texture: &texture.texture,
                mip_level: 0,
                origin: Origin3d {
                    x: region.x,
                    y: region.y,
                    z: 0,
                },
                aspect: TextureAspect::All,
            },
            pixels,
            TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(region.width),
                rows_per_image: Some(region.height),
            },
            Extent3d {
                width: region.width,
                height: region.height,
                depth_or_array_layers: 1,
            },
        );
    }
}
