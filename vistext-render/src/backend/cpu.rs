use super::{ATLAS_SAMPLING, AtlasSampling, TextureBackend, TextureRegion};
use crate::error::AtlasError;

/// Texture backend that keeps atlas pixels in memory.
///
/// Used for headless export and anywhere the atlas must be inspected without
/// a GPU.
#[derive(Debug, Clone, Copy)]
pub struct CpuAtlasBackend {
    max_dimension: u32,
}

impl Default for CpuAtlasBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuAtlasBackend {
    /// Backend with the default 2D texture limit of wgpu (8192).
    pub fn new() -> Self {
        Self::with_max_dimension(wgpu::Limits::default().max_texture_dimension_2d)
    }

    pub fn with_max_dimension(max_dimension: u32) -> Self {
        Self { max_dimension }
    }
}

/// Single-channel texture held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuTexture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    sampling: AtlasSampling,
}

impl CpuTexture {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major alpha values, `width * height` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn sampling(&self) -> AtlasSampling {
        self.sampling
    }

    /// Alpha at `(x, y)`, or `None` outside the texture.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[(y as usize) * (self.width as usize) + x as usize])
    }
}

impl TextureBackend for CpuAtlasBackend {
    type Texture = CpuTexture;

    fn create_alpha_texture(&self, width: u32, height: u32) -> Result<CpuTexture, AtlasError> {
        if width > self.max_dimension || height > self.max_dimension {
            return Err(AtlasError::TextureAllocation(format!(
                "{width}x{height} exceeds maximum dimension {}",
                self.max_dimension
            )));
        }
        Ok(CpuTexture {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
            sampling: ATLAS_SAMPLING,
        })
    }

    fn write_alpha_region(&self, texture: &mut CpuTexture, region: TextureRegion, pixels: &[u8]) {
        debug_assert_eq!(
            Some(pixels.len()),
            (region.width as usize).checked_mul(region.height as usize)
        );
        // Clip to the texture; out-of-bounds writes are dropped.
        if region.x >= texture.width || region.y >= texture.height {
            return;
        }
        let stride = texture.width as usize;
        let cols = region.width.min(texture.width.saturating_sub(region.x)) as usize;
        let rows = region.height.min(texture.height.saturating_sub(region.y));
        for row in 0..rows {
            let src = (row * region.width) as usize;
            let dst = (region.y + row) as usize * stride + region.x as usize;
            texture.pixels[dst..dst + cols].copy_from_slice(&pixels[src..src + cols]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_texture_is_transparent_and_clamped() {
        let tex = CpuAtlasBackend::new().create_alpha_texture(4, 3).unwrap();
        assert_eq!(tex.pixels(), &[0u8; 12]);
        assert_eq!(tex.sampling(), ATLAS_SAMPLING);
    }

    #[test]
    fn write_region_lands_at_offset() {
        let backend = CpuAtlasBackend::new();
        let mut tex = backend.create_alpha_texture(5, 4).unwrap();
        let region = TextureRegion {
            x: 1,
            y: 1,
            width: 2,
            height: 2,
        };
        backend.write_alpha_region(&mut tex, region, &[1, 2, 3, 4]);
        assert_eq!(tex.pixel(0, 0), Some(0));
        assert_eq!(tex.pixel(1, 1), Some(1));
        assert_eq!(tex.pixel(2, 1), Some(2));
        assert_eq!(tex.pixel(1, 2), Some(3));
        assert_eq!(tex.pixel(2, 2), Some(4));
        assert_eq!(tex.pixel(3, 3), Some(0));
        assert_eq!(tex.pixel(5, 0), None);
    }

    #[test]
    fn write_region_clips_to_texture() {
        let backend = CpuAtlasBackend::new();
        let mut tex = backend.create_alpha_texture(2, 2).unwrap();
        let region = TextureRegion {
            x: 1,
            y: 1,
            width: 2,
            height: 2,
        };
        backend.write_alpha_region(&mut tex, region, &[9, 9, 9, 9]);
        assert_eq!(tex.pixels(), &[0, 0, 0, 9]);
    }

    #[test]
    fn write_region_past_the_edge_is_dropped() {
        let backend = CpuAtlasBackend::new();
        let mut tex = backend.create_alpha_texture(3, 2).unwrap();
        for (x, y) in [(3, 1), (4, 1), (0, 2), (7, 9)] {
            let region = TextureRegion {
                x,
                y,
                width: 1,
                height: 1,
            };
            backend.write_alpha_region(&mut tex, region, &[5]);
        }
        assert_eq!(tex.pixels(), &[0u8; 6]);
    }

    #[test]
    fn oversized_texture_is_rejected() {
        let backend = CpuAtlasBackend::with_max_dimension(16);
        assert!(matches!(
            backend.create_alpha_texture(17, 4),
            Err(AtlasError::TextureAllocation(_))
        ));
    }
}
