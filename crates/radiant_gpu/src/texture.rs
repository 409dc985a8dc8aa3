//! Host-side textures
//!
//! A [`Texture`] owns RGBA8 pixel data in host memory and knows how to
//! describe and upload itself to a wgpu device.

/// Bytes per RGBA8 texel
pub const BYTES_PER_TEXEL: u32 = 4;

/// Shape and label of a texture
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureDescriptor {
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
}

impl TextureDescriptor {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_TEXEL as usize
    }

    pub fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }

    /// Equivalent wgpu descriptor for creating a sampled, copy-destination texture
    pub fn to_wgpu(&self) -> wgpu::TextureDescriptor<'static> {
        wgpu::TextureDescriptor {
            label: Some(self.label),
            size: self.extent(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        }
    }
}

/// RGBA8 texture data
#[derive(Debug, PartialEq)]
pub struct Texture {
    descriptor: TextureDescriptor,
    pixels: Vec<u8>,
}

impl Texture {
    /// Wrap `pixels`, which must hold exactly `width * height` RGBA8 texels
    pub fn new(descriptor: TextureDescriptor, pixels: Vec<u8>) -> Option<Self> {
        if descriptor.width == 0 || descriptor.height == 0 {
            return None;
        }
        if pixels.len() != descriptor.byte_len() {
            tracing::warn!(
                "Texture `{}` expects {} bytes, got {}",
                descriptor.label,
                descriptor.byte_len(),
                pixels.len()
            );
            return None;
        }
        Some(Self { descriptor, pixels })
    }

    pub fn descriptor(&self) -> &TextureDescriptor {
        &self.descriptor
    }

    pub fn width(&self) -> u32 {
        self.descriptor.width
    }

    pub fn height(&self) -> u32 {
        self.descriptor.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Scale from "row 0" texture space to the full allocated height
    ///
    /// Content lives in the first row; shaders sample at
    /// `0.5 * y_coord_scale` to hit that row's texel centers.
    pub fn y_coord_scale(&self) -> f32 {
        1.0 / self.descriptor.height as f32
    }

    /// RGBA value of the texel at `(x, y)`
    pub fn texel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.descriptor.width || y >= self.descriptor.height {
            return None;
        }
        let offset = ((y * self.descriptor.width + x) * BYTES_PER_TEXEL) as usize;
        let bytes = self.pixels.get(offset..offset + BYTES_PER_TEXEL as usize)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Create a GPU texture and upload the pixel data
    pub fn upload(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> wgpu::Texture {
        let texture = device.create_texture(&self.descriptor.to_wgpu());

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(self.descriptor.width * BYTES_PER_TEXEL),
                rows_per_image: Some(self.descriptor.height),
            },
            self.descriptor.extent(),
        );

        texture
    }
}
