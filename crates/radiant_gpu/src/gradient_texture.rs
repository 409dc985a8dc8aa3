//! Gradient lookup textures
//!
//! Gradients are rasterized into a 1D RGBA strip (256 texels wide by default)
//! that shaders sample with the gradient parameter `t`. Tile modes are
//! applied in the shader, so a strip depends only on its colors and stops
//! and can be shared by every gradient that uses them.
//!
//! [`GradientTextureCache`] keeps recently used strips keyed by the exact bit
//! patterns of their colors and stops.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use radiant_core::Color;
use smallvec::SmallVec;

use crate::config::RendererConfig;
use crate::texture::{Texture, TextureDescriptor, BYTES_PER_TEXEL};

/// Default width of the gradient lookup texture
pub const GRADIENT_TEXTURE_WIDTH: u32 = 256;

/// Rasterized gradient data ready for GPU upload
#[derive(Clone, Debug, PartialEq)]
pub struct RasterizedGradient {
    /// RGBA pixel data (`width * 4` bytes)
    pub pixels: Vec<u8>,
    /// Number of texels in the strip
    pub width: u32,
    /// Number of color stops in the original gradient
    pub stop_count: usize,
}

impl RasterizedGradient {
    /// Rasterize `colors` positioned at `stops` into a `width`-texel strip
    ///
    /// Returns `None` when there are no colors, when colors and stops don't
    /// pair up one-to-one, or when `width` is zero. Stops are used in the
    /// order given.
    pub fn from_colors_and_stops(colors: &[Color], stops: &[f32], width: u32) -> Option<Self> {
        if colors.is_empty() || colors.len() != stops.len() || width == 0 {
            return None;
        }

        let mut pixels = Vec::with_capacity((width * BYTES_PER_TEXEL) as usize);

        if colors.len() == 1 {
            // Single color fills entire texture
            let texel = colors[0].to_rgba8();
            for _ in 0..width {
                pixels.extend_from_slice(&texel);
            }
        } else {
            let last = (width - 1).max(1) as f32;
            for i in 0..width {
                let t = i as f32 / last;
                pixels.extend_from_slice(&sample_gradient(colors, stops, t).to_rgba8());
            }
        }

        Some(Self {
            pixels,
            width,
            stop_count: colors.len(),
        })
    }

    /// Lay the strip out in row 0 of a `rows`-tall texture
    pub fn into_texture(self, rows: u32) -> Option<Texture> {
        let rows = rows.max(1);
        let mut pixels = self.pixels;
        pixels.resize(pixels.len() * rows as usize, 0);

        Texture::new(
            TextureDescriptor {
                label: "Gradient Texture",
                width: self.width,
                height: rows,
            },
            pixels,
        )
    }
}

/// Sample a gradient at parameter t
fn sample_gradient(colors: &[Color], stops: &[f32], t: f32) -> Color {
    let (Some(first), Some(last)) = (colors.first(), colors.last()) else {
        return Color::TRANSPARENT;
    };

    if t <= stops[0] {
        return *first;
    }

    if t >= stops[stops.len() - 1] {
        return *last;
    }

    // Find bracketing stops
    for i in 0..stops.len() - 1 {
        let (s0, s1) = (stops[i], stops[i + 1]);

        if t >= s0 && t <= s1 {
            let range = s1 - s0;
            if range < 0.0001 {
                return colors[i];
            }

            let local_t = (t - s0) / range;
            return Color::lerp(&colors[i], &colors[i + 1], local_t);
        }
    }

    // Unsorted stops can leave t unbracketed
    *last
}

/// Source of gradient lookup textures
pub trait GradientTextureProvider: Send + Sync {
    /// Build (or fetch a cached) lookup texture for `colors` at `stops`
    ///
    /// Returns `None` when no texture can be produced for this input.
    fn build_or_fetch(&self, colors: &[Color], stops: &[f32]) -> Option<Arc<Texture>>;
}

/// Canonical cache key for a set of colors and stops
///
/// Encodes the lengths followed by the raw bits of every component, so two
/// gradients share a key only when they are bit-for-bit identical.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GradientKey(SmallVec<[u32; 24]>);

impl GradientKey {
    pub fn new(colors: &[Color], stops: &[f32]) -> Self {
        let mut bits = SmallVec::with_capacity(2 + colors.len() * 4 + stops.len());
        bits.push(colors.len() as u32);
        bits.push(stops.len() as u32);
        for color in colors {
            bits.extend(color.to_array().iter().map(|c| c.to_bits()));
        }
        bits.extend(stops.iter().map(|s| s.to_bits()));
        Self(bits)
    }
}

/// LRU cache of gradient lookup textures
pub struct GradientTextureCache {
    width: u32,
    rows: u32,
    entries: Mutex<LruCache<GradientKey, Arc<Texture>>>,
}

impl GradientTextureCache {
    pub fn new(config: &RendererConfig) -> Self {
        let capacity =
            NonZeroUsize::new(config.gradient_cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            width: config.gradient_texture_width,
            rows: config.gradient_texture_rows,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of cached textures
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached texture
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl Default for GradientTextureCache {
    fn default() -> Self {
        Self::new(&RendererConfig::default())
    }
}

impl GradientTextureProvider for GradientTextureCache {
    fn build_or_fetch(&self, colors: &[Color], stops: &[f32]) -> Option<Arc<Texture>> {
        let key = GradientKey::new(colors, stops);
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(texture) = entries.get(&key) {
            tracing::trace!("Gradient texture cache hit ({} stops)", colors.len());
            return Some(Arc::clone(texture));
        }

        let Some(gradient) = RasterizedGradient::from_colors_and_stops(colors, stops, self.width)
        else {
            tracing::warn!(
                "Cannot build gradient texture from {} colors and {} stops",
                colors.len(),
                stops.len()
            );
            return None;
        };

        let texture = Arc::new(gradient.into_texture(self.rows)?);
        tracing::debug!(
            "Gradient texture cache miss, rasterized {} stops into {}x{}",
            colors.len(),
            texture.width(),
            texture.height()
        );
        entries.put(key, Arc::clone(&texture));
        Some(texture)
    }
}
