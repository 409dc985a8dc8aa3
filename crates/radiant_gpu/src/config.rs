//! Renderer configuration
//!
//! Defaults are tuned for typical UI scenes. A config can also be loaded from
//! a TOML file; any field left out keeps its default:
//!
//! ```toml
//! tessellation_tolerance = 0.25
//! gradient_texture_width = 512
//! gradient_cache_capacity = 128
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the content renderer
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Maximum distance between a curve and its flattened polyline, in local units
    pub tessellation_tolerance: f32,
    /// Number of texels in a gradient lookup strip
    pub gradient_texture_width: u32,
    /// Rows allocated for each gradient strip (the strip lives in row 0)
    ///
    /// Backends with a minimum texture height pad the strip; the shader
    /// compensates through the texture's y coordinate scale.
    pub gradient_texture_rows: u32,
    /// Number of gradient textures kept alive by the cache
    pub gradient_cache_capacity: usize,
    /// Byte alignment of uniform blocks in the transient buffer
    pub uniform_alignment: usize,
    /// Sample count assumed for render targets that don't specify one
    pub default_sample_count: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            tessellation_tolerance: 0.1,
            gradient_texture_width: 256,
            gradient_texture_rows: 1,
            gradient_cache_capacity: 64,
            // wgpu's default `min_uniform_buffer_offset_alignment`
            uniform_alignment: 256,
            default_sample_count: 1,
        }
    }
}

impl RendererConfig {
    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RendererConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded renderer config from {}", path.display());
        Ok(config)
    }

    /// Check that every field holds a usable value
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tessellation_tolerance > 0.0 && self.tessellation_tolerance.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "tessellation_tolerance",
                reason: "must be a positive finite number",
            });
        }
        if self.gradient_texture_width < 2 {
            return Err(ConfigError::Invalid {
                field: "gradient_texture_width",
                reason: "must be at least 2 texels",
            });
        }
        if self.gradient_texture_rows == 0 {
            return Err(ConfigError::Invalid {
                field: "gradient_texture_rows",
                reason: "must be at least 1",
            });
        }
        if self.gradient_cache_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "gradient_cache_capacity",
                reason: "must be at least 1",
            });
        }
        if !self.uniform_alignment.is_power_of_two() {
            return Err(ConfigError::Invalid {
                field: "uniform_alignment",
                reason: "must be a power of two",
            });
        }
        if self.default_sample_count == 0 {
            return Err(ConfigError::Invalid {
                field: "default_sample_count",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
