//! Shared rendering services for contents
//!
//! The [`ContentContext`] owns everything contents need but don't own
//! themselves: the tessellator, gradient lookup textures, samplers, and the
//! per-options pipeline variants. It is shared by reference across every
//! entity rendered in a frame.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::config::RendererConfig;
use crate::gradient_texture::{GradientTextureCache, GradientTextureProvider};
use crate::pipeline::{Pipeline, PipelineOptions};
use crate::radial_gradient_fill;
use crate::sampler::SamplerLibrary;
use crate::tessellator::{PathTessellator, Tessellator};

pub struct ContentContext {
    config: RendererConfig,
    tessellator: Arc<dyn Tessellator>,
    gradient_textures: Arc<dyn GradientTextureProvider>,
    sampler_library: SamplerLibrary,
    radial_gradient_fill_pipelines: Mutex<HashMap<PipelineOptions, Arc<Pipeline>>>,
}

impl fmt::Debug for ContentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentContext")
            .field("config", &self.config)
            .field("samplers", &self.sampler_library.len())
            .field("pipelines", &self.pipeline_count())
            .finish()
    }
}

impl Default for ContentContext {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

impl ContentContext {
    /// Create a context with the lyon tessellator and an LRU gradient cache
    pub fn new(config: RendererConfig) -> Self {
        let tessellator = Arc::new(PathTessellator::new());
        let gradient_textures = Arc::new(GradientTextureCache::new(&config));
        tracing::debug!(
            "ContentContext created (tolerance {}, gradient strip {}x{}, cache {})",
            config.tessellation_tolerance,
            config.gradient_texture_width,
            config.gradient_texture_rows,
            config.gradient_cache_capacity
        );
        Self {
            config,
            tessellator,
            gradient_textures,
            sampler_library: SamplerLibrary::new(),
            radial_gradient_fill_pipelines: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the tessellator
    pub fn with_tessellator(mut self, tessellator: Arc<dyn Tessellator>) -> Self {
        self.tessellator = tessellator;
        self
    }

    /// Replace the gradient texture provider
    pub fn with_gradient_textures(mut self, provider: Arc<dyn GradientTextureProvider>) -> Self {
        self.gradient_textures = provider;
        self
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn tessellator(&self) -> &dyn Tessellator {
        self.tessellator.as_ref()
    }

    pub fn gradient_textures(&self) -> &dyn GradientTextureProvider {
        self.gradient_textures.as_ref()
    }

    pub fn sampler_library(&self) -> &SamplerLibrary {
        &self.sampler_library
    }

    /// Radial gradient fill pipeline specialized for `options`
    pub fn radial_gradient_fill_pipeline(&self, options: PipelineOptions) -> Arc<Pipeline> {
        let mut pipelines = self
            .radial_gradient_fill_pipelines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(pipelines.entry(options).or_insert_with(|| {
            tracing::debug!(
                "New radial gradient fill variant: {:?} x{}, {:?}",
                options.color_format,
                options.sample_count,
                options.blend_mode
            );
            Arc::new(Pipeline::new(
                radial_gradient_fill::pipeline_descriptor(),
                options,
            ))
        }))
    }

    /// Number of pipeline variants created so far
    pub fn pipeline_count(&self) -> usize {
        self.radial_gradient_fill_pipelines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
