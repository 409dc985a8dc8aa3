//! Test doubles for the rendering seams

use std::sync::Arc;

use radiant_core::{Color, FillRule, Point, Size};

use crate::command::Command;
use crate::gradient_texture::GradientTextureProvider;
use crate::host_buffer::HostBuffer;
use crate::path::Polyline;
use crate::render_pass::{RecordingRenderPass, RenderPass, RenderTarget};
use crate::tessellator::{TessellationResult, Tessellator};
use crate::texture::Texture;

/// Tessellator that always reports the same result and emits nothing
pub struct FixedResultTessellator(pub TessellationResult);

impl Tessellator for FixedResultTessellator {
    fn tessellate(
        &self,
        _fill_rule: FillRule,
        _polyline: &Polyline,
        _emit: &mut dyn FnMut(Point),
    ) -> TessellationResult {
        self.0
    }
}

/// Provider that never has a texture
pub struct AbsentGradientTextures;

impl GradientTextureProvider for AbsentGradientTextures {
    fn build_or_fetch(&self, _colors: &[Color], _stops: &[f32]) -> Option<Arc<Texture>> {
        None
    }
}

/// Pass that refuses every command
pub struct RejectingRenderPass {
    inner: RecordingRenderPass,
    pub attempts: usize,
}

impl RejectingRenderPass {
    pub fn new(size: Size) -> Self {
        Self {
            inner: RecordingRenderPass::new(RenderTarget::new(size)),
            attempts: 0,
        }
    }
}

impl RenderPass for RejectingRenderPass {
    fn render_target(&self) -> &RenderTarget {
        self.inner.render_target()
    }

    fn transients_buffer(&mut self) -> &mut HostBuffer {
        self.inner.transients_buffer()
    }

    fn add_command(&mut self, _command: Command) -> bool {
        self.attempts += 1;
        false
    }
}
