//! Render passes
//!
//! Contents never talk to wgpu directly. They pack their per-draw data into
//! the pass's transient buffer and hand it a [`Command`]; the pass decides
//! whether the command can be encoded.

use radiant_core::Size;

use crate::command::Command;
use crate::config::RendererConfig;
use crate::host_buffer::HostBuffer;

/// Properties of the attachments a pass renders into
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderTarget {
    pub size: Size,
    pub color_format: wgpu::TextureFormat,
    pub sample_count: u32,
    pub has_stencil_attachment: bool,
}

impl RenderTarget {
    pub fn new(size: Size) -> Self {
        Self::from_config(size, &RendererConfig::default())
    }

    /// Target with `config`'s default sample count
    pub fn from_config(size: Size, config: &RendererConfig) -> Self {
        Self {
            size,
            color_format: wgpu::TextureFormat::Bgra8Unorm,
            sample_count: config.default_sample_count,
            has_stencil_attachment: true,
        }
    }

    pub fn with_color_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.color_format = format;
        self
    }

    pub fn with_sample_count(mut self, count: u32) -> Self {
        self.sample_count = count;
        self
    }

    pub fn with_stencil_attachment(mut self, has_stencil: bool) -> Self {
        self.has_stencil_attachment = has_stencil;
        self
    }
}

/// A pass that accepts draw commands
pub trait RenderPass {
    fn render_target(&self) -> &RenderTarget;

    /// Size of the render target in pixels
    fn render_target_size(&self) -> Size {
        self.render_target().size
    }

    /// Buffer for this pass's per-draw uniforms and vertices
    fn transients_buffer(&mut self) -> &mut HostBuffer;

    /// Record `command`, returning whether the pass accepted it
    fn add_command(&mut self, command: Command) -> bool;
}

/// A render pass that validates and records commands for later encoding
#[derive(Debug)]
pub struct RecordingRenderPass {
    target: RenderTarget,
    transients: HostBuffer,
    commands: Vec<Command>,
    finished: bool,
}

impl RecordingRenderPass {
    pub fn new(target: RenderTarget) -> Self {
        Self::with_config(target, &RendererConfig::default())
    }

    /// Create a pass whose transient buffer follows `config`'s uniform alignment
    pub fn with_config(target: RenderTarget, config: &RendererConfig) -> Self {
        Self {
            target,
            transients: HostBuffer::new(config.uniform_alignment),
            commands: Vec::new(),
            finished: false,
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn transients(&self) -> &HostBuffer {
        &self.transients
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Close the pass; later commands are rejected
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Reopen the pass for a new frame, dropping recorded commands and
    /// transient data
    pub fn reset(&mut self) {
        self.commands.clear();
        self.transients.reset();
        self.finished = false;
    }

    fn is_compatible(&self, command: &Command) -> bool {
        let options = command.pipeline.options();
        options.color_format == self.target.color_format
            && options.sample_count == self.target.sample_count
            && options.has_stencil_attachment == self.target.has_stencil_attachment
    }
}

impl RenderPass for RecordingRenderPass {
    fn render_target(&self) -> &RenderTarget {
        &self.target
    }

    fn transients_buffer(&mut self) -> &mut HostBuffer {
        &mut self.transients
    }

    fn add_command(&mut self, command: Command) -> bool {
        if self.finished {
            tracing::warn!("Rejecting `{}`: render pass already finished", command.label);
            return false;
        }
        if !command.is_valid() {
            tracing::warn!("Rejecting `{}`: no vertex buffer bound", command.label);
            return false;
        }
        if !self.is_compatible(&command) {
            tracing::warn!(
                "Rejecting `{}`: pipeline built for {:?} x{}, target is {:?} x{}",
                command.label,
                command.pipeline.options().color_format,
                command.pipeline.options().sample_count,
                self.target.color_format,
                self.target.sample_count
            );
            return false;
        }
        if command.vertex_count() == 0 {
            // Nothing to draw
            return true;
        }

        tracing::trace!(
            "Recorded `{}` with {} vertices",
            command.label,
            command.vertex_count()
        );
        self.commands.push(command);
        true
    }
}
