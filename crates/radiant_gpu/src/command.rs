//! Draw commands
//!
//! A [`Command`] is one draw call recorded into a render pass: a pipeline,
//! the vertices to draw with it, and the resources bound to each shader
//! stage.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::host_buffer::BufferView;
use crate::pipeline::Pipeline;
use crate::sampler::Sampler;
use crate::texture::Texture;
use crate::vertex_buffer::VertexBuffer;

/// Shader stage a resource is bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// A texture and the sampler it is read through
#[derive(Clone, Debug)]
pub struct TextureAndSampler {
    pub texture: Arc<Texture>,
    pub sampler: Arc<Sampler>,
}

/// Resources bound to one shader stage, keyed by slot
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    pub uniforms: BTreeMap<u32, BufferView>,
    pub sampled_textures: BTreeMap<u32, TextureAndSampler>,
}

impl Bindings {
    pub fn is_empty(&self) -> bool {
        self.uniforms.is_empty() && self.sampled_textures.is_empty()
    }
}

/// A single draw call
#[derive(Clone, Debug)]
pub struct Command {
    /// Debug label shown in GPU captures
    pub label: &'static str,
    pub pipeline: Arc<Pipeline>,
    pub vertex_buffer: Option<VertexBuffer>,
    pub primitive_topology: wgpu::PrimitiveTopology,
    pub stencil_reference: u32,
    pub vertex_bindings: Bindings,
    pub fragment_bindings: Bindings,
}

impl Command {
    pub fn new(label: &'static str, pipeline: Arc<Pipeline>) -> Self {
        let primitive_topology = pipeline.options().primitive_topology;
        Self {
            label,
            pipeline,
            vertex_buffer: None,
            primitive_topology,
            stencil_reference: 0,
            vertex_bindings: Bindings::default(),
            fragment_bindings: Bindings::default(),
        }
    }

    pub fn bind_vertices(&mut self, vertex_buffer: VertexBuffer) {
        self.vertex_buffer = Some(vertex_buffer);
    }

    /// Bind a uniform block to `slot` of `stage`
    pub fn bind_uniform(&mut self, stage: ShaderStage, slot: u32, view: BufferView) {
        self.bindings_mut(stage).uniforms.insert(slot, view);
    }

    /// Bind a texture and sampler to `slot` of the fragment stage
    pub fn bind_texture_sampler(&mut self, slot: u32, texture: Arc<Texture>, sampler: Arc<Sampler>) {
        self.fragment_bindings
            .sampled_textures
            .insert(slot, TextureAndSampler { texture, sampler });
    }

    pub fn bindings(&self, stage: ShaderStage) -> &Bindings {
        match stage {
            ShaderStage::Vertex => &self.vertex_bindings,
            ShaderStage::Fragment => &self.fragment_bindings,
        }
    }

    fn bindings_mut(&mut self, stage: ShaderStage) -> &mut Bindings {
        match stage {
            ShaderStage::Vertex => &mut self.vertex_bindings,
            ShaderStage::Fragment => &mut self.fragment_bindings,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_buffer.map_or(0, |buffer| buffer.vertex_count)
    }

    /// Whether the command has everything a draw needs
    pub fn is_valid(&self) -> bool {
        self.vertex_buffer.is_some()
    }
}
