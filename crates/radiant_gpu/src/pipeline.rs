//! Render pipelines
//!
//! A [`Pipeline`] pairs a shader interface ([`PipelineDescriptor`]) with the
//! target-dependent [`PipelineOptions`] it was specialized for. Pipelines are
//! plain descriptions until [`Pipeline::create_render_pipeline`] turns them
//! into wgpu objects, so they can be cached and compared without a device.

use std::borrow::Cow;

use crate::entity::{BlendMode, Entity};
use crate::render_pass::RenderPass;

/// Stencil attachment format used by every pipeline that tests the clip stack
pub const STENCIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Stencil8;

/// Target- and entity-dependent pipeline state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PipelineOptions {
    pub sample_count: u32,
    pub color_format: wgpu::TextureFormat,
    pub blend_mode: BlendMode,
    pub has_stencil_attachment: bool,
    pub stencil_compare: wgpu::CompareFunction,
    pub stencil_operation: wgpu::StencilOperation,
    pub primitive_topology: wgpu::PrimitiveTopology,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            sample_count: 1,
            color_format: wgpu::TextureFormat::Bgra8Unorm,
            blend_mode: BlendMode::SourceOver,
            has_stencil_attachment: true,
            stencil_compare: wgpu::CompareFunction::Equal,
            stencil_operation: wgpu::StencilOperation::Keep,
            primitive_topology: wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

/// Pipeline options for drawing `entity` into `pass`
///
/// Draws only touch pixels whose stencil value equals the entity's clip
/// depth, and leave the stencil buffer unchanged.
pub fn options_from_pass_and_entity(pass: &dyn RenderPass, entity: &Entity) -> PipelineOptions {
    let target = pass.render_target();
    PipelineOptions {
        sample_count: target.sample_count,
        color_format: target.color_format,
        blend_mode: entity.blend_mode(),
        has_stencil_attachment: target.has_stencil_attachment,
        ..Default::default()
    }
}

/// Shader interface of a pipeline
#[derive(Clone, Debug)]
pub struct PipelineDescriptor {
    pub label: &'static str,
    pub shader_source: &'static str,
    pub vertex_entry_point: &'static str,
    pub fragment_entry_point: &'static str,
    pub vertex_stride: wgpu::BufferAddress,
    pub vertex_attributes: &'static [wgpu::VertexAttribute],
    pub bind_group_layout_entries: &'static [wgpu::BindGroupLayoutEntry],
}

/// A pipeline specialized for one set of [`PipelineOptions`]
#[derive(Debug)]
pub struct Pipeline {
    descriptor: PipelineDescriptor,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(descriptor: PipelineDescriptor, options: PipelineOptions) -> Self {
        Self {
            descriptor,
            options,
        }
    }

    pub fn label(&self) -> &'static str {
        self.descriptor.label
    }

    pub fn descriptor(&self) -> &PipelineDescriptor {
        &self.descriptor
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn vertex_buffer_layout(&self) -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: self.descriptor.vertex_stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: self.descriptor.vertex_attributes,
        }
    }

    pub fn color_target_state(&self) -> wgpu::ColorTargetState {
        wgpu::ColorTargetState {
            format: self.options.color_format,
            blend: Some(self.options.blend_mode.to_blend_state()),
            write_mask: wgpu::ColorWrites::ALL,
        }
    }

    pub fn primitive_state(&self) -> wgpu::PrimitiveState {
        wgpu::PrimitiveState {
            topology: self.options.primitive_topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        }
    }

    pub fn multisample_state(&self) -> wgpu::MultisampleState {
        wgpu::MultisampleState {
            count: self.options.sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        }
    }

    /// Stencil test against the clip depth, if the target has a stencil attachment
    pub fn depth_stencil_state(&self) -> Option<wgpu::DepthStencilState> {
        if !self.options.has_stencil_attachment {
            return None;
        }

        let face = wgpu::StencilFaceState {
            compare: self.options.stencil_compare,
            fail_op: wgpu::StencilOperation::Keep,
            depth_fail_op: wgpu::StencilOperation::Keep,
            pass_op: self.options.stencil_operation,
        };

        Some(wgpu::DepthStencilState {
            format: STENCIL_FORMAT,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Always,
            stencil: wgpu::StencilState {
                front: face,
                back: face,
                read_mask: !0,
                write_mask: !0,
            },
            bias: wgpu::DepthBiasState::default(),
        })
    }

    /// Compile the shader and build the wgpu render pipeline
    pub fn create_render_pipeline(&self, device: &wgpu::Device) -> wgpu::RenderPipeline {
        let label = Some(self.descriptor.label);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label,
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(self.descriptor.shader_source)),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label,
            entries: self.descriptor.bind_group_layout_entries,
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label,
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        tracing::debug!(
            "Creating pipeline `{}` for {:?} x{}",
            self.descriptor.label,
            self.options.color_format,
            self.options.sample_count
        );

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label,
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(self.descriptor.vertex_entry_point),
                buffers: &[self.vertex_buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(self.descriptor.fragment_entry_point),
                targets: &[Some(self.color_target_state())],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: self.primitive_state(),
            depth_stencil: self.depth_stencil_state(),
            multisample: self.multisample_state(),
            multiview: None,
            cache: None,
        })
    }
}
