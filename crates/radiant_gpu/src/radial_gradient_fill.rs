//! Shader interface of the radial gradient fill pipeline
//!
//! These types mirror the WGSL declarations in
//! [`RADIAL_GRADIENT_FILL_SHADER`](crate::shaders::RADIAL_GRADIENT_FILL_SHADER)
//! and must stay byte-compatible with them.

use bytemuck::{Pod, Zeroable};

use crate::pipeline::PipelineDescriptor;
use crate::shaders::RADIAL_GRADIENT_FILL_SHADER;

/// Uniform slot of [`FrameInfo`] (vertex stage)
pub const FRAME_INFO_BINDING: u32 = 0;
/// Uniform slot of [`GradientInfo`] (fragment stage)
pub const GRADIENT_INFO_BINDING: u32 = 1;
/// Texture slot of the gradient lookup strip (fragment stage)
pub const TEXTURE_BINDING: u32 = 2;
/// Sampler slot paired with [`TEXTURE_BINDING`]
pub const SAMPLER_BINDING: u32 = 3;

/// One triangle-list vertex in entity-local coordinates
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct RadialGradientVertex {
    pub position: [f32; 2],
}

/// Per-draw transforms for the vertex stage
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FrameInfo {
    /// Projection times entity transform
    pub mvp: [[f32; 4]; 4],
    /// Maps entity-local positions into gradient space
    pub matrix: [[f32; 4]; 4],
}

/// Gradient parameters for the fragment stage
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GradientInfo {
    pub center: [f32; 2],
    pub radius: f32,
    /// [`TileMode`](crate::entity::TileMode) tag
    pub tile_mode: f32,
    pub texture_sampler_y_coord_scale: f32,
    pub _pad: [f32; 3],
}

const _: () = assert!(std::mem::size_of::<FrameInfo>() == 128);
const _: () = assert!(std::mem::size_of::<GradientInfo>() == 32);

static VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

static BIND_GROUP_LAYOUT_ENTRIES: [wgpu::BindGroupLayoutEntry; 4] = [
    wgpu::BindGroupLayoutEntry {
        binding: FRAME_INFO_BINDING,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    },
    wgpu::BindGroupLayoutEntry {
        binding: GRADIENT_INFO_BINDING,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    },
    wgpu::BindGroupLayoutEntry {
        binding: TEXTURE_BINDING,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    },
    wgpu::BindGroupLayoutEntry {
        binding: SAMPLER_BINDING,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    },
];

/// Shader interface for radial gradient fills
pub fn pipeline_descriptor() -> PipelineDescriptor {
    PipelineDescriptor {
        label: "RadialGradientFill Pipeline",
        shader_source: RADIAL_GRADIENT_FILL_SHADER,
        vertex_entry_point: "vs_main",
        fragment_entry_point: "fs_main",
        vertex_stride: std::mem::size_of::<RadialGradientVertex>() as wgpu::BufferAddress,
        vertex_attributes: &VERTEX_ATTRIBUTES,
        bind_group_layout_entries: &BIND_GROUP_LAYOUT_ENTRIES,
    }
}
