//! Radiant GPU Contents
//!
//! Turns declarative paint descriptions into draw commands for wgpu.
//!
//! # Features
//!
//! - **Radial Gradients**: path fills shaded by a gradient radiating from a center point
//! - **Tile Modes**: clamp, repeat, mirror and decal behavior beyond the last stop
//! - **Tessellation**: lyon-based fill tessellation with non-zero and even-odd rules
//! - **Gradient Textures**: LRU-cached lookup strips shared across contents
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use radiant_core::{Color, Path, Point, Rect, Size};
//! use radiant_gpu::{
//!     ContentContext, Entity, RadialGradientContents, RecordingRenderPass, RenderTarget,
//!     TileMode,
//! };
//!
//! let mut gradient = RadialGradientContents::new();
//! gradient.set_path(Path::rect(Rect::new(0.0, 0.0, 20.0, 20.0)));
//! gradient.set_center_and_radius(Point::new(10.0, 10.0), 10.0);
//! gradient.set_colors(vec![Color::RED, Color::BLUE]);
//! gradient.set_stops(vec![0.0, 1.0]);
//! gradient.set_tile_mode(TileMode::Mirror);
//!
//! let mut entity = Entity::new();
//! entity.set_contents(Arc::new(gradient));
//!
//! let context = ContentContext::default();
//! let mut pass = RecordingRenderPass::new(RenderTarget::new(Size::new(800.0, 600.0)));
//! assert!(entity.render(&context, &mut pass));
//! assert_eq!(pass.commands().len(), 1);
//! ```

pub mod command;
pub mod config;
pub mod content_context;
pub mod contents;
pub mod entity;
pub mod error;
pub mod gradient_texture;
pub mod host_buffer;
pub mod path;
pub mod pipeline;
pub mod radial_gradient_fill;
pub mod render_pass;
pub mod sampler;
pub mod shaders;
pub mod tessellator;
pub mod texture;
pub mod vertex_buffer;

#[cfg(test)]
pub(crate) mod testing;

pub use command::{Bindings, Command, ShaderStage, TextureAndSampler};
pub use config::RendererConfig;
pub use content_context::ContentContext;
pub use contents::{ColorSourceGeometry, Contents, RadialGradientContents, RenderOutcome};
pub use entity::{BlendMode, Entity, TileMode};
pub use error::{ConfigError, RenderError};
pub use gradient_texture::{GradientTextureCache, GradientTextureProvider, RasterizedGradient};
pub use host_buffer::{BufferView, HostBuffer};
pub use path::{create_polyline, Polyline};
pub use pipeline::{Pipeline, PipelineOptions};
pub use render_pass::{RecordingRenderPass, RenderPass, RenderTarget};
pub use sampler::{Sampler, SamplerDescriptor, SamplerLibrary};
pub use shaders::RADIAL_GRADIENT_FILL_SHADER;
pub use tessellator::{PathTessellator, TessellationResult, Tessellator};
pub use texture::Texture;
pub use vertex_buffer::{VertexBuffer, VertexBufferBuilder};
