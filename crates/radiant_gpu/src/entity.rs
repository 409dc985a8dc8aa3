//! Entities
//!
//! An [`Entity`] places a piece of [`Contents`] in the scene: it carries the
//! world transform, the clip-stack depth used as the stencil reference, and
//! the blend mode the contents are composited with.

use std::fmt;
use std::sync::Arc;

use radiant_core::Mat4;

use crate::content_context::ContentContext;
use crate::contents::Contents;
use crate::render_pass::RenderPass;

/// Behavior of a gradient beyond its last stop
///
/// The discriminants are the numeric tags shaders switch on.
#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileMode {
    /// Extend the edge colors
    #[default]
    Clamp = 0,
    /// Restart the gradient every period
    Repeat = 1,
    /// Alternate forward and reversed periods
    Mirror = 2,
    /// Transparent outside the gradient's range
    Decal = 3,
}

impl TileMode {
    /// Tag as written into shader uniforms
    pub fn as_scalar(self) -> f32 {
        self as u32 as f32
    }
}

/// Porter-Duff compositing of an entity onto the render target
///
/// Colors written by shaders are premultiplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    Clear,
    Source,
    Destination,
    #[default]
    SourceOver,
    DestinationOver,
    Plus,
    Modulate,
}

impl BlendMode {
    /// Equivalent fixed-function blend state
    pub fn to_blend_state(self) -> wgpu::BlendState {
        use wgpu::BlendFactor as F;

        let (src, dst) = match self {
            BlendMode::Clear => (F::Zero, F::Zero),
            BlendMode::Source => (F::One, F::Zero),
            BlendMode::Destination => (F::Zero, F::One),
            BlendMode::SourceOver => (F::One, F::OneMinusSrcAlpha),
            BlendMode::DestinationOver => (F::OneMinusDstAlpha, F::One),
            BlendMode::Plus => (F::One, F::One),
            BlendMode::Modulate => (F::Dst, F::Zero),
        };
        let component = wgpu::BlendComponent {
            src_factor: src,
            dst_factor: dst,
            operation: wgpu::BlendOperation::Add,
        };

        wgpu::BlendState {
            color: component,
            alpha: component,
        }
    }
}

/// A positioned, composited instance of some contents
#[derive(Clone, Default)]
pub struct Entity {
    transform: Mat4,
    stencil_depth: u32,
    blend_mode: BlendMode,
    contents: Option<Arc<dyn Contents>>,
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("transform", &self.transform)
            .field("stencil_depth", &self.stencil_depth)
            .field("blend_mode", &self.blend_mode)
            .field("has_contents", &self.contents.is_some())
            .finish()
    }
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    pub fn stencil_depth(&self) -> u32 {
        self.stencil_depth
    }

    pub fn set_stencil_depth(&mut self, depth: u32) {
        self.stencil_depth = depth;
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub fn set_blend_mode(&mut self, blend_mode: BlendMode) {
        self.blend_mode = blend_mode;
    }

    pub fn contents(&self) -> Option<&Arc<dyn Contents>> {
        self.contents.as_ref()
    }

    pub fn set_contents(&mut self, contents: Arc<dyn Contents>) {
        self.contents = Some(contents);
    }

    /// Render this entity's contents into `pass`
    ///
    /// An entity without contents has nothing to draw and succeeds.
    pub fn render(&self, renderer: &ContentContext, pass: &mut dyn RenderPass) -> bool {
        match &self.contents {
            Some(contents) => contents.render(renderer, self, pass),
            None => true,
        }
    }
}
