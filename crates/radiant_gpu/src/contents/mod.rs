//! Contents: the paint strategies an [`Entity`] can draw with
//!
//! Each contents type turns its own declarative description into draw
//! commands on a [`RenderPass`], using the shared services of a
//! [`ContentContext`].

mod color_source;
mod radial_gradient;

pub use color_source::ColorSourceGeometry;
pub use radial_gradient::RadialGradientContents;

use radiant_core::Rect;

use crate::content_context::ContentContext;
use crate::entity::Entity;
use crate::render_pass::RenderPass;

/// Successful result of rendering contents
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A command was submitted to the pass
    Drawn,
    /// The geometry covered nothing, so there was nothing to submit
    Empty,
}

/// Something an entity can draw
pub trait Contents: Send + Sync {
    /// Record the draw commands for `entity` into `pass`
    ///
    /// Returns `false` only when something went wrong; contents that have
    /// nothing to draw succeed without recording anything.
    fn render(&self, renderer: &ContentContext, entity: &Entity, pass: &mut dyn RenderPass)
        -> bool;

    /// Area of the render target these contents may touch
    fn coverage(&self, entity: &Entity) -> Option<Rect>;
}
