//! Fill tessellation
//!
//! Triangulates flattened paths into flat triangle lists using lyon. Callers
//! receive vertices through a callback, three per triangle, so they can pack
//! them into whatever vertex layout their pipeline expects.

use lyon::lyon_tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, TessellationError, VertexBuffers,
};
use radiant_core::{FillRule, Point};

use crate::path::{is_tessellatable, polyline_to_lyon_events, Polyline};

/// Outcome of a tessellation request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TessellationResult {
    /// Triangles were emitted
    Success,
    /// The input has nothing to fill (empty, zero-area, or non-finite)
    InputError,
    /// The tessellator failed while processing valid input
    TessellationError,
}

/// Triangulates polylines into triangle lists
pub trait Tessellator: Send + Sync {
    /// Tessellate `polyline` under `fill_rule`, calling `emit` once per
    /// triangle-list vertex
    fn tessellate(
        &self,
        fill_rule: FillRule,
        polyline: &Polyline,
        emit: &mut dyn FnMut(Point),
    ) -> TessellationResult;
}

/// Tessellator backed by lyon's sweep-line fill tessellator
///
/// Input polylines are already flattened (see
/// [`create_polyline`](crate::path::create_polyline)), so no curve tolerance
/// applies here.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathTessellator;

impl PathTessellator {
    pub fn new() -> Self {
        Self
    }
}

fn to_lyon_fill_rule(fill_rule: FillRule) -> lyon::lyon_tessellation::FillRule {
    match fill_rule {
        FillRule::NonZero => lyon::lyon_tessellation::FillRule::NonZero,
        FillRule::EvenOdd => lyon::lyon_tessellation::FillRule::EvenOdd,
    }
}

impl Tessellator for PathTessellator {
    fn tessellate(
        &self,
        fill_rule: FillRule,
        polyline: &Polyline,
        emit: &mut dyn FnMut(Point),
    ) -> TessellationResult {
        if polyline.is_empty() {
            return TessellationResult::InputError;
        }
        if !polyline.points.iter().all(is_tessellatable) {
            tracing::debug!("Polyline has non-finite or out-of-range coordinates, nothing to fill");
            return TessellationResult::InputError;
        }

        let events = polyline_to_lyon_events(polyline);
        let mut geometry: VertexBuffers<lyon::math::Point, u32> = VertexBuffers::new();
        let mut tessellator = FillTessellator::new();

        let options = FillOptions::default().with_fill_rule(to_lyon_fill_rule(fill_rule));

        let result = tessellator.tessellate(
            events.iter().cloned(),
            &options,
            &mut BuffersBuilder::new(&mut geometry, |vertex: FillVertex| vertex.position()),
        );

        if let Err(err) = result {
            return match err {
                TessellationError::UnsupportedParamater(_) => {
                    tracing::debug!("Path fill rejected by tessellator: {:?}", err);
                    TessellationResult::InputError
                }
                _ => {
                    tracing::warn!("Path fill tessellation failed: {:?}", err);
                    TessellationResult::TessellationError
                }
            };
        }

        // Zero-area regions come back with no triangles
        if geometry.indices.is_empty() {
            return TessellationResult::InputError;
        }

        for index in &geometry.indices {
            let Some(vertex) = geometry.vertices.get(*index as usize) else {
                tracing::warn!("Tessellator produced out-of-range index {}", index);
                return TessellationResult::TessellationError;
            };
            emit(Point::new(vertex.x, vertex.y));
        }

        TessellationResult::Success
    }
}
