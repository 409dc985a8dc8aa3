//! Path flattening for GPU rendering
//!
//! Converts vector paths into polylines (straight-segment contours) using
//! lyon's SVG path builder and curve flattening. Polylines are what the
//! [`Tessellator`](crate::tessellator::Tessellator) consumes.

use std::ops::Range;

use lyon::geom::ArcFlags;
use lyon::math::{point, vector, Angle};
use lyon::path::builder::{Build, SvgPathBuilder};
use lyon::path::iterator::PathIterator;
use lyon::path::PathEvent;
use radiant_core::{Path, PathCommand, Point};

/// Largest coordinate magnitude the fill tessellator accepts
///
/// Sweep-line arithmetic on larger values loses the ordering lyon relies on.
pub const MAX_COORDINATE: f32 = 1.0e7;

/// Whether `point` is finite and within [`MAX_COORDINATE`] on both axes
pub fn is_tessellatable(point: &Point) -> bool {
    point.is_finite() && point.x.abs() <= MAX_COORDINATE && point.y.abs() <= MAX_COORDINATE
}

/// Whether every coordinate of `path` can be handed to lyon
fn has_tessellatable_coordinates(path: &Path) -> bool {
    path.commands().iter().all(|cmd| match cmd {
        PathCommand::MoveTo(p) | PathCommand::LineTo(p) => is_tessellatable(p),
        PathCommand::QuadTo { control, end } => is_tessellatable(control) && is_tessellatable(end),
        PathCommand::CubicTo {
            control1,
            control2,
            end,
        } => is_tessellatable(control1) && is_tessellatable(control2) && is_tessellatable(end),
        PathCommand::ArcTo {
            radii,
            rotation,
            end,
            ..
        } => {
            is_tessellatable(&Point::new(radii.x, radii.y))
                && rotation.is_finite()
                && is_tessellatable(end)
        }
        PathCommand::Close => true,
    })
}

/// One contour of a polyline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contour {
    /// Index of the contour's first point in [`Polyline::points`]
    pub start_index: usize,
    /// Whether the source subpath was explicitly closed
    pub is_closed: bool,
}

/// A path flattened into straight-line contours
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub contours: Vec<Contour>,
}

impl Polyline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index range of the points belonging to contour `index`
    pub fn contour_range(&self, index: usize) -> Range<usize> {
        let start = self.contours[index].start_index;
        let end = self
            .contours
            .get(index + 1)
            .map_or(self.points.len(), |next| next.start_index);
        start..end
    }

    /// Iterate the point slices of every contour
    pub fn contour_points(&self) -> impl Iterator<Item = &[Point]> + '_ {
        (0..self.contours.len()).map(move |i| &self.points[self.contour_range(i)])
    }
}

/// Convert a radiant path into a lyon path
fn to_lyon_path(path: &Path) -> lyon::path::Path {
    let mut builder = lyon::path::Path::svg_builder();

    for cmd in path.commands() {
        match cmd {
            PathCommand::MoveTo(p) => {
                builder.move_to(point(p.x, p.y));
            }
            PathCommand::LineTo(p) => {
                builder.line_to(point(p.x, p.y));
            }
            PathCommand::QuadTo { control, end } => {
                builder.quadratic_bezier_to(point(control.x, control.y), point(end.x, end.y));
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => {
                builder.cubic_bezier_to(
                    point(control1.x, control1.y),
                    point(control2.x, control2.y),
                    point(end.x, end.y),
                );
            }
            PathCommand::ArcTo {
                radii,
                rotation,
                large_arc,
                sweep,
                end,
            } => {
                builder.arc_to(
                    vector(radii.x, radii.y),
                    Angle::radians(*rotation),
                    ArcFlags {
                        large_arc: *large_arc,
                        sweep: *sweep,
                    },
                    point(end.x, end.y),
                );
            }
            PathCommand::Close => builder.close(),
        }
    }

    builder.build()
}

/// Flatten `path` into a polyline, approximating curves within `tolerance`
///
/// Paths with non-finite or out-of-range coordinates flatten to an empty
/// polyline.
pub fn create_polyline(path: &Path, tolerance: f32) -> Polyline {
    let mut polyline = Polyline::new();
    if path.is_empty() {
        return polyline;
    }
    if !has_tessellatable_coordinates(path) {
        tracing::debug!("Path has non-finite or out-of-range coordinates, nothing to flatten");
        return polyline;
    }

    let lyon_path = to_lyon_path(path);
    for event in lyon_path.iter().flattened(tolerance) {
        match event {
            PathEvent::Begin { at } => {
                polyline.contours.push(Contour {
                    start_index: polyline.points.len(),
                    is_closed: false,
                });
                polyline.points.push(Point::new(at.x, at.y));
            }
            PathEvent::Line { to, .. }
            | PathEvent::Quadratic { to, .. }
            | PathEvent::Cubic { to, .. } => {
                polyline.points.push(Point::new(to.x, to.y));
            }
            PathEvent::End { close, .. } => {
                if let Some(contour) = polyline.contours.last_mut() {
                    contour.is_closed = close;
                }
            }
        }
    }

    polyline
}

/// Convert a polyline back into lyon events, closing every contour
///
/// Filling always treats contours as closed, whatever the source path said.
pub(crate) fn polyline_to_lyon_events(polyline: &Polyline) -> Vec<PathEvent> {
    let mut events = Vec::with_capacity(polyline.points.len() + polyline.contours.len() * 2);

    for contour in polyline.contour_points() {
        let Some((first, rest)) = contour.split_first() else {
            continue;
        };
        let first = point(first.x, first.y);
        events.push(PathEvent::Begin { at: first });

        let mut last = first;
        for p in rest {
            let to = point(p.x, p.y);
            events.push(PathEvent::Line { from: last, to });
            last = to;
        }

        events.push(PathEvent::End {
            last,
            first,
            close: true,
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use radiant_core::{Rect, Vec2};

    #[test]
    fn test_rect_polyline() {
        let path = Path::rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        let polyline = create_polyline(&path, 0.1);

        assert_eq!(polyline.contours.len(), 1);
        assert!(polyline.contours[0].is_closed);
        assert_eq!(polyline.points[0], Point::new(0.0, 0.0));
        assert!(polyline.points.contains(&Point::new(100.0, 100.0)));
    }

    #[test]
    fn test_circle_is_flattened() {
        let path = Path::circle(Point::new(50.0, 50.0), 25.0);
        let polyline = create_polyline(&path, 0.1);

        assert_eq!(polyline.contours.len(), 1);
        assert!(polyline.points.len() > 8);
        for p in &polyline.points {
            let d = p.distance(Point::new(50.0, 50.0));
            assert!((d - 25.0).abs() < 0.5, "point {p:?} is {d} from center");
        }
    }

    #[test]
    fn test_coarser_tolerance_gives_fewer_points() {
        let path = Path::circle(Point::new(0.0, 0.0), 100.0);
        let fine = create_polyline(&path, 0.01);
        let coarse = create_polyline(&path, 5.0);
        assert!(coarse.points.len() < fine.points.len());
    }

    #[test]
    fn test_multiple_contours() {
        let path = Path::rect(Rect::new(0.0, 0.0, 10.0, 10.0))
            .move_to(20.0, 20.0)
            .line_to(30.0, 20.0)
            .line_to(30.0, 30.0);
        let polyline = create_polyline(&path, 0.1);

        assert_eq!(polyline.contours.len(), 2);
        assert!(polyline.contours[0].is_closed);
        assert!(!polyline.contours[1].is_closed);

        let contours: Vec<&[Point]> = polyline.contour_points().collect();
        assert_eq!(contours[1][0], Point::new(20.0, 20.0));
        assert_eq!(contours[1].len(), 3);
    }

    #[test]
    fn test_arc_is_flattened() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .arc_to(Vec2::new(10.0, 10.0), 0.0, false, true, 20.0, 0.0)
            .close();
        let polyline = create_polyline(&path, 0.1);

        assert!(polyline.points.len() > 3);
        assert_eq!(polyline.points[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_empty_path() {
        let polyline = create_polyline(&Path::new(), 0.1);
        assert!(polyline.is_empty());
        assert!(polyline.contours.is_empty());
        assert!(polyline_to_lyon_events(&polyline).is_empty());
    }

    #[test]
    fn test_unusable_coordinates_flatten_to_nothing() {
        let nan = Path::new()
            .move_to(0.0, 0.0)
            .line_to(f32::NAN, 10.0)
            .line_to(10.0, 10.0)
            .close();
        assert!(create_polyline(&nan, 0.1).is_empty());

        let infinite_control = Path::new()
            .move_to(0.0, 0.0)
            .quad_to(f32::INFINITY, 5.0, 10.0, 10.0)
            .close();
        assert!(create_polyline(&infinite_control, 0.1).is_empty());

        let huge = Path::rect(Rect::new(-f32::MAX, -f32::MAX, f32::MAX, f32::MAX));
        assert!(create_polyline(&huge, 0.1).is_empty());

        let at_limit = Path::rect(Rect::new(
            -MAX_COORDINATE,
            -MAX_COORDINATE,
            MAX_COORDINATE,
            MAX_COORDINATE,
        ));
        assert!(!create_polyline(&at_limit, 0.1).is_empty());
    }

    #[test]
    fn test_events_close_open_contours() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .line_to(10.0, 10.0);
        let events = polyline_to_lyon_events(&create_polyline(&path, 0.1));

        assert!(matches!(events.first(), Some(PathEvent::Begin { .. })));
        assert!(matches!(
            events.last(),
            Some(PathEvent::End { close: true, .. })
        ));
    }
}
