//! Vector paths
//!
//! A [`Path`] is a list of drawing commands plus the [`FillRule`] that decides
//! which regions count as "inside" when the path is filled.

use crate::geometry::{Point, Rect, Vec2};

/// Rule for deciding whether a point lies inside a self-intersecting path
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillRule {
    /// Inside if the winding number is non-zero
    #[default]
    NonZero,
    /// Inside if the winding number is odd
    EvenOdd,
}

/// Path command for building vector paths
#[derive(Clone, Debug, PartialEq)]
pub enum PathCommand {
    /// Move to a point
    MoveTo(Point),
    /// Line to a point
    LineTo(Point),
    /// Quadratic Bézier curve
    QuadTo { control: Point, end: Point },
    /// Cubic Bézier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// SVG-style elliptical arc to a point
    ArcTo {
        radii: Vec2,
        rotation: f32,
        large_arc: bool,
        sweep: bool,
        end: Point,
    },
    /// Close the current subpath
    Close,
}

/// A vector path
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
    fill_rule: FillRule,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from a vector of commands
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self {
            commands,
            fill_rule: FillRule::default(),
        }
    }

    /// Set the fill rule used when this path is filled
    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    /// Move to a point
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    /// Line to a point
    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    /// Quadratic Bézier curve
    pub fn quad_to(mut self, cx: f32, cy: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::QuadTo {
            control: Point::new(cx, cy),
            end: Point::new(x, y),
        });
        self
    }

    /// Cubic Bézier curve
    pub fn cubic_to(mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::CubicTo {
            control1: Point::new(cx1, cy1),
            control2: Point::new(cx2, cy2),
            end: Point::new(x, y),
        });
        self
    }

    /// SVG Arc to a point
    ///
    /// - `radii`: The x and y radii of the ellipse
    /// - `rotation`: Rotation angle of the ellipse in radians
    /// - `large_arc`: If true, use the larger arc (> 180 degrees)
    /// - `sweep`: If true, draw clockwise; if false, counter-clockwise
    /// - `x`, `y`: End point of the arc
    pub fn arc_to(
        mut self,
        radii: Vec2,
        rotation: f32,
        large_arc: bool,
        sweep: bool,
        x: f32,
        y: f32,
    ) -> Self {
        self.commands.push(PathCommand::ArcTo {
            radii,
            rotation,
            large_arc,
            sweep,
            end: Point::new(x, y),
        });
        self
    }

    /// Close the path
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Create a rectangle path
    pub fn rect(rect: Rect) -> Self {
        Self::new()
            .move_to(rect.x(), rect.y())
            .line_to(rect.right(), rect.y())
            .line_to(rect.right(), rect.bottom())
            .line_to(rect.x(), rect.bottom())
            .close()
    }

    /// Create a circle path
    pub fn circle(center: Point, radius: f32) -> Self {
        // Approximate circle with 4 cubic Bézier curves
        let k = 0.552_284_8;
        let r = radius;
        let cx = center.x;
        let cy = center.y;

        Self::new()
            .move_to(cx + r, cy)
            .cubic_to(cx + r, cy + r * k, cx + r * k, cy + r, cx, cy + r)
            .cubic_to(cx - r * k, cy + r, cx - r, cy + r * k, cx - r, cy)
            .cubic_to(cx - r, cy - r * k, cx - r * k, cy - r, cx, cy - r)
            .cubic_to(cx + r * k, cy - r, cx + r, cy - r * k, cx + r, cy)
            .close()
    }

    /// Get the path commands
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Calculate the bounding rectangle of this path
    ///
    /// Control points are included, so curved paths get a conservative box.
    pub fn bounds(&self) -> Rect {
        if self.commands.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        let mut include = |p: &Point| {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        };

        let mut current = Point::ZERO;
        let mut subpath_start = Point::ZERO;
        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(p) => {
                    include(p);
                    subpath_start = *p;
                    current = *p;
                }
                PathCommand::LineTo(p) => {
                    include(p);
                    current = *p;
                }
                PathCommand::QuadTo { control, end } => {
                    include(control);
                    include(end);
                    current = *end;
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    include(control1);
                    include(control2);
                    include(end);
                    current = *end;
                }
                PathCommand::ArcTo {
                    radii,
                    rotation,
                    end,
                    ..
                } => {
                    // The ellipse passes through both endpoints, so every
                    // point of the arc is within twice its largest radius of
                    // each of them.
                    let reach = 2.0 * arc_max_radius(current, *radii, *rotation, *end);
                    include(&current);
                    include(end);
                    include(&Point::new(
                        (current.x - reach).max(end.x - reach),
                        (current.y - reach).max(end.y - reach),
                    ));
                    include(&Point::new(
                        (current.x + reach).min(end.x + reach),
                        (current.y + reach).min(end.y + reach),
                    ));
                    current = *end;
                }
                PathCommand::Close => current = subpath_start,
            }
        }

        if min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite() {
            Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
        } else {
            Rect::ZERO
        }
    }
}

/// Largest radius of an SVG arc's ellipse after out-of-range radii are
/// scaled up to span the endpoints
fn arc_max_radius(start: Point, radii: Vec2, rotation: f32, end: Point) -> f32 {
    let (rx, ry) = (radii.x.abs(), radii.y.abs());
    if rx == 0.0 || ry == 0.0 {
        // Degenerates to a straight line
        return 0.0;
    }

    let (sin, cos) = rotation.sin_cos();
    let dx = (start.x - end.x) / 2.0;
    let dy = (start.y - end.y) / 2.0;
    let x1 = cos * dx + sin * dy;
    let y1 = -sin * dx + cos * dy;
    let lambda = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);

    rx.max(ry) * lambda.sqrt().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_builder() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .line_to(100.0, 0.0)
            .line_to(100.0, 100.0)
            .line_to(0.0, 100.0)
            .close();

        assert_eq!(path.commands().len(), 5);
        assert_eq!(path.fill_rule(), FillRule::NonZero);
    }

    #[test]
    fn test_path_shortcuts() {
        let rect = Path::rect(Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(rect.commands().len(), 5); // move + 3 lines + close

        let circle = Path::circle(Point::new(50.0, 50.0), 25.0);
        assert!(!circle.is_empty());
    }

    #[test]
    fn test_bounds() {
        let rect = Path::rect(Rect::new(-10.0, -10.0, 20.0, 20.0));
        assert_eq!(rect.bounds(), Rect::new(-10.0, -10.0, 20.0, 20.0));

        let circle = Path::circle(Point::new(50.0, 50.0), 25.0);
        assert_eq!(circle.bounds(), Rect::new(25.0, 25.0, 50.0, 50.0));

        assert_eq!(Path::new().bounds(), Rect::ZERO);
    }

    #[test]
    fn test_arc_bounds_cover_bulge() {
        // Radii too small for the chord get scaled up to a half circle of radius 50
        let arc = Path::new()
            .move_to(0.0, 0.0)
            .arc_to(Vec2::new(1.0, 1.0), 0.0, false, true, 100.0, 0.0)
            .close();
        let bounds = arc.bounds();
        assert!(bounds.x() <= 0.0 && bounds.right() >= 100.0);
        assert!(bounds.y() <= -50.0 && bounds.bottom() >= 50.0);

        // Large arc whose center sits away from the end point
        let large = Path::new()
            .move_to(0.0, 0.0)
            .arc_to(Vec2::new(10.0, 10.0), 0.0, true, true, 10.0, 0.0)
            .close();
        let bounds = large.bounds();
        assert!(bounds.x() <= -4.0 && bounds.right() >= 14.0);
        assert!(bounds.y() <= -18.6 && bounds.bottom() >= 18.6);
    }

    #[test]
    fn test_fill_rule_is_kept() {
        let path = Path::rect(Rect::new(0.0, 0.0, 1.0, 1.0)).with_fill_rule(FillRule::EvenOdd);
        assert_eq!(path.fill_rule(), FillRule::EvenOdd);
    }
}
