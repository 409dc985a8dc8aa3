//! Radiant Core Types
//!
//! Value types shared by every Radiant crate:
//!
//! - **Geometry**: points, sizes, rectangles and 4x4 column-major matrices
//! - **Paint**: linear RGBA colors
//! - **Paths**: vector paths with a fill rule, built from move/line/curve/arc commands
//!
//! # Example
//!
//! ```rust
//! use radiant_core::{Mat4, Path, Point, Rect, Size};
//!
//! let square = Path::rect(Rect::new(-10.0, -10.0, 20.0, 20.0));
//! assert_eq!(square.bounds(), Rect::new(-10.0, -10.0, 20.0, 20.0));
//!
//! let projection = Mat4::orthographic(Size::new(800.0, 600.0));
//! let ndc = projection.transform_point(Point::new(400.0, 300.0));
//! assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
//! ```

pub mod color;
pub mod geometry;
pub mod path;

pub use color::Color;
pub use geometry::{Mat4, Point, Rect, Size, Vec2};
pub use path::{FillRule, Path, PathCommand};
