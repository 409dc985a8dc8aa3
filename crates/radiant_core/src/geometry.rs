//! Geometry primitives
//!
//! Points, sizes and rectangles in local (unscaled) coordinates, plus the
//! 4x4 column-major matrix used for entity transforms and projections.

use std::ops::{Add, Mul, Sub};

// ─────────────────────────────────────────────────────────────────────────────
// Points, Sizes, Rects
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        (*self - other).length()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_array(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    fn add(self, rhs: Vec2) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative or NaN
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Create a rect from center point and size
    pub fn from_center(center: Point, size: Size) -> Self {
        Rect {
            origin: Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        }
    }

    /// Create a rect from two corner points
    pub fn from_points(p1: Point, p2: Point) -> Self {
        let min_x = p1.x.min(p2.x);
        let min_y = p1.y.min(p2.y);
        let max_x = p1.x.max(p2.x);
        let max_y = p1.y.max(p2.y);
        Rect {
            origin: Point::new(min_x, min_y),
            size: Size::new(max_x - min_x, max_y - min_y),
        }
    }

    /// Corners in clockwise order starting at the origin
    pub fn corners(&self) -> [Point; 4] {
        [
            self.origin,
            Point::new(self.right(), self.y()),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x(), self.bottom()),
        ]
    }

    /// Axis-aligned bounds of this rect after applying `transform`
    pub fn transform_bounds(&self, transform: &Mat4) -> Rect {
        let corners = self.corners().map(|p| transform.transform_point(p));
        let mut min = corners[0];
        let mut max = corners[0];
        for p in &corners[1..] {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Rect::from_points(min, max)
    }
}

/// 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Matrices
// ─────────────────────────────────────────────────────────────────────────────

/// 4x4 transformation matrix (column-major)
///
/// `cols[c][r]` is the element in column `c`, row `r`, matching the memory
/// layout of a WGSL `mat4x4<f32>`. Points are treated as column vectors, so
/// `a * b` applies `b` first and then `a`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const ZERO: Mat4 = Mat4 {
        cols: [[0.0; 4]; 4],
    };

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [x, 0.0, 0.0, 0.0],
                [0.0, y, 0.0, 0.0],
                [0.0, 0.0, z, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation about the Z axis (in the 2D plane)
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            cols: [
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Orthographic projection for a render target of `size` pixels
    ///
    /// Maps the target's top-left corner to NDC `(-1, 1)` and its bottom-right
    /// corner to `(1, -1)`. All depth collapses onto `z = 0.5`.
    pub fn orthographic(size: Size) -> Self {
        let scale = Self::scale(2.0 / size.width, -2.0 / size.height, 0.0);
        let translate = Self::translation(-1.0, 1.0, 0.5);
        translate.multiply(&scale)
    }

    /// Multiply two matrices
    pub fn multiply(&self, other: &Mat4) -> Mat4 {
        let mut result = [[0.0f32; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    result[i][j] += self.cols[k][j] * other.cols[i][k];
                }
            }
        }
        Mat4 { cols: result }
    }

    /// Inverse via Gauss-Jordan elimination with partial pivoting
    ///
    /// Returns `None` when the matrix is singular.
    pub fn inverse(&self) -> Option<Mat4> {
        // Row-major working copies in f64 so near-singular scales keep precision
        let mut a = [[0.0f64; 4]; 4];
        let mut inv = [[0.0f64; 4]; 4];
        for r in 0..4 {
            for c in 0..4 {
                a[r][c] = self.cols[c][r] as f64;
            }
            inv[r][r] = 1.0;
        }

        for col in 0..4 {
            let pivot_row = (col..4)
                .max_by(|&x, &y| a[x][col].abs().total_cmp(&a[y][col].abs()))
                .unwrap_or(col);
            let pivot = a[pivot_row][col];
            if !pivot.is_finite() || pivot.abs() < 1e-12 {
                return None;
            }
            a.swap(col, pivot_row);
            inv.swap(col, pivot_row);

            for c in 0..4 {
                a[col][c] /= pivot;
                inv[col][c] /= pivot;
            }

            for r in 0..4 {
                if r == col {
                    continue;
                }
                let factor = a[r][col];
                if factor == 0.0 {
                    continue;
                }
                for c in 0..4 {
                    a[r][c] -= factor * a[col][c];
                    inv[r][c] -= factor * inv[col][c];
                }
            }
        }

        let mut cols = [[0.0f32; 4]; 4];
        for (c, col) in cols.iter_mut().enumerate() {
            for (r, value) in col.iter_mut().enumerate() {
                *value = inv[r][c] as f32;
            }
        }
        Some(Mat4 { cols })
    }

    /// Transform a 2D point (z = 0, w = 1), applying the perspective divide
    pub fn transform_point(&self, point: Point) -> Point {
        let m = &self.cols;
        let x = m[0][0] * point.x + m[1][0] * point.y + m[3][0];
        let y = m[0][1] * point.x + m[1][1] * point.y + m[3][1];
        let w = m[0][3] * point.x + m[1][3] * point.y + m[3][3];
        if w != 0.0 && w != 1.0 {
            Point::new(x / w, y / w)
        } else {
            Point::new(x, y)
        }
    }

    /// Element-wise comparison within `epsilon`
    pub fn approx_eq(&self, other: &Mat4, epsilon: f32) -> bool {
        self.cols
            .iter()
            .flatten()
            .zip(other.cols.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }

    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        self.cols
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        self.multiply(&rhs)
    }
}
