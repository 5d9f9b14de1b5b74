//! Geometric primitives for rasterization.
//!
//! Coordinates are continuous pixel space: `(0, 0)` is the top-left corner of
//! the top-left pixel and the center of that pixel is `(0.5, 0.5)`. The same
//! [`Point`] type carries texture coordinates.

use std::ops::{Add, Mul, Sub};

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the point treated as a vector.
    #[must_use]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// 2D cross product (z component of the 3D cross product).
    #[must_use]
    pub fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Returns true if either coordinate is NaN.
    #[must_use]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Returns true if both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create a line from coordinates.
    #[must_use]
    pub const fn from_coords(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Get the length of the line.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// A triangle given by three vertices in any winding order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Triangle {
    /// The three vertices.
    pub vertices: [Point; 3],
}

impl Triangle {
    /// Create a new triangle.
    #[must_use]
    pub const fn new(v0: Point, v1: Point, v2: Point) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Twice the signed area. Positive for counter-clockwise order in a
    /// y-up frame, which is clockwise on screen (y-down).
    #[must_use]
    pub fn signed_double_area(&self) -> f32 {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(v2 - v0)
    }

    /// Unsigned area.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.signed_double_area().abs() / 2.0
    }

    /// The same triangle with the opposite winding.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        let [v0, v1, v2] = self.vertices;
        Self::new(v0, v2, v1)
    }
}
