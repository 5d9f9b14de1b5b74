//! Triangle setup: coverage and barycentric weights on the sample grid.
//!
//! Vertices are scaled into sample-grid units once, then every cell center in
//! the clamped bounding box is tested against three directed edges. The edge
//! list is picked from the winding so a point is inside exactly when it is on
//! the non-negative side of all three edges, whichever order the caller
//! passed the vertices in.

use crate::geometry::{Point, Triangle};

/// Edge order for counter-clockwise (non-negative) winding.
const CCW_EDGES: [(usize, usize); 3] = [(0, 1), (1, 2), (2, 0)];
/// Edge order for clockwise winding.
const CW_EDGES: [(usize, usize); 3] = [(0, 2), (2, 1), (1, 0)];

/// Signed edge function of `p` against the directed edge `a -> b`.
///
/// Equivalent to `-(p.x - a.x) * dy + (p.y - a.y) * dx` with `d = b - a`.
#[inline]
pub(crate) fn edge_function(a: Point, b: Point, p: Point) -> f32 {
    (b - a).cross(p - a)
}

/// Center of sample cell `(sx, sy)`.
#[inline]
pub(crate) fn cell_center(sx: usize, sy: usize) -> Point {
    Point::new(sx as f32 + 0.5, sy as f32 + 0.5)
}

/// Inclusive range of sample cells to visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SampleBounds {
    pub(crate) x_min: usize,
    pub(crate) x_max: usize,
    pub(crate) y_min: usize,
    pub(crate) y_max: usize,
}

impl SampleBounds {
    /// Every cell in the box, row by row.
    pub(crate) fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        (self.y_min..=self.y_max)
            .flat_map(move |sy| (self.x_min..=self.x_max).map(move |sx| (sx, sy)))
    }
}

/// A triangle prepared for rasterization in sample-grid units.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TriangleSetup {
    vertices: [Point; 3],
    edges: [(usize, usize); 3],
    double_area: f32,
}

impl TriangleSetup {
    /// Scale `triangle` by `scale` and pick the edge order from its winding.
    pub(crate) fn new(triangle: &Triangle, scale: f32) -> Self {
        let vertices = triangle.vertices.map(|v| v * scale);
        let [v0, v1, v2] = vertices;
        let edges = if edge_function(v0, v1, v2) < 0.0 {
            CW_EDGES
        } else {
            CCW_EDGES
        };

        Self {
            vertices,
            edges,
            double_area: edge_function(v0, v1, v2).abs(),
        }
    }

    /// Integer-expanded bounding box clamped to a `grid_width` x
    /// `grid_height` grid, or `None` if nothing overlaps it.
    pub(crate) fn sample_bounds(&self, grid_width: usize, grid_height: usize) -> Option<SampleBounds> {
        if grid_width == 0 || grid_height == 0 {
            return None;
        }
        let [v0, v1, v2] = self.vertices;
        let lo_x = v0.x.min(v1.x).min(v2.x).floor();
        let lo_y = v0.y.min(v1.y).min(v2.y).floor();
        let hi_x = v0.x.max(v1.x).max(v2.x).ceil();
        let hi_y = v0.y.max(v1.y).max(v2.y).ceil();

        // Also rejects NaN bounds.
        if !(lo_x <= hi_x && lo_y <= hi_y) {
            return None;
        }

        let min_x = lo_x.max(0.0);
        let min_y = lo_y.max(0.0);
        let max_x = hi_x.min((grid_width - 1) as f32);
        let max_y = hi_y.min((grid_height - 1) as f32);
        if min_x > max_x || min_y > max_y {
            return None;
        }

        Some(SampleBounds {
            x_min: min_x as usize,
            x_max: max_x as usize,
            y_min: min_y as usize,
            y_max: max_y as usize,
        })
    }

    /// Inside test: `p` is on the non-negative side of all three edges.
    pub(crate) fn covers(&self, p: Point) -> bool {
        self.edges
            .iter()
            .all(|&(a, b)| edge_function(self.vertices[a], self.vertices[b], p) >= 0.0)
    }

    /// Barycentric weights of `p` from unsigned sub-triangle areas.
    ///
    /// Only meaningful for points inside the triangle. Returns `None` when
    /// the weights are not finite (zero-area triangle).
    pub(crate) fn barycentric(&self, p: Point) -> Option<[f32; 3]> {
        let [v0, v1, v2] = self.vertices;
        let w0 = edge_function(v1, v2, p).abs() / self.double_area;
        let w1 = edge_function(v2, v0, p).abs() / self.double_area;
        let w2 = 1.0 - w0 - w1;

        (w0.is_finite() && w1.is_finite() && w2.is_finite()).then_some([w0, w1, w2])
    }

    /// Interpolate a per-vertex attribute at `p`.
    ///
    /// Returns `None` for degenerate weights or a NaN result.
    pub(crate) fn interpolate(&self, p: Point, attrs: [Point; 3]) -> Option<Point> {
        let [w0, w1, w2] = self.barycentric(p)?;
        let value = attrs[0] * w0 + attrs[1] * w1 + attrs[2] * w2;
        (!value.is_nan()).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn right_triangle() -> Triangle {
        Triangle::new(
            Point::new(0.0, 0.0),
            Point::new(8.0, 0.0),
            Point::new(0.0, 8.0),
        )
    }

    #[test]
    fn test_edge_function_sign() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        // y-down screen space: below the edge is the positive side.
        assert!(edge_function(a, b, Point::new(0.5, 1.0)) > 0.0);
        assert!(edge_function(a, b, Point::new(0.5, -1.0)) < 0.0);
        assert_eq!(edge_function(a, b, Point::new(3.0, 0.0)), 0.0);
    }

    #[test]
    fn test_covers_both_windings() {
        let tri = right_triangle();
        for t in [tri, tri.reversed()] {
            let setup = TriangleSetup::new(&t, 1.0);
            assert!(setup.covers(Point::new(1.0, 1.0)));
            assert!(!setup.covers(Point::new(7.0, 7.0)));
            assert!(!setup.covers(Point::new(-0.5, 1.0)));
        }
    }

    #[test]
    fn test_scale_applies_to_vertices() {
        let setup = TriangleSetup::new(&right_triangle(), 2.0);
        assert!(setup.covers(Point::new(9.0, 1.0)));
        let bounds = setup.sample_bounds(100, 100).unwrap();
        assert_eq!((bounds.x_max, bounds.y_max), (16, 16));
    }

    #[test]
    fn test_sample_bounds_clamped_to_grid() {
        let tri = Triangle::new(
            Point::new(-5.0, -5.0),
            Point::new(50.0, 2.0),
            Point::new(3.0, 40.0),
        );
        let bounds = TriangleSetup::new(&tri, 1.0).sample_bounds(10, 8).unwrap();
        assert_eq!(
            bounds,
            SampleBounds {
                x_min: 0,
                x_max: 9,
                y_min: 0,
                y_max: 7
            }
        );
        assert_eq!(bounds.cells().count(), 80);
    }

    #[test]
    fn test_sample_bounds_off_grid() {
        let tri = Triangle::new(
            Point::new(-10.0, -10.0),
            Point::new(-5.0, -10.0),
            Point::new(-5.0, -2.0),
        );
        assert!(TriangleSetup::new(&tri, 1.0).sample_bounds(10, 10).is_none());

        let nan = Point::new(f32::NAN, f32::NAN);
        let nan = Triangle::new(nan, nan, nan);
        assert!(TriangleSetup::new(&nan, 1.0).sample_bounds(10, 10).is_none());
    }

    #[test]
    fn test_barycentric_at_vertices() {
        let tri = Triangle::new(
            Point::new(1.0, 1.0),
            Point::new(9.0, 2.0),
            Point::new(4.0, 7.0),
        );
        let setup = TriangleSetup::new(&tri, 1.0);
        assert_eq!(setup.barycentric(tri.vertices[0]), Some([1.0, 0.0, 0.0]));
        assert_eq!(setup.barycentric(tri.vertices[1]), Some([0.0, 1.0, 0.0]));
        assert_eq!(setup.barycentric(tri.vertices[2]), Some([0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_barycentric_centroid() {
        let tri = right_triangle();
        let setup = TriangleSetup::new(&tri, 1.0);
        let w = setup.barycentric(Point::new(8.0 / 3.0, 8.0 / 3.0)).unwrap();
        for weight in w {
            assert_relative_eq!(weight, 1.0 / 3.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_degenerate_triangle_has_no_weights() {
        let line = Triangle::new(
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(4.0, 4.0),
        );
        let setup = TriangleSetup::new(&line, 1.0);
        assert!(setup.barycentric(Point::new(1.0, 1.0)).is_none());
        assert!(setup
            .interpolate(Point::new(1.0, 1.0), [Point::ORIGIN; 3])
            .is_none());
    }

    #[test]
    fn test_interpolate_nan_attribute() {
        let setup = TriangleSetup::new(&right_triangle(), 1.0);
        let attrs = [Point::new(f32::NAN, 0.0), Point::ORIGIN, Point::ORIGIN];
        assert!(setup.interpolate(Point::new(1.0, 1.0), attrs).is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_weights_sum_to_one(
            ax in 0.0f32..64.0, ay in 0.0f32..64.0,
            bx in 0.0f32..64.0, by in 0.0f32..64.0,
            cx in 0.0f32..64.0, cy in 0.0f32..64.0,
            s in 0.0f32..1.0, t in 0.0f32..1.0,
        ) {
            let tri = Triangle::new(Point::new(ax, ay), Point::new(bx, by), Point::new(cx, cy));
            prop_assume!(tri.area() > 1.0);
            let setup = TriangleSetup::new(&tri, 1.0);

            // Uniform point inside the triangle.
            let (s, t) = if s + t > 1.0 { (1.0 - s, 1.0 - t) } else { (s, t) };
            let [a, b, c] = tri.vertices;
            let p = a + (b - a) * s + (c - a) * t;

            if let Some(w) = setup.barycentric(p) {
                prop_assert!((w[0] + w[1] + w[2] - 1.0).abs() < 1e-4);
                // The derived third weight agrees with its own sub-area.
                let direct = edge_function(a, b, p).abs() / tri.signed_double_area().abs();
                prop_assert!((w[2] - direct).abs() < 1e-3);
            }
        }

        #[test]
        fn prop_coverage_is_winding_invariant(
            ax in -8.0f32..40.0, ay in -8.0f32..40.0,
            bx in -8.0f32..40.0, by in -8.0f32..40.0,
            cx in -8.0f32..40.0, cy in -8.0f32..40.0,
        ) {
            let tri = Triangle::new(Point::new(ax, ay), Point::new(bx, by), Point::new(cx, cy));
            prop_assume!(tri.area() > 1e-3);
            let forward = TriangleSetup::new(&tri, 1.0);
            let backward = TriangleSetup::new(&tri.reversed(), 1.0);

            for sy in 0..32 {
                for sx in 0..32 {
                    let p = cell_center(sx, sy);
                    prop_assert_eq!(forward.covers(p), backward.covers(p));
                }
            }
        }
    }
}
