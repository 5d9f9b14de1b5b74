//! Point and line primitives.
//!
//! Lines are walked with a DDA stepper: one unit along the dominant axis per
//! step, with the minor axis advanced by the matching fraction. Every step is
//! handed to `rasterize_point`, so lines get flat per-pixel fills rather than
//! coverage-based antialiasing.

use super::rasterizer::Rasterizer;
use crate::color::Color;
use crate::geometry::{Line, Point, Triangle};

/// Trait for primitives a scene walker can hand to the rasterizer.
pub trait Drawable {
    /// Rasterize this primitive with a flat color.
    fn draw(&self, rasterizer: &mut Rasterizer<'_>, color: Color);
}

impl Drawable for Point {
    fn draw(&self, rasterizer: &mut Rasterizer<'_>, color: Color) {
        rasterizer.rasterize_point(self.x, self.y, color);
    }
}

impl Drawable for Line {
    fn draw(&self, rasterizer: &mut Rasterizer<'_>, color: Color) {
        rasterizer.rasterize_line(self.start.x, self.start.y, self.end.x, self.end.y, color);
    }
}

impl Drawable for Triangle {
    fn draw(&self, rasterizer: &mut Rasterizer<'_>, color: Color) {
        let [v0, v1, v2] = self.vertices;
        rasterizer.rasterize_triangle(v0, v1, v2, color);
    }
}

/// Clip segment `a -> b` to the rectangle `[min, max]` (Liang-Barsky).
///
/// Runs in `f64` so endpoints near `f32::MAX` do not overflow the
/// direction vector. A clipped endpoint sits exactly on the boundary it was
/// clipped against, with the other coordinate taken from the slope. Returns
/// `None` if no part of the segment is inside.
pub(crate) fn clip_segment(a: Point, b: Point, min: Point, max: Point) -> Option<(Point, Point)> {
    let (ax, ay) = (f64::from(a.x), f64::from(a.y));
    let (dx, dy) = (f64::from(b.x) - ax, f64::from(b.y) - ay);
    let bounds = [
        f64::from(min.x),
        f64::from(max.x),
        f64::from(min.y),
        f64::from(max.y),
    ];
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    let (mut enter, mut exit) = (None, None);

    for (side, (p, q)) in [
        (-dx, ax - bounds[0]),
        (dx, bounds[1] - ax),
        (-dy, ay - bounds[2]),
        (dy, bounds[3] - ay),
    ]
    .into_iter()
    .enumerate()
    {
        if p == 0.0 {
            // Parallel to this boundary.
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            if r > t0 {
                t0 = r;
                enter = Some(side);
            }
        } else {
            if r < t0 {
                return None;
            }
            if r < t1 {
                t1 = r;
                exit = Some(side);
            }
        }
    }

    let on_side = |side: usize| {
        let edge = bounds[side];
        if side < 2 {
            Point::new(edge as f32, (ay + (edge - ax) * dy / dx) as f32)
        } else {
            Point::new((ax + (edge - ay) * dx / dy) as f32, edge as f32)
        }
    };
    Some((enter.map_or(a, on_side), exit.map_or(b, on_side)))
}

/// Positions visited when stepping along a line, left endpoint first.
#[derive(Debug, Clone)]
pub(crate) struct LineSteps {
    pos: Point,
    step: Point,
    start_y: f32,
    end_x: f32,
    y_span: f32,
    remaining: usize,
}

impl LineSteps {
    /// Stepper from `a` to `b`, or `None` if either endpoint is not finite.
    ///
    /// Long segments should be clipped first: once coordinates pass about
    /// 2^24 a unit step no longer changes them.
    pub(crate) fn new(a: Point, b: Point) -> Option<Self> {
        if !(a.is_finite() && b.is_finite()) {
            return None;
        }
        let (start, end) = if a.x > b.x { (b, a) } else { (a, b) };

        let m = (end.y - start.y) / (end.x - start.x);
        let step = if m.abs() > 1.0 {
            if start.x == end.x {
                // Vertical: m is infinite.
                Point::new(0.0, (end.y - start.y).signum())
            } else {
                Point::new(1.0 / m.abs(), m.signum())
            }
        } else {
            // Also covers a == b, where m is NaN and only one step runs.
            Point::new(1.0, m)
        };

        let y_span = (end.y - start.y).abs();
        let span = (end.x - start.x).max(y_span).ceil();
        let remaining = if span.is_finite() {
            (span as usize).saturating_add(1)
        } else {
            0
        };

        Some(Self {
            pos: start,
            step,
            start_y: start.y,
            end_x: end.x.floor(),
            y_span,
            remaining,
        })
    }

    /// Stepper over the part of `a -> b` inside `[min, max]`.
    pub(crate) fn clipped(a: Point, b: Point, min: Point, max: Point) -> Option<Self> {
        if !(a.is_finite() && b.is_finite()) {
            return None;
        }
        let (start, end) = clip_segment(a, b, min, max)?;
        Self::new(start, end)
    }
}

impl Iterator for LineSteps {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0
            || self.pos.x.floor() > self.end_x
            || !((self.pos.y - self.start_y).abs() <= self.y_span)
        {
            return None;
        }
        self.remaining -= 1;

        let current = self.pos;
        self.pos = self.pos + self.step;
        Some(current)
    }
}
