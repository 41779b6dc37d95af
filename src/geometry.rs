//! Integer points and triangles
//!
//! Everything here works in whole pixels. The only place that needs more
//! than integer precision is the split point, which uses a fixed-point
//! fraction instead of floats.

use serde::{Deserialize, Serialize};

/// Fixed-point shift used when interpolating the split point. 40 fraction
/// bits keep the truncation error under 1/256 px for any i32 edge width.
pub const SPLIT_SHIFT: u32 = 40;
pub const SPLIT_SCALE: i128 = 1 << SPLIT_SHIFT;

/// A pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Three points in input order. Nothing is sorted until it is rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub points: [Point; 3],
}

impl Triangle {
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self { points: [a, b, c] }
    }

    pub fn from_coords(x1: i32, y1: i32, x2: i32, y2: i32, x3: i32, y3: i32) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2), Point::new(x3, y3))
    }

    /// Vertices ordered so that `a.y <= b.y <= c.y`.
    ///
    /// The sort is stable: vertices sharing a y keep their input order, so a
    /// zero-height triangle always has the first input point as `a`.
    pub fn sorted_by_y(&self) -> [Point; 3] {
        let mut sorted = self.points;
        sorted.sort_by_key(|p| p.y);
        sorted
    }

    /// Number of rows between the topmost and bottommost vertex, exclusive
    pub fn vertical_extent(&self) -> u32 {
        let [a, _, c] = self.sorted_by_y();
        c.y.abs_diff(a.y)
    }

    /// Span rows the rasterizer emits for this triangle.
    ///
    /// Flat and zero-height triangles cover `extent + 1` rows. The general
    /// case emits the middle vertex's row twice, once per half.
    pub fn required_rows(&self) -> usize {
        let [a, b, c] = self.sorted_by_y();
        let rows = self.vertical_extent() as usize + 1;
        if a.y == b.y || b.y == c.y {
            rows
        } else {
            rows + 1
        }
    }

    /// Bounding box as (min_x, min_y, max_x, max_y), inclusive
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        let [p0, p1, p2] = self.points;
        (
            p0.x.min(p1.x).min(p2.x),
            p0.y.min(p1.y).min(p2.y),
            p0.x.max(p1.x).max(p2.x),
            p0.y.max(p1.y).max(p2.y),
        )
    }

    /// Twice the signed area; zero when the vertices are colinear or coincide
    pub fn doubled_area(&self) -> i64 {
        let [p0, p1, p2] = self.points;
        let (ax, ay) = (i64::from(p1.x) - i64::from(p0.x), i64::from(p1.y) - i64::from(p0.y));
        let (bx, by) = (i64::from(p2.x) - i64::from(p0.x), i64::from(p2.y) - i64::from(p0.y));
        ax * by - ay * bx
    }

    pub fn is_degenerate(&self) -> bool {
        self.doubled_area() == 0
    }
}

/// Point on the long edge `a -> c` at the height of `b`.
///
/// Expects `a.y <= b.y <= c.y`. The edge fraction is taken in
/// 1/2^[`SPLIT_SHIFT`]ths in `i128`; the final rescale rounds to the nearest
/// pixel, so `x` is within one pixel of the exact intersection.
pub fn split_point(a: Point, b: Point, c: Point) -> Point {
    let height = i128::from(c.y) - i128::from(a.y);
    if height == 0 {
        return Point::new(a.x, b.y);
    }

    let t = ((i128::from(b.y) - i128::from(a.y)) << SPLIT_SHIFT) / height;
    let dx = i128::from(c.x) - i128::from(a.x);
    let x = i128::from(a.x) + ((t * dx + SPLIT_SCALE / 2) >> SPLIT_SHIFT);

    Point::new(x.clamp(i32::MIN.into(), i32::MAX.into()) as i32, b.y)
}
