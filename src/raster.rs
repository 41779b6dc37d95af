//! Integer triangle scan conversion
//!
//! A triangle is split at its middle vertex into at most two "flat"
//! triangles, each with one horizontal edge. A flat triangle is walked from
//! its apex to the flat edge by two Bresenham-style edge walkers sharing a
//! row counter, emitting one span per row:
//!
//! ```text
//!            apex                 flat bottom: apex above, rows go down
//!            /  \
//!      left /    \ right
//!          /      \
//!    (x2l,y2)----(x2r,y2)
//! ```
//!
//! No floating point anywhere; the split point uses a 40-bit fixed-point
//! fraction (see [`split_point`]).

use crate::error::RasterError;
use crate::geometry::{split_point, Point, Triangle};
use crate::span::{Span, SpanBuffer};

// ============================================================================
// Edge Walker
// ============================================================================

/// Steps one triangle edge a row at a time, moving x by single pixels.
///
/// The error term starts at `-dy - dx` (signed dx), gains `2·|dx|` per row
/// and loses `2·dy` per x step; x steps while it is non-negative. Steep edges
/// (`|dx| < dy`) end exactly on `x_end`. Shallow edges drift by up to
/// `|dx| / 2dy` pixels, short of `x_end` when heading right and past it when
/// heading left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeWalker {
    x: i32,
    step: i32,
    error: i64,
    /// 2·|dx|, added per row
    run: i64,
    /// 2·dy, removed per x step
    rise: i64,
}

impl EdgeWalker {
    pub fn new(x_start: i32, x_end: i32, dy: u32) -> Self {
        let dx = i64::from(x_end) - i64::from(x_start);
        Self {
            x: x_start,
            step: if x_end < x_start { -1 } else { 1 },
            error: -i64::from(dy) - dx,
            run: 2 * dx.abs(),
            rise: 2 * i64::from(dy),
        }
    }

    /// Advance x as far as the current row allows and return it
    #[inline]
    pub fn settle(&mut self) -> i32 {
        while self.error >= 0 && self.rise > 0 {
            self.x += self.step;
            self.error -= self.rise;
        }
        self.x
    }

    #[inline]
    pub fn next_row(&mut self) {
        self.error += self.run;
    }
}

// ============================================================================
// Flat-Triangle Rasterizer
// ============================================================================

/// Rasterize the triangle `apex -> (x2l, y2), (x2r, y2)` into `buffer`.
///
/// Emits one span per row from the apex row to `y2` inclusive, in sweep
/// order (descending when `y2 < apex.y`). `x1` follows the edge to `x2l`, `x2`
/// the edge to `x2r`; neither side is assumed to be left in screen space.
/// A zero-height triangle emits the single span `(apex.x, apex.x, apex.y)`.
///
/// Returns how many spans did not fit in the buffer. Walking stops at the
/// first rejected row; the rows after it are counted as dropped unwalked.
pub fn rasterize_flat(buffer: &mut SpanBuffer, apex: Point, x2l: i32, x2r: i32, y2: i32) -> usize {
    if apex.y == y2 {
        return usize::from(buffer.push(Span::new(apex.x, apex.x, apex.y)).is_err());
    }

    let dy = apex.y.abs_diff(y2);
    let y_step: i64 = if y2 < apex.y { -1 } else { 1 };
    let mut left = EdgeWalker::new(apex.x, x2l, dy);
    let mut right = EdgeWalker::new(apex.x, x2r, dy);

    for row in 0..=dy {
        let y = (i64::from(apex.y) + y_step * i64::from(row)) as i32;
        let span = Span::new(left.settle(), right.settle(), y);
        if buffer.push(span).is_err() {
            let rest = (dy - row) as usize;
            buffer.count_rejected(rest);
            return rest + 1;
        }
        left.next_row();
        right.next_row();
    }

    0
}

/// A triangle with a horizontal edge at `y2`, ready for [`rasterize_flat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatTriangle {
    pub apex: Point,
    pub x2l: i32,
    pub x2r: i32,
    pub y2: i32,
}

impl FlatTriangle {
    /// Rows this triangle emits, apex and flat edge included
    pub fn rows(&self) -> usize {
        self.apex.y.abs_diff(self.y2) as usize + 1
    }

    pub fn rasterize_into(&self, buffer: &mut SpanBuffer) -> usize {
        rasterize_flat(buffer, self.apex, self.x2l, self.x2r, self.y2)
    }
}

// ============================================================================
// Triangle Splitter
// ============================================================================

/// How a triangle decomposes into flat triangles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// Top vertex is the apex, the other two share the lower y.
    /// Zero-height triangles land here too.
    FlatBottom(FlatTriangle),
    /// Bottom vertex is the apex, the other two share the upper y
    FlatTop(FlatTriangle),
    /// Split at the middle vertex's row. `halves[0]` is the flat-bottom half
    /// (apex `a`), `halves[1]` the flat-top half (apex `c`). Both end on the
    /// row of `mid`, so that row is emitted twice.
    General { mid: Point, halves: [FlatTriangle; 2] },
}

impl Split {
    /// Flat triangles in rasterization order
    pub fn parts(&self) -> &[FlatTriangle] {
        match self {
            Self::FlatBottom(flat) | Self::FlatTop(flat) => std::slice::from_ref(flat),
            Self::General { halves, .. } => halves,
        }
    }

    pub fn rows(&self) -> usize {
        self.parts().iter().map(FlatTriangle::rows).sum()
    }
}

/// Sort the vertices by y and pick the decomposition
pub fn classify(triangle: &Triangle) -> Split {
    let [a, b, c] = triangle.sorted_by_y();

    let split = if b.y == c.y {
        Split::FlatBottom(FlatTriangle {
            apex: a,
            x2l: b.x,
            x2r: c.x,
            y2: c.y,
        })
    } else if a.y == b.y {
        Split::FlatTop(FlatTriangle {
            apex: c,
            x2l: a.x,
            x2r: b.x,
            y2: b.y,
        })
    } else {
        let mid = split_point(a, b, c);
        Split::General {
            mid,
            halves: [
                FlatTriangle {
                    apex: a,
                    x2l: b.x,
                    x2r: mid.x,
                    y2: b.y,
                },
                FlatTriangle {
                    apex: c,
                    x2l: b.x,
                    x2r: mid.x,
                    y2: b.y,
                },
            ],
        }
    };

    log::trace!("{:?} -> {:?}", triangle.points, split);
    split
}

// ============================================================================
// Entry Points
// ============================================================================

/// Rasterize three points given in any order.
///
/// The buffer is sized to exactly the rows produced: `extent + 1`, plus one
/// for the duplicated middle row of a general triangle.
pub fn rasterize_triangle(points: [Point; 3]) -> Result<SpanBuffer, RasterError> {
    let capacity = Triangle { points }.required_rows();
    rasterize_triangle_with_capacity(points, capacity)
}

/// Same as [`rasterize_triangle`] for six raw coordinates
pub fn rasterize_triangle_xy(
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    x3: i32,
    y3: i32,
) -> Result<SpanBuffer, RasterError> {
    rasterize_triangle(Triangle::from_coords(x1, y1, x2, y2, x3, y3).points)
}

/// Rasterize into a buffer of caller-chosen size.
///
/// Rows past `capacity` are dropped, logged once as a warning and counted in
/// [`SpanBuffer::dropped`]. Allocation failure returns before any walking.
pub fn rasterize_triangle_with_capacity(
    points: [Point; 3],
    capacity: usize,
) -> Result<SpanBuffer, RasterError> {
    let triangle = Triangle { points };
    let mut buffer = SpanBuffer::allocate(capacity)?;

    let split = classify(&triangle);
    let dropped: usize = split
        .parts()
        .iter()
        .map(|part| part.rasterize_into(&mut buffer))
        .sum();

    if dropped > 0 {
        log::warn!(
            "span buffer of {} rows too small for {:?}: dropped {} of {} spans",
            capacity,
            points,
            dropped,
            split.rows()
        );
    }

    Ok(buffer)
}
