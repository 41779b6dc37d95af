//! Integer-only triangle scan conversion
//!
//! Three points in, a list of `(x1, x2, y)` spans out, one per row. Span
//! endpoints are not ordered and a general triangle emits its middle row
//! twice; see [`span::merge_rows`] for consumers that need one span per row.

pub mod canvas;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod scene;
pub mod span;
pub mod util;

pub use canvas::Canvas;
pub use error::RasterError;
pub use geometry::{split_point, Point, Triangle, SPLIT_SCALE, SPLIT_SHIFT};
pub use raster::{
    classify, rasterize_flat, rasterize_triangle, rasterize_triangle_with_capacity,
    rasterize_triangle_xy, EdgeWalker, FlatTriangle, Split,
};
pub use scene::TriangleSet;
pub use span::{merge_rows, Span, SpanBuffer};
