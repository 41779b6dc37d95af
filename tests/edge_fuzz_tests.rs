// Seeded random triangles checked against an exact cross-section model

use trispan::util::Rng;
use trispan::{classify, merge_rows, rasterize_triangle, Point, Split, Triangle};

/// Exact [min, max] x covered by the triangle at row y, or None if outside
fn cross_section(tri: &Triangle, y: i32) -> Option<(f64, f64)> {
    let [p0, p1, p2] = tri.points;
    let mut xs = Vec::with_capacity(4);
    for (p, q) in [(p0, p1), (p1, p2), (p2, p0)] {
        if p.y == q.y {
            if p.y == y {
                xs.push(f64::from(p.x));
                xs.push(f64::from(q.x));
            }
            continue;
        }
        let (lo, hi) = if p.y < q.y { (p, q) } else { (q, p) };
        if y < lo.y || y > hi.y {
            continue;
        }
        let t = f64::from(y - lo.y) / f64::from(hi.y - lo.y);
        xs.push(f64::from(lo.x) + t * f64::from(hi.x - lo.x));
    }
    let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min <= max).then_some((min, max))
}

fn is_zero_height(tri: &Triangle) -> bool {
    tri.vertical_extent() == 0
}

/// How far a span end may sit from the exact edge.
///
/// A walker drifts by up to `0.5 + |dx| / 2dy` on its edge; a general split
/// adds up to half a pixel from rounding the split point.
fn edge_tolerance(tri: &Triangle) -> f64 {
    let split = classify(tri);
    let rounding = if matches!(split, Split::General { .. }) { 0.5 } else { 0.0 };
    let drift = split
        .parts()
        .iter()
        .flat_map(|part| {
            let dy = f64::from(part.apex.y.abs_diff(part.y2));
            [part.x2l, part.x2r]
                .map(|x| 0.5 + f64::from(x.abs_diff(part.apex.x)) / (2.0 * dy))
        })
        .fold(0.0, f64::max);
    drift + rounding + 1e-9
}

/// Every walked edge moves less than one pixel per row
fn has_only_steep_edges(tri: &Triangle) -> bool {
    classify(tri).parts().iter().all(|part| {
        let dy = part.apex.y.abs_diff(part.y2);
        [part.x2l, part.x2r]
            .iter()
            .all(|x| x.abs_diff(part.apex.x) < dy)
    })
}

#[test]
fn test_spans_follow_true_edges() {
    let mut rng = Rng::new(0x5eed);
    for _ in 0..2000 {
        let tri = rng.triangle_in(96, 64);
        if is_zero_height(&tri) {
            continue;
        }

        let buf = rasterize_triangle(tri.points).unwrap();
        assert_eq!(buf.dropped(), 0, "{:?}", tri);

        let [a, _, c] = tri.sorted_by_y();
        let merged = merge_rows(buf.spans());
        assert!(merged.iter().map(|s| s.y).eq(a.y..=c.y), "{:?}", tri);

        let tolerance = edge_tolerance(&tri);
        for span in &merged {
            let (min, max) = cross_section(&tri, span.y).unwrap();
            assert!(
                (f64::from(span.x1) - min).abs() <= tolerance
                    && (f64::from(span.x2) - max).abs() <= tolerance,
                "{:?} row {}: span {}..{} vs exact {:.2}..{:.2} (tolerance {:.2})",
                tri,
                span.y,
                span.x1,
                span.x2,
                min,
                max,
                tolerance
            );
        }
    }
}

#[test]
fn test_vertices_are_covered_on_steep_edges() {
    let mut rng = Rng::new(77);
    let mut checked = 0;
    for _ in 0..4000 {
        let tri = rng.triangle_in(128, 128);
        if is_zero_height(&tri) || !has_only_steep_edges(&tri) {
            continue;
        }
        checked += 1;
        let merged = merge_rows(rasterize_triangle(tri.points).unwrap().spans());
        for Point { x, y } in tri.points {
            let span = merged.iter().find(|s| s.y == y).unwrap();
            assert!(
                span.x1 <= x && x <= span.x2,
                "{:?}: vertex ({}, {}) outside {:?}",
                tri,
                x,
                y,
                span
            );
        }
    }
    assert!(checked > 100, "only {} steep triangles generated", checked);
}

#[test]
fn test_apex_row_is_a_single_pixel_on_steep_edges() {
    let mut rng = Rng::new(3);
    for _ in 0..2000 {
        let tri = rng.triangle_in(64, 64);
        let [a, b, _] = tri.sorted_by_y();
        if a.y == b.y || !has_only_steep_edges(&tri) {
            continue;
        }
        let buf = rasterize_triangle(tri.points).unwrap();
        let first = buf.spans()[0];
        assert_eq!((first.x1, first.x2, first.y), (a.x, a.x, a.y), "{:?}", tri);
    }
}

#[test]
fn test_shallow_apex_row_widens() {
    // apex (40, 20) toward x = 5 and x = 60 over ten rows
    let buf = rasterize_triangle(Triangle::from_coords(40, 20, 5, 30, 60, 30).points).unwrap();
    assert_eq!(buf.spans()[0], trispan::Span::new(38, 40, 20));
    assert_eq!(buf.spans()[10], trispan::Span::new(3, 59, 30));
}

#[test]
fn test_large_coordinates_do_not_overflow() {
    let tri = Triangle::from_coords(-30_000, -20_000, 30_000, 0, 5, 20_000);
    let buf = rasterize_triangle(tri.points).unwrap();
    assert_eq!(buf.len(), tri.required_rows());
    let merged = merge_rows(buf.spans());
    assert_eq!(merged.first().map(|s| s.y), Some(-20_000));
    assert_eq!(merged.last().map(|s| s.y), Some(20_000));
}
