//! Planar polygon geometry.
//!
//! Polygons are given as vertex rings and may be closed (first == last) or
//! open; a repeated closing vertex is ignored.

use crate::models::Point;

/// Areas below this magnitude are treated as degenerate.
pub const AREA_EPSILON: f64 = 1e-10;

const BOUNDARY_EPSILON: f64 = 1e-9;

/// Vertices of the ring without the repeated closing vertex.
fn open_ring(ring: &[Point]) -> &[Point] {
    match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Signed shoelace area; positive for counter-clockwise rings.
pub fn signed_area(ring: &[Point]) -> f64 {
    let v = open_ring(ring);
    let n = v.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let (a, b) = (v[i], v[(i + 1) % n]);
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// Area-weighted centroid.
///
/// Falls back to the vertex mean for rings with fewer than three vertices
/// or an area below [`AREA_EPSILON`]. Returns `None` for an empty ring.
///
/// # Examples
///
/// ```
/// use u_evac::models::Point;
/// use u_evac::partition::polygon::centroid;
///
/// let square = [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]
///     .map(Point::from);
/// let c = centroid(&square).unwrap();
/// assert!((c.x - 1.0).abs() < 1e-10 && (c.y - 1.0).abs() < 1e-10);
/// ```
pub fn centroid(ring: &[Point]) -> Option<Point> {
    let v = open_ring(ring);
    if v.is_empty() {
        return None;
    }
    let area = signed_area(v);
    if v.len() < 3 || area.abs() < AREA_EPSILON {
        return Some(vertex_mean(v));
    }

    let n = v.len();
    let (mut cx, mut cy) = (0.0, 0.0);
    for i in 0..n {
        let (a, b) = (v[i], v[(i + 1) % n]);
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    Some(Point::new(cx / (6.0 * area), cy / (6.0 * area)))
}

fn vertex_mean(v: &[Point]) -> Point {
    let n = v.len() as f64;
    let (sx, sy) = v.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Returns `true` if `p` lies on a ring edge or vertex.
pub fn on_boundary(ring: &[Point], p: Point) -> bool {
    let v = open_ring(ring);
    let n = v.len();
    (0..n).any(|i| on_segment(v[i], v[(i + 1) % n], p))
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    let scale = a.distance_to(&b).max(1.0);
    if cross.abs() > BOUNDARY_EPSILON * scale {
        return false;
    }
    p.x >= a.x.min(b.x) - BOUNDARY_EPSILON
        && p.x <= a.x.max(b.x) + BOUNDARY_EPSILON
        && p.y >= a.y.min(b.y) - BOUNDARY_EPSILON
        && p.y <= a.y.max(b.y) + BOUNDARY_EPSILON
}

/// Strict interior test by ray casting.
///
/// Points on the boundary belong to no polygon.
pub fn contains_point(ring: &[Point], p: Point) -> bool {
    let v = open_ring(ring);
    let n = v.len();
    if n < 3 || on_boundary(v, p) {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (v[i], v[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
