// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar predicates used by graph building, routing and path simplification.
//!
//! All predicates work in the xy plane; `z` only participates in
//! [`distance`] and [`centroid`].

use crate::position::Position;

/// Orientation values smaller than this are treated as collinear.
const COLLINEAR_EPSILON: f64 = 1e-12;

/// Euclidean (L2) distance between two positions.
#[inline]
pub fn distance(p: &Position, q: &Position) -> f64 {
    p.distance(q)
}

/// Mean of the coordinates of `points`, or `None` for an empty slice.
pub fn centroid(points: &[Position]) -> Option<Position> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy, sz) = points
        .iter()
        .fold((0.0, 0.0, 0.0), |(x, y, z), p| (x + p.x, y + p.y, z + p.z));
    Some(Position::new(sx / n, sy / n, sz / n))
}

/// Signed doubled area of the triangle `(a, b, c)`.
///
/// Positive for a counter-clockwise turn `a -> b -> c`, negative for a
/// clockwise turn, zero when collinear.
#[inline]
pub fn turn(a: &Position, b: &Position, c: &Position) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

#[inline]
fn orientation(a: &Position, b: &Position, c: &Position) -> i8 {
    let t = turn(a, b, c);
    if t > COLLINEAR_EPSILON {
        1
    } else if t < -COLLINEAR_EPSILON {
        -1
    } else {
        0
    }
}

/// Proper intersection test for segments `a1-a2` and `b1-b2`.
///
/// Segments sharing an endpoint (under fuzzy [`Position`] equality) never
/// intersect, parallel segments never intersect, and an endpoint merely
/// touching the other segment does not count.
pub fn segments_intersect(a1: &Position, a2: &Position, b1: &Position, b2: &Position) -> bool {
    if a1 == b1 || a1 == b2 || a2 == b1 || a2 == b2 {
        return false;
    }
    crosses_properly(a1, a2, b1, b2)
}

/// Strict crossing by orientation alone; exactly shared or touching
/// endpoints give a zero orientation and never count.
fn crosses_properly(a1: &Position, a2: &Position, b1: &Position, b2: &Position) -> bool {
    let da = (a2.x - a1.x, a2.y - a1.y);
    let db = (b2.x - b1.x, b2.y - b1.y);
    let denom = da.0 * db.1 - da.1 * db.0;
    if denom.abs() < COLLINEAR_EPSILON {
        return false;
    }

    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);

    o1 * o2 < 0 && o3 * o4 < 0
}

/// Ray-cast point-in-polygon test.
///
/// Casts a horizontal ray from `point` to a point beyond the boundary's
/// largest x coordinate and counts proper crossings; odd means inside.
/// Crossings are tested exactly, so points close to a vertex still count.
/// A ray passing exactly through a boundary vertex can miscount. That case
/// is a known approximation and is not corrected here.
pub fn is_inside_polygon(point: &Position, boundary: &[Position]) -> bool {
    let ring = open_ring(boundary);
    if ring.len() < 3 {
        return false;
    }

    let max_x = ring
        .iter()
        .map(|p| p.x)
        .fold(f64::NEG_INFINITY, f64::max);
    let outside = Position::new(max_x + 1.0, point.y, point.z);

    let n = ring.len();
    let crossings = (0..n)
        .filter(|&k| crosses_properly(point, &outside, &ring[k], &ring[(k + 1) % n]))
        .count();

    crossings % 2 == 1
}

/// Convexity test: every consecutive vertex triple must turn strictly
/// counter-clockwise.
///
/// Clockwise-wound or collinear-vertex boundaries report `false`.
pub fn is_convex(boundary: &[Position]) -> bool {
    let ring = open_ring(boundary);
    let n = ring.len();
    if n < 3 {
        return false;
    }
    (0..n).all(|i| turn(&ring[i], &ring[(i + 1) % n], &ring[(i + 2) % n]) > 0.0)
}

/// Squared planar distance from `point` to the segment `a-b`.
pub fn point_segment_distance_sq(point: &Position, a: &Position, b: &Position) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;

    // Projection parameter of `point` onto the segment, clamped to [0, 1]
    let t = if len_sq > 0.0 {
        (((point.x - a.x) * abx + (point.y - a.y) * aby) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let dx = a.x + t * abx - point.x;
    let dy = a.y + t * aby - point.y;
    dx * dx + dy * dy
}

/// Returns the boundary without a repeated closing point.
pub(crate) fn open_ring(boundary: &[Position]) -> &[Position] {
    match boundary {
        [first, .., last] if boundary.len() > 1 && first == last => {
            &boundary[..boundary.len() - 1]
        }
        _ => boundary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Position {
        Position::new(x, y, 0.0)
    }

    fn square() -> Vec<Position> {
        vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)]
    }

    #[test]
    fn centroid_of_square() {
        let c = centroid(&square()).unwrap();
        assert_relative_eq!(c.x, 2.0);
        assert_relative_eq!(c.y, 2.0);
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn crossing_segments_intersect() {
        assert!(segments_intersect(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0)));
    }

    #[test]
    fn shared_endpoint_never_intersects() {
        assert!(!segments_intersect(&p(0.0, 0.0), &p(2.0, 2.0), &p(2.0, 2.0), &p(4.0, 0.0)));
    }

    #[test]
    fn parallel_segments_never_intersect() {
        assert!(!segments_intersect(&p(0.0, 0.0), &p(2.0, 0.0), &p(0.0, 1.0), &p(2.0, 1.0)));
        assert!(!segments_intersect(&p(0.0, 0.0), &p(4.0, 0.0), &p(1.0, 0.0), &p(3.0, 0.0)));
    }

    #[test]
    fn touching_is_not_proper() {
        // b1 lies on segment a, b extends away from it
        assert!(!segments_intersect(&p(0.0, 0.0), &p(4.0, 0.0), &p(2.0, 0.0), &p(2.0, 3.0)));
    }

    #[test]
    fn point_in_square() {
        let sq = square();
        assert!(is_inside_polygon(&p(1.0, 1.5), &sq));
        assert!(!is_inside_polygon(&p(5.0, 1.5), &sq));
        assert!(!is_inside_polygon(&p(-1.0, 1.5), &sq));
    }

    #[test]
    fn points_near_a_vertex_are_inside() {
        let sq = square();
        assert!(is_inside_polygon(&p(3.95, 0.05), &sq));
        assert!(is_inside_polygon(&p(0.05, 0.05), &sq));
        assert!(is_inside_polygon(&p(3.95, 3.95), &sq));
        assert!(!is_inside_polygon(&p(4.05, 0.05), &sq));
    }

    #[test]
    fn point_in_l_shape() {
        let l = vec![
            p(0.0, 0.0),
            p(6.0, 0.0),
            p(6.0, 2.0),
            p(2.0, 2.0),
            p(2.0, 6.0),
            p(0.0, 6.0),
        ];
        assert!(is_inside_polygon(&p(1.0, 4.5), &l));
        assert!(is_inside_polygon(&p(4.5, 1.0), &l));
        assert!(!is_inside_polygon(&p(4.5, 4.5), &l));
    }

    #[test]
    fn convexity() {
        assert!(is_convex(&square()));
        let mut closed = square();
        closed.push(p(0.0, 0.0));
        assert!(is_convex(&closed));

        let mut clockwise = square();
        clockwise.reverse();
        assert!(!is_convex(&clockwise));

        let notch = vec![p(0.0, 0.0), p(4.0, 0.0), p(2.0, 1.0), p(4.0, 4.0), p(0.0, 4.0)];
        assert!(!is_convex(&notch));
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let d = point_segment_distance_sq(&p(5.0, 0.0), &p(0.0, 0.0), &p(3.0, 0.0));
        assert_relative_eq!(d, 4.0);
        let d = point_segment_distance_sq(&p(1.0, 2.0), &p(0.0, 0.0), &p(3.0, 0.0));
        assert_relative_eq!(d, 4.0);
    }
}
