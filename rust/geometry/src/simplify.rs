// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Greedy shortening of node paths inside one space.
//!
//! A raw path through a navigation graph zig-zags between triangle edge
//! midpoints. The simplifier walks it with an anchor (the last accepted
//! point) and drops every intermediate point whose removal keeps the
//! anchor-to-candidate segment clear of the space boundary.

use crate::polyline::Polyline;
use crate::position::Position;

/// Fraction used to pull the first anchor and the last candidate off the
/// boundary. Path ends usually sit on a wall (portal centroids), where a
/// crossing test against that same wall is degenerate.
pub const BOUNDARY_NUDGE: f64 = 0.1;

/// Shortens `path` so that no emitted segment crosses `boundary`.
///
/// The first and last input points are always kept unchanged. Paths with
/// fewer than three points are returned as-is.
pub fn simplify_path(path: &[Position], boundary: &Polyline) -> Vec<Position> {
    let n = path.len();
    if n < 3 {
        return path.to_vec();
    }

    let mut out = Vec::with_capacity(n);
    out.push(path[0]);

    let mut prev = path[0];
    let mut anchor = path[0];

    for (i, &point) in path.iter().enumerate().skip(1) {
        let mut candidate = point;
        if i == 1 {
            anchor = prev.lerp_planar(&candidate, BOUNDARY_NUDGE);
        } else if i == n - 1 {
            candidate = prev.lerp_planar(&candidate, 1.0 - BOUNDARY_NUDGE);
        }

        if boundary.crosses(&anchor, &candidate) {
            // `prev` is the furthest point still visible from the anchor
            if out.last().map_or(true, |last| *last != prev) {
                out.push(prev);
            }
            anchor = prev;
        }
        prev = candidate;
    }

    out.push(path[n - 1]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Position {
        Position::new(x, y, 0.0)
    }

    fn l_room() -> Polyline {
        Polyline::from_xy(
            &[
                (0.0, 0.0),
                (6.0, 0.0),
                (6.0, 2.0),
                (2.0, 2.0),
                (2.0, 6.0),
                (0.0, 6.0),
            ],
            0.0,
        )
    }

    fn crosses_boundary(path: &[Position], boundary: &Polyline) -> bool {
        path.windows(2).any(|w| boundary.crosses(&w[0], &w[1]))
    }

    #[test]
    fn straight_corridor_collapses_to_endpoints() {
        let room = Polyline::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 2.0), (0.0, 2.0)], 0.0);
        let raw = vec![p(0.5, 1.0), p(2.0, 1.2), p(4.0, 0.8), p(6.0, 1.1), p(9.5, 1.0)];
        let out = simplify_path(&raw, &room);
        assert_eq!(out, vec![p(0.5, 1.0), p(9.5, 1.0)]);
    }

    #[test]
    fn corner_point_is_kept_in_l_shaped_room() {
        let room = l_room();
        let raw = vec![p(5.5, 1.0), p(4.0, 1.0), p(1.0, 1.0), p(1.0, 3.0), p(1.0, 5.5)];
        let out = simplify_path(&raw, &room);

        assert_eq!(out.first(), raw.first());
        assert_eq!(out.last(), raw.last());
        assert!(out.len() < raw.len());
        assert!(!crosses_boundary(&out, &room));
    }

    #[test]
    fn short_paths_pass_through() {
        let room = l_room();
        let raw = vec![p(1.0, 1.0), p(1.0, 5.0)];
        assert_eq!(simplify_path(&raw, &room), raw);
        assert!(simplify_path(&[], &room).is_empty());
    }
}
