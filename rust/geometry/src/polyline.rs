// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered point sequences: space boundaries, portal contours and paths.

use serde::{Deserialize, Serialize};

use crate::position::Position;
use crate::predicates::{self, open_ring};

/// Axis-aligned planar bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Returns `true` if the point lies inside or on the box (xy only).
    pub fn contains(&self, p: &Position) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// An ordered sequence of positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<Position>,
}

impl Polyline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Position>) -> Self {
        Self { points }
    }

    /// Builds a polyline from `(x, y)` pairs at a constant height.
    pub fn from_xy(coords: &[(f64, f64)], z: f64) -> Self {
        Self {
            points: coords.iter().map(|&(x, y)| Position::new(x, y, z)).collect(),
        }
    }

    pub fn push(&mut self, p: Position) {
        self.points.push(p);
    }

    /// Appends every point of `other`.
    pub fn append(&mut self, other: &Polyline) {
        self.points.extend_from_slice(&other.points);
    }

    pub fn points(&self) -> &[Position] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Position> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Position> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Position> {
        self.points.last()
    }

    /// Sum of the L2 lengths of consecutive segments. Zero for fewer than
    /// two points.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }

    /// Mean of the distinct ring points (a repeated closing point is ignored).
    pub fn centroid(&self) -> Option<Position> {
        predicates::centroid(open_ring(&self.points))
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.points.first()?;
        let init = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(self.points.iter().fold(init, |b, p| BoundingBox {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    /// Number of distinct ring points (closing duplicate excluded).
    pub fn ring_len(&self) -> usize {
        open_ring(&self.points).len()
    }

    /// Edges of the closed ring, including the edge from the last point back
    /// to the first.
    pub fn ring_edges(&self) -> impl Iterator<Item = (&Position, &Position)> + '_ {
        let ring = open_ring(&self.points);
        let n = ring.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |i| (&ring[i], &ring[(i + 1) % n]))
    }

    /// Returns `true` if the open segment `a-b` properly crosses any ring edge.
    pub fn crosses(&self, a: &Position, b: &Position) -> bool {
        self.ring_edges()
            .any(|(p, q)| predicates::segments_intersect(a, b, p, q))
    }

    /// Point-in-polygon test treating this polyline as a closed ring.
    pub fn contains(&self, p: &Position) -> bool {
        predicates::is_inside_polygon(p, &self.points)
    }

    pub fn is_convex(&self) -> bool {
        predicates::is_convex(&self.points)
    }
}

impl From<Vec<Position>> for Polyline {
    fn from(points: Vec<Position>) -> Self {
        Self::from_points(points)
    }
}

impl FromIterator<Position> for Polyline {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn length_of_open_path() {
        let line = Polyline::from_xy(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)], 0.0);
        assert_relative_eq!(line.length(), 7.0);
        assert_relative_eq!(Polyline::new().length(), 0.0);
    }

    #[test]
    fn closed_ring_is_not_double_counted() {
        let open = Polyline::from_xy(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)], 0.0);
        let closed = Polyline::from_xy(
            &[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)],
            0.0,
        );
        assert_eq!(open.ring_edges().count(), 4);
        assert_eq!(closed.ring_edges().count(), 4);
        let c = closed.centroid().unwrap();
        assert_relative_eq!(c.x, 1.0);
        assert_relative_eq!(c.y, 1.0);
    }

    #[test]
    fn bounding_box_spans_points() {
        let line = Polyline::from_xy(&[(1.0, 5.0), (-2.0, 3.0), (4.0, -1.0)], 0.0);
        let bb = line.bounding_box().unwrap();
        assert_relative_eq!(bb.min_x, -2.0);
        assert_relative_eq!(bb.max_y, 5.0);
        assert!(bb.contains(&Position::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn crossing_detects_wall() {
        let room = Polyline::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)], 0.0);
        assert!(room.crosses(&Position::new(2.0, 2.0, 0.0), &Position::new(6.0, 2.0, 0.0)));
        assert!(!room.crosses(&Position::new(1.0, 1.0, 0.0), &Position::new(3.0, 3.0, 0.0)));
    }
}
