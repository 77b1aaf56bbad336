// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangulation facets of a space floor.

use smallvec::SmallVec;

use crate::position::Position;
use crate::predicates::point_segment_distance_sq;
use crate::{Error, Result};

/// Number of values per triangle in a flat `x0,y0,x1,y1,x2,y2` list.
pub const FLAT_TRIANGLE_STRIDE: usize = 6;

/// One facet of a floor triangulation. All three vertices share one height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Position; 3],
}

impl Triangle {
    pub fn new(a: Position, b: Position, c: Position) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Parses a flat list of planar coordinates, six values per triangle,
    /// placing every vertex at height `z`.
    pub fn from_flat(coords: &[f64], z: f64) -> Result<Vec<Triangle>> {
        if coords.is_empty() || coords.len() % FLAT_TRIANGLE_STRIDE != 0 {
            return Err(Error::MalformedTriangulation(format!(
                "expected a non-empty multiple of {} values, got {}",
                FLAT_TRIANGLE_STRIDE,
                coords.len()
            )));
        }

        Ok(coords
            .chunks_exact(FLAT_TRIANGLE_STRIDE)
            .map(|c| {
                Triangle::new(
                    Position::new(c[0], c[1], z),
                    Position::new(c[2], c[3], z),
                    Position::new(c[4], c[5], z),
                )
            })
            .collect())
    }

    #[inline]
    pub fn vertices(&self) -> &[Position; 3] {
        &self.vertices
    }

    /// Twice the signed planar area; zero for a degenerate triangle.
    pub fn doubled_area(&self) -> f64 {
        let [a, b, c] = &self.vertices;
        crate::predicates::turn(a, b, c)
    }

    /// The edge shared with `other`, if the two triangles have exactly two
    /// vertices in common under fuzzy position equality.
    pub fn shared_edge(&self, other: &Triangle) -> Option<[Position; 2]> {
        let common: SmallVec<[Position; 3]> = self
            .vertices
            .iter()
            .filter(|v| other.vertices.iter().any(|w| *v == w))
            .copied()
            .collect();

        match common.as_slice() {
            [a, b] => Some([*a, *b]),
            _ => None,
        }
    }

    /// Squared planar distance from `point` to the nearest of the three edges.
    pub fn closest_edge_distance_sq(&self, point: &Position) -> f64 {
        (0..3)
            .map(|j| {
                point_segment_distance_sq(point, &self.vertices[j], &self.vertices[(j + 1) % 3])
            })
            .fold(f64::INFINITY, f64::min)
    }
}
