// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor triangulation for spaces that arrive without one.
//!
//! Counter-clockwise convex boundaries are fanned from their first vertex;
//! everything else is ear-clipped with earcutr.

use crate::polyline::Polyline;
use crate::position::Position;
use crate::predicates::{is_convex, open_ring};
use crate::triangle::Triangle;
use crate::{Error, Result};

/// Index triples fanning out of vertex 0.
fn fan(n: usize) -> impl Iterator<Item = [usize; 3]> {
    (1..n - 1).map(|i| [0, i, i + 1])
}

/// Index triples from earcutr over the planar coordinates of `ring`.
fn ear_clip(ring: &[Position]) -> Result<Vec<[usize; 3]>> {
    let flat: Vec<f64> = ring.iter().flat_map(|p| [p.x, p.y]).collect();
    let indices = earcutr::earcut(&flat, &[], 2)
        .map_err(|e| Error::TriangulationError(format!("{e:?}")))?;
    if indices.is_empty() {
        return Err(Error::TriangulationError(format!(
            "no ears found in a {}-vertex boundary",
            ring.len()
        )));
    }
    Ok(indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect())
}

/// Triangulate a space boundary into floor facets at height `z`.
///
/// A repeated closing point is dropped first, so neighbouring facets share
/// the boundary's own vertices.
pub fn triangulate_boundary(boundary: &Polyline, z: f64) -> Result<Vec<Triangle>> {
    let ring = open_ring(boundary.points());
    if ring.len() < 3 {
        return Err(Error::DegenerateBoundary(ring.len()));
    }

    let triples: Vec<[usize; 3]> = if is_convex(ring) {
        fan(ring.len()).collect()
    } else {
        ear_clip(ring)?
    };

    let at = |i: usize| Position::new(ring[i].x, ring[i].y, z);
    Ok(triples
        .into_iter()
        .map(|[a, b, c]| Triangle::new(at(a), at(b), at(c)))
        .collect())
}
