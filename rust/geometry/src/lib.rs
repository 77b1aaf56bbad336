// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wayfinder Geometry
//!
//! Planar geometry kernel for campus floor plans: fuzzy-equal positions,
//! boundaries, triangulation facets, the predicates routing is built on and
//! the path simplifier that keeps routes inside their rooms.

pub mod error;
pub mod polyline;
pub mod position;
pub mod predicates;
pub mod simplify;
pub mod triangle;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::Point3;

pub use error::{Error, Result};
pub use polyline::{BoundingBox, Polyline};
pub use position::{Position, POSITION_TOLERANCE};
pub use predicates::{centroid, distance, is_convex, is_inside_polygon, segments_intersect};
pub use simplify::simplify_path;
pub use triangle::Triangle;
pub use triangulation::triangulate_boundary;
