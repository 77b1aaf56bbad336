// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Immutable 3D positions with tolerance-based equality.
//!
//! Two abutting spaces are triangulated independently, so the vertices of
//! a shared wall rarely agree bit-for-bit. Equality therefore compares each
//! axis against [`POSITION_TOLERANCE`] instead of exact floating point values.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Per-axis tolerance used by [`Position`] equality.
pub const POSITION_TOLERANCE: f64 = 0.1;

/// A point in the map's planar projection, with `z` as floor height.
///
/// `PartialEq` is approximate (see module docs) and therefore not transitive;
/// there is deliberately no `Eq` or `Hash` implementation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    /// Creates a position from its coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean (L2) distance to another position, all three axes.
    #[inline]
    pub fn distance(&self, other: &Position) -> f64 {
        nalgebra::distance(&self.to_point(), &other.to_point())
    }

    /// Returns `true` if every axis differs by less than `tolerance`.
    #[inline]
    pub fn approx_eq(&self, other: &Position, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance
            && (self.y - other.y).abs() < tolerance
            && (self.z - other.z).abs() < tolerance
    }

    /// Bitwise-equal coordinates, unlike the fuzzy `==`.
    #[inline]
    pub fn exactly_eq(&self, other: &Position) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }

    /// Point `t` of the way from `self` towards `other` in the xy plane.
    ///
    /// The result keeps `self.z`, matching how path points are nudged along
    /// a floor.
    #[inline]
    pub fn lerp_planar(&self, other: &Position, t: f64) -> Position {
        Position::new(
            self.x + t * (other.x - self.x),
            self.y + t * (other.y - self.y),
            self.z,
        )
    }

    /// Midpoint of two positions (all three axes).
    #[inline]
    pub fn midpoint(&self, other: &Position) -> Position {
        Position::new(
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
            (self.z + other.z) / 2.0,
        )
    }

    #[inline]
    pub fn to_point(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, POSITION_TOLERANCE)
    }
}

impl From<Point3<f64>> for Position {
    fn from(p: Point3<f64>) -> Self {
        Position::new(p.x, p.y, p.z)
    }
}

impl From<[f64; 3]> for Position {
    fn from(c: [f64; 3]) -> Self {
        Position::new(c[0], c[1], c[2])
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn equality_is_fuzzy_per_axis() {
        let a = Position::new(1.0, 2.0, 0.0);
        assert_eq!(a, Position::new(1.05, 1.95, 0.09));
        assert_ne!(a, Position::new(1.2, 2.0, 0.0));
        assert_ne!(a, Position::new(1.0, 2.0, 0.5));

        assert!(!a.exactly_eq(&Position::new(1.05, 2.0, 0.0)));
        assert!(a.exactly_eq(&Position::new(1.0, 2.0, 0.0)));
    }

    #[test]
    fn distance_is_three_dimensional() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(2.0, 3.0, 6.0);
        assert_relative_eq!(a.distance(&b), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn planar_lerp_keeps_start_height() {
        let a = Position::new(0.0, 0.0, 3.0);
        let b = Position::new(10.0, 0.0, 9.0);
        let p = a.lerp_planar(&b, 0.1);
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.z, 3.0);
    }
}
