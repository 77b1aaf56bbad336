// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spaces: polygonal rooms and outdoor regions.
//!
//! Space names follow `BUILDING-ROOM`; everything before the first
//! [`ROOM_SEPARATOR`] is the building name. Outdoor terrain lives in the
//! reserved [`BASE_MAP`] building and is typed by [`SpaceType`].

use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use wayfinder_geometry::{triangulate_boundary, BoundingBox, Polyline, Position, Triangle};

use crate::best_portals::BestPortalCache;
use crate::error::{Error, Result};
use crate::graph::NavGraph;
use crate::keys::PortalKey;

/// Separates the building name from the room name in a space name.
pub const ROOM_SEPARATOR: char = '-';

/// Building name of the outdoor base map.
pub const BASE_MAP: &str = "BMAP";

/// Returns the building part of a space name (the whole name when it has no
/// room separator).
pub fn building_name_of(space_name: &str) -> &str {
    space_name
        .split_once(ROOM_SEPARATOR)
        .map_or(space_name, |(building, _)| building)
}

/// Terrain or usage tag of a space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceType {
    Grass,
    Construction,
    Unknown,
    Sidewalk,
    Highway,
    /// Placeholder footprint of a building on the base map.
    Building,
    Slope,
    /// Any other tag (indoor room types such as offices or corridors).
    Other(String),
}

impl SpaceType {
    pub fn as_str(&self) -> &str {
        match self {
            SpaceType::Grass => "GRASS",
            SpaceType::Construction => "CNSTR",
            SpaceType::Unknown => "UKNWN",
            SpaceType::Sidewalk => "SDWLK",
            SpaceType::Highway => "HGWAY",
            SpaceType::Building => "BLDNG",
            SpaceType::Slope => "SLOPE",
            SpaceType::Other(tag) => tag,
        }
    }

    /// Terrain that rolling and paved routes may not enter.
    pub fn is_rough_terrain(&self) -> bool {
        matches!(
            self,
            SpaceType::Grass | SpaceType::Construction | SpaceType::Unknown
        )
    }

    /// Terrain that no walking route may enter.
    pub fn is_impassable_terrain(&self) -> bool {
        matches!(self, SpaceType::Construction | SpaceType::Unknown)
    }
}

impl FromStr for SpaceType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "GRASS" => SpaceType::Grass,
            "CNSTR" | "CONSTRUCTION" => SpaceType::Construction,
            "UKNWN" | "UNKNOWN" => SpaceType::Unknown,
            "SDWLK" | "SIDEWALK" => SpaceType::Sidewalk,
            "HGWAY" | "HIGHWAY" => SpaceType::Highway,
            "BLDNG" | "BUILDING" => SpaceType::Building,
            "SLOPE" => SpaceType::Slope,
            _ => SpaceType::Other(s.to_string()),
        })
    }
}

impl std::fmt::Display for SpaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An already-parsed space as handed over by the ingestion layer.
#[derive(Debug, Clone)]
pub struct SpaceRecord {
    pub name: String,
    pub space_type: SpaceType,
    pub boundary: Polyline,
    /// Flat `x0,y0,x1,y1,x2,y2` list, six values per triangle. `None` lets the
    /// map triangulate the boundary itself.
    pub triangles: Option<Vec<f64>>,
    pub height: f64,
}

impl SpaceRecord {
    pub fn new(name: impl Into<String>, space_type: SpaceType, boundary: Polyline) -> Self {
        Self {
            name: name.into(),
            space_type,
            boundary,
            triangles: None,
            height: 0.0,
        }
    }

    pub fn with_triangles(mut self, triangles: Vec<f64>) -> Self {
        self.triangles = Some(triangles);
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }
}

/// A polygonal room or outdoor region.
///
/// The navigation graph and best-portal cache are computed at most once and
/// are read-only afterwards.
#[derive(Debug)]
pub struct Space {
    pub(crate) name: String,
    pub(crate) building: String,
    pub(crate) space_type: SpaceType,
    pub(crate) boundary: Polyline,
    pub(crate) bounding_box: BoundingBox,
    pub(crate) convex: bool,
    pub(crate) height: f64,
    pub(crate) center: Position,
    pub(crate) triangles: Vec<f64>,
    pub(crate) portals: Vec<PortalKey>,
    pub(crate) graph: OnceLock<NavGraph>,
    pub(crate) best_portals: OnceLock<BestPortalCache>,
}

impl Space {
    /// Validates a record and derives the cached geometric properties.
    ///
    /// Fails with [`Error::MalformedGeometry`] for boundaries with fewer than
    /// three distinct points or an unusable triangulation.
    pub fn from_record(record: SpaceRecord) -> Result<Self> {
        let malformed = |source| Error::MalformedGeometry {
            space: record.name.clone(),
            source,
        };

        let ring_len = record.boundary.ring_len();
        if ring_len < 3 {
            return Err(malformed(wayfinder_geometry::Error::DegenerateBoundary(
                ring_len,
            )));
        }

        let bounds = record.boundary.bounding_box();
        let (bounding_box, center) = match (bounds, record.boundary.centroid()) {
            (Some(b), Some(c)) => (b, c),
            _ => return Err(malformed(wayfinder_geometry::Error::DegenerateBoundary(0))),
        };
        let floor_z = record.boundary.first().map_or(0.0, |p| p.z);

        let triangles = match &record.triangles {
            Some(flat) => {
                Triangle::from_flat(flat, floor_z).map_err(malformed)?;
                flat.clone()
            }
            None => {
                let tris = triangulate_boundary(&record.boundary, floor_z).map_err(malformed)?;
                flatten(&tris)
            }
        };

        Ok(Self {
            building: building_name_of(&record.name).to_string(),
            convex: record.boundary.is_convex(),
            name: record.name,
            space_type: record.space_type,
            boundary: record.boundary,
            bounding_box,
            height: record.height,
            center,
            triangles,
            portals: Vec::new(),
            graph: OnceLock::new(),
            best_portals: OnceLock::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn building_name(&self) -> &str {
        &self.building
    }

    pub fn space_type(&self) -> &SpaceType {
        &self.space_type
    }

    pub fn boundary(&self) -> &Polyline {
        &self.boundary
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn is_convex(&self) -> bool {
        self.convex
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Floor height: the z of the first boundary point.
    pub fn floor_z(&self) -> f64 {
        self.boundary.first().map_or(0.0, |p| p.z)
    }

    /// Centroid of the boundary points.
    pub fn center(&self) -> Position {
        self.center
    }

    /// Triangulation facets at floor height.
    pub fn triangles(&self) -> Result<Vec<Triangle>> {
        Triangle::from_flat(&self.triangles, self.floor_z()).map_err(|source| {
            Error::MalformedGeometry {
                space: self.name.clone(),
                source,
            }
        })
    }

    /// Portals incident to this space, in either direction.
    pub fn portals(&self) -> &[PortalKey] {
        &self.portals
    }

    /// Planar containment test against the boundary.
    pub fn contains(&self, position: &Position) -> bool {
        self.bounding_box.contains(position) && self.boundary.contains(position)
    }

    /// Returns `true` for regions of the outdoor base map.
    pub fn is_base_map(&self) -> bool {
        self.building == BASE_MAP
    }
}

fn flatten(triangles: &[Triangle]) -> Vec<f64> {
    triangles
        .iter()
        .flat_map(|t| t.vertices().iter().flat_map(|v| [v.x, v.y]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(name: &str) -> SpaceRecord {
        SpaceRecord::new(
            name,
            SpaceType::Other("OFF".into()),
            Polyline::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)], 0.0),
        )
    }

    #[test]
    fn building_name_is_prefix() {
        assert_eq!(building_name_of("NE43-218"), "NE43");
        assert_eq!(building_name_of("BMAP-grass-7"), "BMAP");
        assert_eq!(building_name_of("Lobby"), "Lobby");
    }

    #[test]
    fn type_tags_parse() {
        assert_eq!("GRASS".parse::<SpaceType>().unwrap(), SpaceType::Grass);
        assert_eq!("cnstr".parse::<SpaceType>().unwrap(), SpaceType::Construction);
        assert_eq!(
            "OFF".parse::<SpaceType>().unwrap(),
            SpaceType::Other("OFF".into())
        );
        assert!(SpaceType::Grass.is_rough_terrain());
        assert!(!SpaceType::Grass.is_impassable_terrain());
    }

    #[test]
    fn record_without_triangles_is_triangulated() {
        let space = Space::from_record(square("NE43-1")).unwrap();
        assert_eq!(space.building_name(), "NE43");
        assert_eq!(space.triangles().unwrap().len(), 2);
        assert!(space.is_convex());
        assert_relative_eq!(space.center().x, 2.0);
        assert!(space.contains(&Position::new(1.0, 3.0, 0.0)));
        assert!(!space.contains(&Position::new(5.0, 3.0, 0.0)));
    }

    #[test]
    fn degenerate_boundary_is_rejected() {
        let record = SpaceRecord::new(
            "NE43-2",
            SpaceType::Unknown,
            Polyline::from_xy(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)], 0.0),
        );
        assert!(matches!(
            Space::from_record(record),
            Err(Error::MalformedGeometry { .. })
        ));
    }

    #[test]
    fn ragged_triangle_list_is_rejected() {
        let record = square("NE43-3").with_triangles(vec![0.0, 0.0, 4.0, 0.0]);
        assert!(Space::from_record(record).is_err());
    }
}
