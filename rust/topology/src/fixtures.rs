// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Small hand-made maps shared by the unit tests.

use wayfinder_geometry::Polyline;

use crate::arena::CampusMap;
use crate::construction::MapBuilder;
use crate::portal::{PortalKind, PortalRecord};
use crate::space::{SpaceRecord, SpaceType};

/// 4x4 office with its lower-left corner at `(x, y)`, counter-clockwise.
pub fn room(name: &str, x: f64, y: f64) -> SpaceRecord {
    typed_room(name, SpaceType::Other("OFF".into()), x, y)
}

pub fn typed_room(name: &str, space_type: SpaceType, x: f64, y: f64) -> SpaceRecord {
    SpaceRecord::new(
        name,
        space_type,
        Polyline::from_xy(
            &[(x, y), (x + 4.0, y), (x + 4.0, y + 4.0), (x, y + 4.0)],
            0.0,
        ),
    )
}

pub fn door(
    name: &str,
    kind: PortalKind,
    source: &str,
    destination: &str,
    a: (f64, f64),
    b: (f64, f64),
) -> PortalRecord {
    PortalRecord::new(name, kind, source, destination, Polyline::from_xy(&[a, b], 0.0))
}

/// Two buildings joined across the base map.
///
/// ```text
///  y=8 +-----+-----+
///      | X-2 |lawn |
///  y=4 +--d--+--o--+-----+
///      | X-1 o walk o Y-1 |
///  y=0 +-----+-----+-----+
///      0     4     8     12
/// ```
pub fn campus_records() -> (Vec<SpaceRecord>, Vec<PortalRecord>) {
    let spaces = vec![
        room("X-1", 0.0, 0.0),
        room("X-2", 0.0, 4.0),
        typed_room("BMAP-walk", SpaceType::Sidewalk, 4.0, 0.0),
        typed_room("BMAP-lawn", SpaceType::Grass, 4.0, 4.0),
        room("Y-1", 8.0, 0.0),
    ];
    let portals = vec![
        door("door-X-1-2", PortalKind::Door, "X-1", "X-2", (1.0, 4.0), (3.0, 4.0)),
        door("exit-X", PortalKind::Outdoor, "X-1", "BMAP-walk", (4.0, 1.0), (4.0, 3.0)),
        door("exit-Y", PortalKind::Outdoor, "Y-1", "BMAP-walk", (8.0, 1.0), (8.0, 3.0)),
        door("walk-lawn", PortalKind::Outdoor, "BMAP-walk", "BMAP-lawn", (5.0, 4.0), (7.0, 4.0)),
    ];
    (spaces, portals)
}

pub fn campus() -> CampusMap {
    let (spaces, portals) = campus_records();
    let mut builder = MapBuilder::new();
    builder.add_spaces(spaces);
    builder.add_portals(portals);
    builder.finish().0
}

fn rect(name: &str, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> SpaceRecord {
    SpaceRecord::new(
        name,
        SpaceType::Other("OFF".into()),
        Polyline::from_xy(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)], 0.0),
    )
}

/// Two ways from K-1 to K-3. The tall hall K-2 has the nearer centroids but
/// its doors sit at opposite ends; the corridor K-4 is further away but its
/// doors share one facet.
///
/// ```text
///  y=24 +-----------+
///       |    K-4    |
///  y=20 +-d-+---+-d-+
///       |   |   d   |
///       |K-1|K-2|K-3|
///       |   d   |   |
///  y=0  +---+---+---+
///       0   4   8   12
/// ```
pub fn detour() -> CampusMap {
    let mut builder = MapBuilder::new();
    builder.add_spaces([
        rect("K-1", (0.0, 0.0), (4.0, 20.0)),
        rect("K-2", (4.0, 0.0), (8.0, 20.0)),
        rect("K-3", (8.0, 0.0), (12.0, 20.0)),
        rect("K-4", (0.0, 20.0), (12.0, 24.0)),
    ]);
    builder.add_portals([
        door("k12", PortalKind::Door, "K-1", "K-2", (4.0, 0.5), (4.0, 1.5)),
        door("k23", PortalKind::Door, "K-2", "K-3", (8.0, 18.5), (8.0, 19.5)),
        door("k14", PortalKind::Door, "K-1", "K-4", (1.5, 20.0), (2.5, 20.0)),
        door("k43", PortalKind::Door, "K-4", "K-3", (9.5, 20.0), (10.5, 20.0)),
    ]);
    builder.finish().0
}
