// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Map construction and portal linking.
//!
//! Spaces are validated as they are added. Portals are collected by name and
//! linked in [`MapBuilder::finish`], once every space is known. A bad record
//! never aborts loading: rejected spaces and dangling portals are logged and
//! listed in the [`LoadReport`].

use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

use crate::arena::CampusMap;
use crate::building::Building;
use crate::error::{Error, Result};
use crate::keys::SpaceKey;
use crate::portal::{Portal, PortalRecord, FLOOR_CONTOUR};
use crate::space::{Space, SpaceRecord};

/// Records skipped while building a map.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub rejected_spaces: Vec<Error>,
    pub rejected_portals: Vec<Error>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected_spaces.is_empty() && self.rejected_portals.is_empty()
    }
}

/// Incremental builder for a [`CampusMap`].
///
/// # Example
///
/// ```
/// use wayfinder_geometry::Polyline;
/// use wayfinder_topology::{MapBuilder, PortalKind, PortalRecord, SpaceRecord, SpaceType};
///
/// let room = |x: f64| Polyline::from_xy(&[(x, 0.0), (x + 4.0, 0.0), (x + 4.0, 4.0), (x, 4.0)], 0.0);
/// let mut builder = MapBuilder::new();
/// builder.add_space(SpaceRecord::new("A", SpaceType::Unknown, room(0.0))).unwrap();
/// builder.add_space(SpaceRecord::new("B", SpaceType::Unknown, room(4.0))).unwrap();
/// builder.add_portal(PortalRecord::new(
///     "door-A-B",
///     PortalKind::Door,
///     "A",
///     "B",
///     Polyline::from_xy(&[(4.0, 1.0), (4.0, 3.0)], 0.0),
/// ));
///
/// let (map, report) = builder.finish();
/// assert!(report.is_clean());
/// assert_eq!(map.portal_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MapBuilder {
    spaces: SlotMap<SpaceKey, Space>,
    space_names: FxHashMap<String, SpaceKey>,
    portals: Vec<PortalRecord>,
    report: LoadReport,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and adds one space.
    ///
    /// Fails on a duplicate name or malformed geometry; the builder stays
    /// usable either way.
    pub fn add_space(&mut self, record: SpaceRecord) -> Result<SpaceKey> {
        if self.space_names.contains_key(&record.name) {
            return Err(Error::DuplicateSpace(record.name));
        }
        let space = Space::from_record(record)?;
        let name = space.name().to_string();
        let key = self.spaces.insert(space);
        self.space_names.insert(name, key);
        Ok(key)
    }

    /// Adds every record, logging and reporting the ones that fail.
    /// Returns the number of spaces accepted.
    pub fn add_spaces(&mut self, records: impl IntoIterator<Item = SpaceRecord>) -> usize {
        let mut accepted = 0;
        for record in records {
            match self.add_space(record) {
                Ok(_) => accepted += 1,
                Err(err) => {
                    tracing::warn!(error = %err, "Rejected space");
                    self.report.rejected_spaces.push(err);
                }
            }
        }
        accepted
    }

    /// Queues a portal for linking.
    pub fn add_portal(&mut self, record: PortalRecord) {
        self.portals.push(record);
    }

    pub fn add_portals(&mut self, records: impl IntoIterator<Item = PortalRecord>) {
        self.portals.extend(records);
    }

    pub fn space_count(&self) -> usize {
        self.spaces.len()
    }

    /// Links portals and groups spaces into buildings.
    pub fn finish(self) -> (CampusMap, LoadReport) {
        let MapBuilder {
            spaces,
            space_names,
            portals: records,
            mut report,
        } = self;

        let mut map = CampusMap {
            spaces,
            space_names,
            ..Default::default()
        };

        for (key, space) in map.spaces.iter() {
            map.buildings
                .entry(space.building_name().to_string())
                .or_insert_with(|| Building::new(space.building_name()))
                .spaces
                .push(key);
        }

        let mut seen: FxHashSet<(String, SpaceKey, SpaceKey)> = FxHashSet::default();
        for record in records {
            match link_portal(&mut map, &mut seen, record) {
                Ok(()) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "Excluded portal");
                    report.rejected_portals.push(err);
                }
            }
        }

        tracing::info!(
            spaces = map.space_count(),
            portals = map.portal_count(),
            buildings = map.building_count(),
            rejected_spaces = report.rejected_spaces.len(),
            rejected_portals = report.rejected_portals.len(),
            "Campus map linked"
        );

        (map, report)
    }
}

fn link_portal(
    map: &mut CampusMap,
    seen: &mut FxHashSet<(String, SpaceKey, SpaceKey)>,
    record: PortalRecord,
) -> Result<()> {
    let dangling = |target: &str| Error::DanglingPortal {
        portal: record.name.clone(),
        target: target.to_string(),
    };

    let source = map
        .space_key(&record.source)
        .ok_or_else(|| dangling(&record.source))?;
    if record.destination == FLOOR_CONTOUR {
        return Err(dangling(&record.destination));
    }
    let destination = map
        .space_key(&record.destination)
        .ok_or_else(|| dangling(&record.destination))?;

    let kind = record.kind;
    let portal = Portal::new(record.name, kind, record.contour, source, destination)?;
    if !seen.insert((portal.name.clone(), source, destination)) {
        return Err(Error::DuplicatePortal(portal.name));
    }
    let key = map.portals.insert(portal);

    map.spaces[source].portals.push(key);
    if destination != source {
        map.spaces[destination].portals.push(key);
    }

    if kind.leads_outside() {
        for side in [source, destination] {
            let space = &map.spaces[side];
            if space.is_base_map() {
                continue;
            }
            if let Some(building) = map.buildings.get_mut(space.building_name()) {
                building.add_transition_space(side);
            }
        }
    }

    Ok(())
}
