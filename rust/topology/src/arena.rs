// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for a linked campus map.
//!
//! The [`CampusMap`] owns every space and portal in slot maps with stable,
//! generational keys. Spaces list their portals by key and portals name their
//! two spaces by key, so the space/portal web holds no references. Maps are
//! produced by [`MapBuilder`](crate::construction::MapBuilder) and are
//! immutable afterwards, apart from the per-space caches that are filled at
//! most once.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use wayfinder_geometry::Position;

use crate::best_portals::BestPortalCache;
use crate::building::Building;
use crate::error::{Error, Result};
use crate::graph::NavGraph;
use crate::keys::{PortalKey, SpaceKey};
use crate::portal::Portal;
use crate::space::Space;

/// A linked campus map: spaces, portals and buildings.
#[derive(Debug, Default)]
pub struct CampusMap {
    pub(crate) spaces: SlotMap<SpaceKey, Space>,
    pub(crate) portals: SlotMap<PortalKey, Portal>,
    pub(crate) space_names: FxHashMap<String, SpaceKey>,
    pub(crate) buildings: FxHashMap<String, Building>,
}

impl CampusMap {
    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn space(&self, key: SpaceKey) -> Option<&Space> {
        self.spaces.get(key)
    }

    pub fn portal(&self, key: PortalKey) -> Option<&Portal> {
        self.portals.get(key)
    }

    pub(crate) fn space_ref(&self, key: SpaceKey) -> Result<&Space> {
        self.spaces.get(key).ok_or(Error::SpaceNotFound(key))
    }

    pub(crate) fn portal_ref(&self, key: PortalKey) -> Result<&Portal> {
        self.portals.get(key).ok_or(Error::PortalNotFound(key))
    }

    /// Key of the space with exactly this name.
    pub fn space_key(&self, name: &str) -> Option<SpaceKey> {
        self.space_names.get(name).copied()
    }

    /// Like [`space_key`](Self::space_key) but fails with
    /// [`Error::UnknownSpace`].
    pub fn resolve_space(&self, name: &str) -> Result<SpaceKey> {
        self.space_key(name)
            .ok_or_else(|| Error::UnknownSpace(name.to_string()))
    }

    pub fn building(&self, name: &str) -> Option<&Building> {
        self.buildings.get(name)
    }

    /// Like [`building`](Self::building) but fails with
    /// [`Error::UnknownBuilding`].
    pub fn resolve_building(&self, name: &str) -> Result<&Building> {
        self.building(name)
            .ok_or_else(|| Error::UnknownBuilding(name.to_string()))
    }

    /// Name of a space, or an empty string for a stale key.
    pub fn space_name(&self, key: SpaceKey) -> &str {
        self.spaces.get(key).map_or("", |s| s.name())
    }

    pub fn spaces(&self) -> impl Iterator<Item = (SpaceKey, &Space)> {
        self.spaces.iter()
    }

    pub fn portals(&self) -> impl Iterator<Item = (PortalKey, &Portal)> {
        self.portals.iter()
    }

    pub fn buildings(&self) -> impl Iterator<Item = &Building> {
        self.buildings.values()
    }

    pub fn space_keys(&self) -> Vec<SpaceKey> {
        self.spaces.keys().collect()
    }

    pub fn space_count(&self) -> usize {
        self.spaces.len()
    }

    pub fn portal_count(&self) -> usize {
        self.portals.len()
    }

    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }

    // =========================================================================
    // Adjacency
    // =========================================================================

    /// Portals of `space` paired with the space on their other side.
    pub fn neighbors(&self, space: SpaceKey) -> Vec<(PortalKey, SpaceKey)> {
        let Some(s) = self.spaces.get(space) else {
            return Vec::new();
        };
        s.portals()
            .iter()
            .filter_map(|&pk| {
                let other = self.portals.get(pk)?.other_side(space)?;
                Some((pk, other))
            })
            .collect()
    }

    /// Distinct neighbouring spaces of `space`, in portal order.
    pub fn neighbor_spaces(&self, space: SpaceKey) -> Vec<SpaceKey> {
        let mut out: Vec<SpaceKey> = Vec::new();
        for (_, other) in self.neighbors(space) {
            if !out.contains(&other) {
                out.push(other);
            }
        }
        out
    }

    // =========================================================================
    // Spatial queries
    // =========================================================================

    /// First space whose boundary contains `position` (planar test).
    pub fn space_at(&self, position: &Position) -> Option<SpaceKey> {
        self.spaces
            .iter()
            .find(|(_, s)| s.contains(position))
            .map(|(k, _)| k)
    }

    /// First space of `building` whose boundary contains `position`.
    pub fn space_at_in_building(&self, building: &str, position: &Position) -> Option<SpaceKey> {
        self.buildings
            .get(building)?
            .spaces()
            .iter()
            .copied()
            .find(|&k| self.spaces.get(k).is_some_and(|s| s.contains(position)))
    }

    /// Spaces of a building.
    pub fn spaces_in_building(&self, building: &str) -> Result<&[SpaceKey]> {
        Ok(self.resolve_building(building)?.spaces())
    }

    // =========================================================================
    // Per-space caches
    // =========================================================================

    /// Navigation graph of a space, built on first use.
    ///
    /// The returned graph is shared and read-only. Route-specific graphs are
    /// assembled from copies by [`NavGraph::combine`].
    pub fn room_graph(&self, key: SpaceKey) -> Result<&NavGraph> {
        let space = self.space_ref(key)?;
        if let Some(graph) = space.graph.get() {
            return Ok(graph);
        }
        let built = NavGraph::build(self, key)?;
        Ok(space.graph.get_or_init(|| built))
    }

    /// Best-portal cache of a space, computed on first use.
    pub fn best_portals(&self, key: SpaceKey) -> Result<&BestPortalCache> {
        let space = self.space_ref(key)?;
        if let Some(cache) = space.best_portals.get() {
            return Ok(cache);
        }
        let built = BestPortalCache::build(self, key)?;
        Ok(space.best_portals.get_or_init(|| built))
    }
}
