// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Best-portal cache of one space.
//!
//! For every ordered pair of distinct neighbouring spaces `(prev, next)` the
//! cache holds the portal toward `prev` and the portal toward `next` whose
//! intra-space route through the room graph is shortest. Pairs are always
//! ranked by that route's length; the stored path is the straight segment
//! for convex spaces and the route itself otherwise.

use rustc_hash::FxHashMap;
use wayfinder_geometry::Polyline;

use crate::arena::CampusMap;
use crate::error::Result;
use crate::keys::{PortalKey, SpaceKey};
use crate::paths::intra_space_route;

/// Shortest portal pair through a space between two neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct BestPortalPair {
    /// Portal shared with the previous space.
    pub entry: PortalKey,
    /// Portal shared with the next space.
    pub exit: PortalKey,
    /// Length of the intra-space route between the two portals.
    pub length: f64,
    pub path: Polyline,
}

#[derive(Debug, Clone, Default)]
pub struct BestPortalCache {
    pairs: FxHashMap<(SpaceKey, SpaceKey), BestPortalPair>,
}

impl BestPortalCache {
    /// Computes the cache for `space`.
    pub fn build(map: &CampusMap, space: SpaceKey) -> Result<Self> {
        let s = map.space_ref(space)?;

        // Portals grouped by the neighbour they lead to, in portal order
        let mut groups: Vec<(SpaceKey, Vec<PortalKey>)> = Vec::new();
        for (pk, other) in map.neighbors(space) {
            match groups.iter_mut().find(|(k, _)| *k == other) {
                Some((_, list)) => list.push(pk),
                None => groups.push((other, vec![pk])),
            }
        }

        // One route per unordered portal pair: (route length, stored path)
        let mut paths: FxHashMap<(PortalKey, PortalKey), (f64, Polyline)> = FxHashMap::default();
        let mut path_between = |a: PortalKey, b: PortalKey| -> Result<(f64, Polyline)> {
            let key = if a <= b { (a, b) } else { (b, a) };
            if let Some((length, p)) = paths.get(&key) {
                let p = if key.0 == a { p.clone() } else { reversed(p) };
                return Ok((*length, p));
            }
            let start = map.portal_ref(key.0)?.position();
            let finish = map.portal_ref(key.1)?.position();
            let route = Polyline::from_points(intra_space_route(map, space, start, finish)?);
            let length = route.length();
            let forward = if s.is_convex() {
                Polyline::from_points(vec![start, finish])
            } else {
                route
            };
            let out = if key.0 == a { forward.clone() } else { reversed(&forward) };
            paths.insert(key, (length, forward));
            Ok((length, out))
        };

        let mut pairs = FxHashMap::default();
        for (prev, entries) in &groups {
            for (next, exits) in &groups {
                if prev == next {
                    continue;
                }
                let mut best: Option<BestPortalPair> = None;
                for &entry in entries {
                    for &exit in exits {
                        let (length, path) = path_between(entry, exit)?;
                        if best.as_ref().map_or(true, |b| length < b.length) {
                            best = Some(BestPortalPair {
                                entry,
                                exit,
                                length,
                                path,
                            });
                        }
                    }
                }
                if let Some(best) = best {
                    pairs.insert((*prev, *next), best);
                }
            }
        }

        tracing::debug!(space = %s.name(), pairs = pairs.len(), "Computed best portals");
        Ok(Self { pairs })
    }

    /// Best pair between `prev` and `next`; `None` unless both are neighbours.
    pub fn get(&self, prev: SpaceKey, next: SpaceKey) -> Option<&BestPortalPair> {
        self.pairs.get(&(prev, next))
    }

    /// The `(entry, exit)` portals between `prev` and `next`.
    pub fn lookup(&self, prev: SpaceKey, next: SpaceKey) -> Option<(PortalKey, PortalKey)> {
        self.get(prev, next).map(|p| (p.entry, p.exit))
    }

    /// Path through the space between `prev` and `next`.
    pub fn path_between(&self, prev: SpaceKey, next: SpaceKey) -> Option<&Polyline> {
        self.get(prev, next).map(|p| &p.path)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Mean through length over every cached pair.
    pub fn average_length(&self) -> Option<f64> {
        if self.pairs.is_empty() {
            return None;
        }
        Some(self.pairs.values().map(|p| p.length).sum::<f64>() / self.pairs.len() as f64)
    }
}

fn reversed(path: &Polyline) -> Polyline {
    path.points().iter().rev().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::MapBuilder;
    use crate::fixtures::{campus, door, room};
    use crate::portal::PortalKind;
    use approx::assert_relative_eq;
    use wayfinder_geometry::Position;

    #[test]
    fn pairs_cover_ordered_neighbours() {
        let map = campus();
        let walk = map.resolve_space("BMAP-walk").unwrap();
        let x1 = map.resolve_space("X-1").unwrap();
        let y1 = map.resolve_space("Y-1").unwrap();
        let lawn = map.resolve_space("BMAP-lawn").unwrap();

        let cache = map.best_portals(walk).unwrap();
        // Three neighbours, six ordered pairs
        assert_eq!(cache.len(), 6);

        let pair = cache.get(x1, y1).unwrap();
        assert_eq!(map.portal(pair.entry).unwrap().name(), "exit-X");
        assert_eq!(map.portal(pair.exit).unwrap().name(), "exit-Y");
        assert_relative_eq!(pair.length, 4.0, epsilon = 1e-9);

        let back = cache.path_between(y1, x1).unwrap();
        assert_eq!(back.first(), pair.path.last());
        assert!(cache.get(x1, lawn).is_some());
        assert!(cache.lookup(x1, x1).is_none());
    }

    #[test]
    fn pairs_are_ranked_by_route_length_not_straight_distance() {
        // Convex hall split along its diagonal. `p2` is the closer door as
        // the crow flies but sits in the other facet, so its route detours
        // through the interior node.
        let mut builder = MapBuilder::new();
        builder.add_space(room("H-hall", 0.0, 0.0)).unwrap();
        builder.add_space(room("H-south", 0.0, -4.0)).unwrap();
        builder.add_space(room("H-east", 4.0, 0.0)).unwrap();
        builder.add_portal(door("p1", PortalKind::Door, "H-hall", "H-south", (2.6, 0.0), (3.4, 0.0)));
        builder.add_portal(door("p2", PortalKind::Door, "H-hall", "H-south", (3.6, 4.0), (4.0, 4.0)));
        builder.add_portal(door("e", PortalKind::Door, "H-hall", "H-east", (4.0, 3.6), (4.0, 4.0)));
        let (map, _) = builder.finish();

        let hall = map.resolve_space("H-hall").unwrap();
        let south = map.resolve_space("H-south").unwrap();
        let east = map.resolve_space("H-east").unwrap();
        assert!(map.space(hall).unwrap().is_convex());
        let cache = map.best_portals(hall).unwrap();

        let pair = cache.get(south, east).unwrap();
        assert_eq!(map.portal(pair.entry).unwrap().name(), "p1");
        assert_eq!(map.portal(pair.exit).unwrap().name(), "e");
        assert_relative_eq!(pair.length, 15.44_f64.sqrt(), epsilon = 1e-9);

        // Convex spaces store the straight segment between the two portals
        assert_eq!(
            pair.path.points(),
            &[Position::new(3.0, 0.0, 0.0), Position::new(4.0, 3.8, 0.0)]
        );
        assert_relative_eq!(cache.average_length().unwrap(), pair.length, epsilon = 1e-9);
    }

    #[test]
    fn isolated_space_has_empty_cache() {
        let mut builder = MapBuilder::new();
        builder.add_space(room("Z-1", 0.0, 0.0)).unwrap();
        let (map, _) = builder.finish();
        let z = map.resolve_space("Z-1").unwrap();
        let cache = map.best_portals(z).unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.average_length(), None);
    }
}
