// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Travel modes and portal legality.
//!
//! A portal is judged for the space being entered through it:
//!
//! | Mode | Illegal |
//! |---|---|
//! | `AlwaysLegal` | nothing |
//! | every other mode | base-map building footprints |
//! | `Rolling` | stairs; outdoor portals into grass, construction or unknown terrain |
//! | `Walking` | outdoor portals into construction or unknown terrain |
//! | `Paved` | outdoor or transition portals into grass, construction or unknown terrain |
//!
//! Legal vertical portals cost [`VERTICAL_PORTAL_WEIGHT`], everything else
//! [`PORTAL_WEIGHT`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::arena::CampusMap;
use crate::error::Error;
use crate::keys::{PortalKey, SpaceKey};
use crate::portal::{Portal, PortalKind};
use crate::space::{Space, SpaceType};

/// Cost of crossing an ordinary portal.
pub const PORTAL_WEIGHT: f64 = 1.0;

/// Cost of crossing stairs or an elevator; stands in for the floor height.
pub const VERTICAL_PORTAL_WEIGHT: f64 = 10.0;

/// Declared travel mode of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    /// Wheelchairs, carts: no stairs, no rough terrain.
    Rolling,
    Walking,
    /// Walking indoors, rolling rules outdoors.
    Paved,
    /// Unconstrained; used for graph-building passes.
    AlwaysLegal,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Rolling,
        TravelMode::Walking,
        TravelMode::Paved,
        TravelMode::AlwaysLegal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Rolling => "ROLLING",
            TravelMode::Walking => "WALKING",
            TravelMode::Paved => "PAVED",
            TravelMode::AlwaysLegal => "ALWAYS_LEGAL",
        }
    }
}

impl FromStr for TravelMode {
    type Err = Error;

    /// Accepts `WALKING`, `walking` and the prefixed `ROUTE_WALKING` forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase().replace('-', "_");
        let tag = upper.strip_prefix("ROUTE_").unwrap_or(&upper);
        match tag {
            "ROLLING" => Ok(TravelMode::Rolling),
            "WALKING" => Ok(TravelMode::Walking),
            "PAVED" => Ok(TravelMode::Paved),
            "ALWAYS_LEGAL" | "ALWAYSLEGAL" => Ok(TravelMode::AlwaysLegal),
            _ => Err(Error::UnknownTravelMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Portal legality and cost for one travel mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintPolicy {
    mode: TravelMode,
}

impl ConstraintPolicy {
    pub fn new(mode: TravelMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    /// Whether `portal` may be crossed into `entering`.
    pub fn is_legal(&self, portal: &Portal, entering: &Space) -> bool {
        if self.mode == TravelMode::AlwaysLegal {
            return true;
        }
        if entering.is_base_map() && *entering.space_type() == SpaceType::Building {
            return false;
        }

        let kind = portal.kind();
        let outdoor_terrain = entering.is_base_map();
        match self.mode {
            TravelMode::Rolling => {
                !(kind.is_stairs()
                    || (kind == PortalKind::Outdoor
                        && outdoor_terrain
                        && entering.space_type().is_rough_terrain()))
            }
            TravelMode::Walking => {
                !(kind == PortalKind::Outdoor
                    && outdoor_terrain
                    && entering.space_type().is_impassable_terrain())
            }
            TravelMode::Paved => {
                !(kind.leads_outside()
                    && outdoor_terrain
                    && entering.space_type().is_rough_terrain())
            }
            TravelMode::AlwaysLegal => true,
        }
    }

    /// Cost of crossing `portal` into `entering`, or `None` if illegal.
    pub fn portal_weight(&self, portal: &Portal, entering: &Space) -> Option<f64> {
        if !self.is_legal(portal, entering) {
            return None;
        }
        if self.mode != TravelMode::AlwaysLegal && portal.kind().is_vertical() {
            Some(VERTICAL_PORTAL_WEIGHT)
        } else {
            Some(PORTAL_WEIGHT)
        }
    }

    /// Key-based [`portal_weight`](Self::portal_weight); `None` also for
    /// stale keys.
    pub fn evaluate(&self, map: &CampusMap, portal: PortalKey, entering: SpaceKey) -> Option<f64> {
        self.portal_weight(map.portal(portal)?, map.space(entering)?)
    }
}

impl From<TravelMode> for ConstraintPolicy {
    fn from(mode: TravelMode) -> Self {
        Self::new(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::MapBuilder;
    use crate::fixtures::{door, room, typed_room};

    /// Every portal kind from a room into every terrain type.
    fn exhaustive_map() -> CampusMap {
        let types = [
            SpaceType::Grass,
            SpaceType::Construction,
            SpaceType::Unknown,
            SpaceType::Sidewalk,
            SpaceType::Highway,
            SpaceType::Building,
            SpaceType::Slope,
            SpaceType::Other("OFF".into()),
        ];
        let kinds = [
            PortalKind::Door,
            PortalKind::Implicit,
            PortalKind::StairsUp,
            PortalKind::StairsDown,
            PortalKind::ElevatorUp,
            PortalKind::ElevatorDown,
            PortalKind::Outdoor,
            PortalKind::Transition,
        ];

        let mut builder = MapBuilder::new();
        builder.add_space(room("H-0", 0.0, 0.0)).unwrap();
        for (i, ty) in types.iter().enumerate() {
            let x = 4.0 * (i as f64 + 1.0);
            builder
                .add_space(typed_room(&format!("BMAP-{i}"), ty.clone(), x, 0.0))
                .unwrap();
            builder
                .add_space(typed_room(&format!("H-{}", i + 1), ty.clone(), x, 4.0))
                .unwrap();
            for kind in kinds {
                for target in [format!("BMAP-{i}"), format!("H-{}", i + 1)] {
                    builder.add_portal(door(
                        &format!("{kind}-{target}"),
                        kind,
                        "H-0",
                        &target,
                        (0.0, 1.0),
                        (0.0, 2.0),
                    ));
                }
            }
        }
        builder.finish().0
    }

    fn legal_set(map: &CampusMap, mode: TravelMode) -> Vec<(PortalKey, SpaceKey)> {
        let policy = ConstraintPolicy::new(mode);
        map.portals()
            .filter(|(k, p)| policy.evaluate(map, *k, p.destination()).is_some())
            .map(|(k, p)| (k, p.destination()))
            .collect()
    }

    #[test]
    fn modes_parse_with_and_without_prefix() {
        assert_eq!("ROUTE_ROLLING".parse::<TravelMode>().unwrap(), TravelMode::Rolling);
        assert_eq!("walking".parse::<TravelMode>().unwrap(), TravelMode::Walking);
        assert_eq!("always-legal".parse::<TravelMode>().unwrap(), TravelMode::AlwaysLegal);
        assert!("FLYING".parse::<TravelMode>().is_err());
        for mode in TravelMode::ALL {
            assert_eq!(mode.to_string().parse::<TravelMode>().unwrap(), mode);
        }
    }

    #[test]
    fn always_legal_accepts_everything_other_modes_accept() {
        let map = exhaustive_map();
        let all = legal_set(&map, TravelMode::AlwaysLegal);
        assert_eq!(all.len(), map.portal_count());
        for mode in [TravelMode::Rolling, TravelMode::Walking, TravelMode::Paved] {
            for entry in legal_set(&map, mode) {
                assert!(all.contains(&entry));
            }
        }
    }

    #[test]
    fn rolling_is_stricter_than_walking() {
        let map = exhaustive_map();
        let walking = legal_set(&map, TravelMode::Walking);
        for entry in legal_set(&map, TravelMode::Rolling) {
            assert!(walking.contains(&entry));
        }
    }

    #[test]
    fn paved_matches_walking_indoors() {
        let map = exhaustive_map();
        let walking = ConstraintPolicy::new(TravelMode::Walking);
        let paved = ConstraintPolicy::new(TravelMode::Paved);
        for (k, p) in map.portals() {
            let dest = map.space(p.destination()).unwrap();
            if dest.is_base_map() {
                continue;
            }
            assert_eq!(
                walking.evaluate(&map, k, p.destination()),
                paved.evaluate(&map, k, p.destination()),
                "{}",
                p.name()
            );
        }
    }

    #[test]
    fn rules_per_mode() {
        let map = exhaustive_map();
        let check = |mode: TravelMode, name: &str| {
            let (k, p) = map.portals().find(|(_, p)| p.name() == name).unwrap();
            ConstraintPolicy::new(mode).evaluate(&map, k, p.destination())
        };

        // BMAP-0 grass, BMAP-1 construction, BMAP-3 sidewalk, BMAP-5 footprint
        assert_eq!(check(TravelMode::Rolling, "STAIRS_DOWN-H-1"), None);
        assert_eq!(check(TravelMode::Walking, "STAIRS_DOWN-H-1"), Some(VERTICAL_PORTAL_WEIGHT));
        assert_eq!(check(TravelMode::Rolling, "ELEV_UP-H-1"), Some(VERTICAL_PORTAL_WEIGHT));
        assert_eq!(check(TravelMode::Rolling, "OUTDOOR-BMAP-0"), None);
        assert_eq!(check(TravelMode::Walking, "OUTDOOR-BMAP-0"), Some(PORTAL_WEIGHT));
        assert_eq!(check(TravelMode::Walking, "OUTDOOR-BMAP-1"), None);
        assert_eq!(check(TravelMode::Walking, "TRANSITION-BMAP-1"), Some(PORTAL_WEIGHT));
        assert_eq!(check(TravelMode::Paved, "TRANSITION-BMAP-0"), None);
        assert_eq!(check(TravelMode::Paved, "OUTDOOR-BMAP-3"), Some(PORTAL_WEIGHT));
        assert_eq!(check(TravelMode::Walking, "DOOR-BMAP-5"), None);
        assert_eq!(check(TravelMode::AlwaysLegal, "DOOR-BMAP-5"), Some(PORTAL_WEIGHT));
        assert_eq!(check(TravelMode::AlwaysLegal, "STAIRS_UP-H-1"), Some(PORTAL_WEIGHT));
    }
}
