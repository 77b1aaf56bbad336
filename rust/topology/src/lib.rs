// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Wayfinder Topology
//!
//! Campus map model and the graph machinery routing runs on.
//!
//! Spaces (rooms and outdoor regions) and portals (doors, stairs, elevators,
//! outdoor links) live in a slot-map arena, [`CampusMap`], built once by
//! [`MapBuilder`]. Each space lazily derives a navigation graph from its
//! floor triangulation ([`NavGraph`]); route graphs are copies of those joined
//! at doorways. A single label-setting [`search`](search::search) serves the
//! space-level and node-level strategies in [`paths`], with portal legality
//! decided by a [`ConstraintPolicy`].

pub mod arena;
pub mod best_portals;
pub mod building;
pub mod construction;
pub mod error;
pub mod graph;
pub mod keys;
pub mod paths;
pub mod policy;
pub mod portal;
pub mod search;
pub mod space;

#[cfg(test)]
mod fixtures;

pub use arena::CampusMap;
pub use best_portals::{BestPortalCache, BestPortalPair};
pub use building::Building;
pub use construction::{LoadReport, MapBuilder};
pub use error::{Error, Result};
pub use graph::{NavEdge, NavGraph, NavNode};
pub use keys::{PortalKey, SpaceKey};
pub use paths::{
    intra_space_route, space_anchor, NodeSearch, NodeTarget, PortalWeighting, SpaceSearch,
    SpaceTarget,
};
pub use policy::{ConstraintPolicy, TravelMode, PORTAL_WEIGHT, VERTICAL_PORTAL_WEIGHT};
pub use portal::{Portal, PortalKind, PortalRecord, FLOOR_CONTOUR};
pub use search::{SearchPath, SearchStrategy};
pub use space::{building_name_of, Space, SpaceRecord, SpaceType, BASE_MAP, ROOM_SEPARATOR};
