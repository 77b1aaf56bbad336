// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Wayfinder Engine
//!
//! Answers "how do I get from A to B" on a campus map of rooms and outdoor
//! regions.
//!
//! ```
//! use wayfinder_engine::{EngineConfig, RoutingEngine};
//! use wayfinder_geometry::Polyline;
//! use wayfinder_topology::{MapBuilder, PortalKind, PortalRecord, SpaceRecord, SpaceType, TravelMode};
//!
//! let room = |x: f64| Polyline::from_xy(&[(x, 0.0), (x + 4.0, 0.0), (x + 4.0, 4.0), (x, 4.0)], 0.0);
//! let mut builder = MapBuilder::new();
//! builder.add_space(SpaceRecord::new("A", SpaceType::Unknown, room(0.0))).unwrap();
//! builder.add_space(SpaceRecord::new("B", SpaceType::Unknown, room(4.0))).unwrap();
//! builder.add_portal(PortalRecord::new(
//!     "door-A-B",
//!     PortalKind::Door,
//!     "A",
//!     "B",
//!     Polyline::from_xy(&[(4.0, 1.0), (4.0, 3.0)], 0.0),
//! ));
//! let (map, _) = builder.finish();
//!
//! let engine = RoutingEngine::new(map, EngineConfig::default());
//! let route = engine.find_route("A", "B", TravelMode::Walking).unwrap();
//! assert_eq!(route.spaces, ["A", "B"]);
//! assert_eq!(route.portals, ["door-A-B"]);
//! ```

mod assemble;
pub mod config;
pub mod engine;
pub mod error;
pub mod route;

pub use config::EngineConfig;
pub use engine::{PrecomputeReport, RoutingEngine};
pub use error::{Result, RouteError, SearchStage};
pub use route::{Route, RouteRequest};
