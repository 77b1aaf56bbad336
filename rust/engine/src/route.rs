// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Route requests and results.

use serde::{Deserialize, Serialize};
use wayfinder_geometry::Polyline;
use wayfinder_topology::TravelMode;

/// A routing query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Space name (`BUILDING-ROOM`) or building name.
    pub source: String,
    pub destination: String,
    pub mode: TravelMode,
}

impl RouteRequest {
    pub fn new(source: impl Into<String>, destination: impl Into<String>, mode: TravelMode) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            mode,
        }
    }

    /// Stable key for the route cache.
    pub fn cache_key(&self) -> String {
        format!("{} -> {} | {}", self.source, self.destination, self.mode)
    }
}

/// A resolved route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub request: RouteRequest,
    /// Traversed spaces, source first.
    pub spaces: Vec<String>,
    /// Crossed portals, in order.
    pub portals: Vec<String>,
    pub polyline: Polyline,
}

impl Route {
    pub fn cache_key(&self) -> String {
        self.request.cache_key()
    }

    /// Length of the polyline.
    pub fn length(&self) -> f64 {
        self.polyline.length()
    }
}
