// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Routing errors.

/// Result type alias for routing operations.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Search stage that failed to reach its goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    /// Space-to-space search over portals.
    SpaceLevel,
    /// Node-to-node search over the merged route graph.
    NodeLevel,
}

impl std::fmt::Display for SearchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchStage::SpaceLevel => f.write_str("space level"),
            SearchStage::NodeLevel => f.write_str("node level"),
        }
    }
}

/// Errors that can occur while answering a route query.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// A search stage exhausted its frontier.
    #[error("no route from {from} to {to} ({stage} search)")]
    NoRouteFound {
        from: String,
        to: String,
        stage: SearchStage,
    },

    /// A space token does not name a loaded space.
    #[error("unknown space: {0}")]
    UnknownSpace(String),

    /// A building token does not name a loaded building.
    #[error("unknown building: {0}")]
    UnknownBuilding(String),

    /// Map lookups or per-space precomputation failed.
    #[error(transparent)]
    Map(#[from] wayfinder_topology::Error),
}

impl RouteError {
    pub fn is_no_route(&self) -> bool {
        matches!(self, RouteError::NoRouteFound { .. })
    }
}
