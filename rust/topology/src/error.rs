// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for map construction and lookups.

use crate::keys::{PortalKey, SpaceKey};

/// Result type alias for map operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying a campus map.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No space with this name is loaded.
    #[error("unknown space: {0}")]
    UnknownSpace(String),

    /// No building with this name is loaded.
    #[error("unknown building: {0}")]
    UnknownBuilding(String),

    /// A space with this name was already added.
    #[error("duplicate space: {0}")]
    DuplicateSpace(String),

    /// A portal type tag that is not recognised.
    #[error("unknown portal kind: {0}")]
    UnknownPortalKind(String),

    /// A travel-mode tag that is not recognised.
    #[error("unknown travel mode: {0}")]
    UnknownTravelMode(String),

    /// A portal with this name, source and destination was already added.
    #[error("duplicate portal: {0}")]
    DuplicatePortal(String),

    /// The space's boundary or triangulation cannot produce a usable graph.
    #[error("malformed geometry in space {space}: {source}")]
    MalformedGeometry {
        space: String,
        #[source]
        source: wayfinder_geometry::Error,
    },

    /// A portal whose contour has no points to place it by.
    #[error("portal {0} has an empty contour")]
    EmptyContour(String),

    /// A portal's destination does not resolve to a loaded space.
    #[error("dangling portal {portal}: destination {target} is not loaded")]
    DanglingPortal { portal: String, target: String },

    /// Space key not found in the arena.
    #[error("space not found: {0:?}")]
    SpaceNotFound(SpaceKey),

    /// Portal key not found in the arena.
    #[error("portal not found: {0:?}")]
    PortalNotFound(PortalKey),
}
