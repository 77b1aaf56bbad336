// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Portals: typed connectors between two spaces.
//!
//! A portal is stored once with a source and a destination, but the link it
//! creates is traversable both ways. Direction only matters when a
//! [`ConstraintPolicy`](crate::policy::ConstraintPolicy) evaluates it for the
//! space being entered.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wayfinder_geometry::{Polyline, Position};

use crate::error::{self, Error};
use crate::keys::SpaceKey;

/// Placeholder destination used by floor outlines that do not lead anywhere.
pub const FLOOR_CONTOUR: &str = "FLOORCONTOUR";

/// Type of a portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortalKind {
    Door,
    /// Opening without a physical door (e.g. a corridor split into spaces).
    Implicit,
    StairsUp,
    StairsDown,
    ElevatorUp,
    ElevatorDown,
    /// Building exit onto the base map.
    Outdoor,
    /// Link between a building and a transition region outside it.
    Transition,
}

impl PortalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortalKind::Door => "DOOR",
            PortalKind::Implicit => "IMPLICIT",
            PortalKind::StairsUp => "STAIRS_UP",
            PortalKind::StairsDown => "STAIRS_DOWN",
            PortalKind::ElevatorUp => "ELEV_UP",
            PortalKind::ElevatorDown => "ELEV_DOWN",
            PortalKind::Outdoor => "OUTDOOR",
            PortalKind::Transition => "TRANSITION",
        }
    }

    pub fn is_stairs(&self) -> bool {
        matches!(self, PortalKind::StairsUp | PortalKind::StairsDown)
    }

    pub fn is_elevator(&self) -> bool {
        matches!(self, PortalKind::ElevatorUp | PortalKind::ElevatorDown)
    }

    /// Stairs or elevators in either direction.
    pub fn is_vertical(&self) -> bool {
        self.is_stairs() || self.is_elevator()
    }

    /// Portals that lead between a building and the outside.
    pub fn leads_outside(&self) -> bool {
        matches!(self, PortalKind::Outdoor | PortalKind::Transition)
    }
}

impl FromStr for PortalKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DOOR" => Ok(PortalKind::Door),
            "IMPLICIT" => Ok(PortalKind::Implicit),
            "STAIRS_UP" => Ok(PortalKind::StairsUp),
            "STAIRS_DOWN" => Ok(PortalKind::StairsDown),
            "ELEV_UP" | "ELEVATOR_UP" => Ok(PortalKind::ElevatorUp),
            "ELEV_DOWN" | "ELEVATOR_DOWN" => Ok(PortalKind::ElevatorDown),
            "OUTDOOR" => Ok(PortalKind::Outdoor),
            "TRANSITION" => Ok(PortalKind::Transition),
            _ => Err(Error::UnknownPortalKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for PortalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unlinked portal as handed over by the ingestion layer. Spaces are
/// referenced by name and resolved when the map is finished.
#[derive(Debug, Clone)]
pub struct PortalRecord {
    pub name: String,
    pub kind: PortalKind,
    pub source: String,
    pub destination: String,
    pub contour: Polyline,
}

impl PortalRecord {
    pub fn new(
        name: impl Into<String>,
        kind: PortalKind,
        source: impl Into<String>,
        destination: impl Into<String>,
        contour: Polyline,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            source: source.into(),
            destination: destination.into(),
            contour,
        }
    }
}

/// A linked portal.
#[derive(Debug, Clone)]
pub struct Portal {
    pub(crate) name: String,
    pub(crate) kind: PortalKind,
    pub(crate) contour: Polyline,
    pub(crate) position: Position,
    pub(crate) source: SpaceKey,
    pub(crate) destination: SpaceKey,
}

impl Portal {
    pub(crate) fn new(
        name: String,
        kind: PortalKind,
        contour: Polyline,
        source: SpaceKey,
        destination: SpaceKey,
    ) -> error::Result<Self> {
        let Some(position) = contour.centroid() else {
            return Err(Error::EmptyContour(name));
        };
        Ok(Self {
            name,
            kind,
            contour,
            position,
            source,
            destination,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PortalKind {
        self.kind
    }

    pub fn contour(&self) -> &Polyline {
        &self.contour
    }

    /// Approximate position: the centroid of the contour.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn source(&self) -> SpaceKey {
        self.source
    }

    pub fn destination(&self) -> SpaceKey {
        self.destination
    }

    /// Returns `true` if `space` is one of the two linked spaces.
    pub fn connects(&self, space: SpaceKey) -> bool {
        self.source == space || self.destination == space
    }

    /// The space on the other side of the portal when standing in `space`.
    pub fn other_side(&self, space: SpaceKey) -> Option<SpaceKey> {
        if self.source == space {
            Some(self.destination)
        } else if self.destination == space {
            Some(self.source)
        } else {
            None
        }
    }
}
