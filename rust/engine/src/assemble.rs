// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turns a node path through a route graph into names and a polyline.
//!
//! The node path is split into runs of consecutive nodes from one space.
//! Consecutive runs meet at a doorway: the last node of one run and the
//! first of the next are the two portal nodes of the same portal. The path
//! ends on a portal node leading into the destination, which contributes no
//! nodes of its own.
//!
//! Polyline segments, each simplified against its own space boundary:
//! - source space: intra-space route from the source anchor to the first exit;
//! - intermediate spaces: the run's node positions;
//! - destination: intra-space route from the last portal to its anchor.

use wayfinder_geometry::{simplify_path, Polyline, Position};
use wayfinder_topology::{
    intra_space_route, space_anchor, CampusMap, Error, NavGraph, Result, SpaceKey,
};

/// Names and geometry of a resolved route.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Assembled {
    pub spaces: Vec<String>,
    pub portals: Vec<String>,
    pub polyline: Polyline,
}

/// Route that never leaves its space.
pub(crate) fn single_space(map: &CampusMap, space: SpaceKey) -> Result<Assembled> {
    Ok(Assembled {
        spaces: vec![space_name(map, space)?],
        portals: Vec::new(),
        polyline: Polyline::from_points(vec![space_anchor(map, space)?]),
    })
}

/// Assembles the fine node `path` through `graph`, ending in `destination`.
pub(crate) fn assemble(
    map: &CampusMap,
    graph: &NavGraph,
    destination: SpaceKey,
    path: &[usize],
) -> Result<Assembled> {
    let mut runs: Vec<(SpaceKey, Vec<usize>)> = Vec::new();
    for &idx in path {
        let space = graph.nodes[idx].space;
        match runs.last_mut() {
            Some((current, run)) if *current == space => run.push(idx),
            _ => runs.push((space, vec![idx])),
        }
    }

    let mut spaces = Vec::with_capacity(runs.len() + 1);
    let mut portals = Vec::with_capacity(runs.len());
    let mut points: Vec<Position> = Vec::new();

    for (n, (space, run)) in runs.iter().enumerate() {
        spaces.push(space_name(map, *space)?);

        let Some(&last) = run.last() else {
            continue;
        };
        let raw = if n == 0 {
            let exit = graph.nodes[last].position;
            intra_space_route(map, *space, space_anchor(map, *space)?, exit)?
        } else {
            run.iter().map(|&i| graph.nodes[i].position).collect()
        };
        extend_simplified(&mut points, raw, map, *space)?;

        // Every run ends on the portal node it leaves through
        if let Some(pk) = graph.nodes[last].portal {
            let portal = map.portal(pk).ok_or(Error::PortalNotFound(pk))?;
            portals.push(portal.name().to_string());
        }
    }

    spaces.push(space_name(map, destination)?);
    if let Some(&last) = path.last() {
        let entry = graph.nodes[last].position;
        let raw = intra_space_route(map, destination, entry, space_anchor(map, destination)?)?;
        extend_simplified(&mut points, raw, map, destination)?;
    }

    dedup_exact(&mut points);
    Ok(Assembled {
        spaces,
        portals,
        polyline: Polyline::from_points(points),
    })
}

fn space_name(map: &CampusMap, space: SpaceKey) -> Result<String> {
    map.space(space)
        .map(|s| s.name().to_string())
        .ok_or(Error::SpaceNotFound(space))
}

fn extend_simplified(
    out: &mut Vec<Position>,
    mut raw: Vec<Position>,
    map: &CampusMap,
    space: SpaceKey,
) -> Result<()> {
    dedup_exact(&mut raw);
    let boundary = map.space(space).ok_or(Error::SpaceNotFound(space))?.boundary();
    out.extend(simplify_path(&raw, boundary));
    Ok(())
}

/// Drops consecutive repeats. Fuzzy `==` would also merge distinct points
/// that happen to lie within its tolerance.
fn dedup_exact(points: &mut Vec<Position>) {
    points.dedup_by(|a, b| a.exactly_eq(b));
}
