// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Search strategies for the two routing granularities.
//!
//! | Strategy | Nodes | Neighbours | Step cost | Goal |
//! |---|---|---|---|---|
//! | [`SpaceSearch`] | spaces | spaces behind legal portals | portal weight + through distance | target space, or any space of the target building |
//! | [`NodeSearch`] | graph nodes | graph adjacency | edge weight | legal portal node into the target space, or one exact node |

use serde::{Deserialize, Serialize};
use wayfinder_geometry::Position;

use crate::arena::CampusMap;
use crate::error::Result;
use crate::graph::NavGraph;
use crate::keys::{PortalKey, SpaceKey};
use crate::policy::{ConstraintPolicy, TravelMode};
use crate::search::{search, SearchPath, SearchStrategy};

/// Goal of a space-level search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceTarget {
    Space(SpaceKey),
    /// Any space whose building name matches.
    Building(String),
}

/// How the space-level search measures the distance through a space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PortalWeighting {
    /// Distance between the centroids of consecutive spaces.
    #[default]
    Centroid,
    /// Cached best-portal through length of the current space between the
    /// previous and the next space. Falls back to centroid distance at the
    /// first space or when the space has no cached entry.
    BestPortal,
}

impl std::str::FromStr for PortalWeighting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "centroid" => Ok(PortalWeighting::Centroid),
            "best-portal" | "bestportal" => Ok(PortalWeighting::BestPortal),
            other => Err(format!("unknown portal weighting: {other}")),
        }
    }
}

// ============================================================================
// Space level
// ============================================================================

/// Space-to-space (or space-to-building) search over portals.
#[derive(Debug, Clone)]
pub struct SpaceSearch<'a> {
    map: &'a CampusMap,
    policy: ConstraintPolicy,
    target: SpaceTarget,
    weighting: PortalWeighting,
}

impl<'a> SpaceSearch<'a> {
    pub fn new(map: &'a CampusMap, policy: ConstraintPolicy, target: SpaceTarget) -> Self {
        Self {
            map,
            policy,
            target,
            weighting: PortalWeighting::Centroid,
        }
    }

    pub fn with_weighting(mut self, weighting: PortalWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Cheapest space sequence from any seed to the target.
    pub fn run(&self, seeds: impl IntoIterator<Item = SpaceKey>) -> Option<SearchPath<SpaceKey>> {
        search(self, seeds)
    }

    fn centroid_distance(&self, from: SpaceKey, to: SpaceKey) -> Option<f64> {
        let a = self.map.space(from)?.center();
        let b = self.map.space(to)?.center();
        Some(a.distance(&b))
    }

    fn through_distance(&self, path: &[SpaceKey], next: SpaceKey) -> Option<f64> {
        let head = *path.last()?;
        if self.weighting == PortalWeighting::BestPortal && path.len() >= 2 {
            let prev = path[path.len() - 2];
            // Built on first use, so the answer never depends on precompute
            let cached = self
                .map
                .best_portals(head)
                .ok()
                .and_then(|cache| cache.get(prev, next));
            if let Some(pair) = cached {
                return Some(pair.length);
            }
        }
        self.centroid_distance(head, next)
    }
}

impl SearchStrategy for SpaceSearch<'_> {
    type Node = SpaceKey;
    type Link = PortalKey;

    fn neighbors(&self, head: SpaceKey, out: &mut Vec<(SpaceKey, PortalKey)>) {
        out.extend(
            self.map
                .neighbors(head)
                .into_iter()
                .map(|(portal, other)| (other, portal)),
        );
    }

    fn step_cost(&self, path: &[SpaceKey], next: SpaceKey, portal: &PortalKey) -> Option<f64> {
        let weight = self.policy.evaluate(self.map, *portal, next)?;
        Some(weight + self.through_distance(path, next)?)
    }

    fn is_goal(&self, head: SpaceKey) -> bool {
        match &self.target {
            SpaceTarget::Space(target) => head == *target,
            SpaceTarget::Building(name) => self
                .map
                .space(head)
                .is_some_and(|s| s.building_name() == name),
        }
    }
}

// ============================================================================
// Node level
// ============================================================================

/// Goal of a node-level search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTarget {
    /// A portal node on the `via` side of a portal that leads into
    /// `destination` and is legal under the search policy.
    PortalInto { via: SpaceKey, destination: SpaceKey },
    /// One exact node.
    Node(usize),
}

/// Node-to-node search over a navigation graph.
#[derive(Debug, Clone)]
pub struct NodeSearch<'a> {
    map: &'a CampusMap,
    graph: &'a NavGraph,
    policy: ConstraintPolicy,
    target: NodeTarget,
}

impl<'a> NodeSearch<'a> {
    pub fn new(
        map: &'a CampusMap,
        graph: &'a NavGraph,
        policy: ConstraintPolicy,
        target: NodeTarget,
    ) -> Self {
        Self {
            map,
            graph,
            policy,
            target,
        }
    }

    pub fn run(&self, seeds: impl IntoIterator<Item = usize>) -> Option<SearchPath<usize>> {
        search(self, seeds)
    }
}

impl SearchStrategy for NodeSearch<'_> {
    type Node = usize;
    type Link = f64;

    fn neighbors(&self, head: usize, out: &mut Vec<(usize, f64)>) {
        out.extend(self.graph.neighbors(head));
    }

    fn step_cost(&self, _path: &[usize], _next: usize, weight: &f64) -> Option<f64> {
        Some(*weight)
    }

    fn is_goal(&self, head: usize) -> bool {
        match self.target {
            NodeTarget::Node(target) => head == target,
            NodeTarget::PortalInto { via, destination } => {
                let Some(node) = self.graph.node(head) else {
                    return false;
                };
                let Some(pk) = node.portal else {
                    return false;
                };
                node.space == via
                    && self
                        .map
                        .portal(pk)
                        .is_some_and(|p| p.other_side(via) == Some(destination))
                    && self.policy.evaluate(self.map, pk, destination).is_some()
            }
        }
    }
}

// ============================================================================
// Single-space helpers
// ============================================================================

/// Route between two points inside one space through its room graph.
///
/// Both points snap to their nearest graph node; the result is `start`, the
/// node positions in between, then `finish`. Falls back to the straight
/// segment when the graph is empty or has no path.
pub fn intra_space_route(
    map: &CampusMap,
    space: SpaceKey,
    start: Position,
    finish: Position,
) -> Result<Vec<Position>> {
    let graph = map.room_graph(space)?;
    let (Some(from), Some(to)) = (graph.nearest_node(&start), graph.nearest_node(&finish)) else {
        return Ok(vec![start, finish]);
    };

    let policy = ConstraintPolicy::new(TravelMode::AlwaysLegal);
    let found = NodeSearch::new(map, graph, policy, NodeTarget::Node(to)).run([from]);
    let Some(found) = found else {
        return Ok(vec![start, finish]);
    };

    let mut out = Vec::with_capacity(found.nodes.len() + 2);
    out.push(start);
    out.extend(found.nodes.iter().map(|&i| graph.nodes[i].position));
    out.push(finish);
    Ok(out)
}

/// Representative point of a space: its centroid when that lies inside the
/// boundary, otherwise the interior graph node nearest to the centroid.
pub fn space_anchor(map: &CampusMap, space: SpaceKey) -> Result<Position> {
    let s = map.space_ref(space)?;
    let center = s.center();
    if s.contains(&center) {
        return Ok(center);
    }
    let graph = map.room_graph(space)?;
    Ok(graph
        .nearest_interior_node(&center)
        .or_else(|| graph.nearest_node(&center))
        .map_or(center, |i| graph.nodes[i].position))
}
