// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Navigation graphs of spaces.
//!
//! A room graph is derived from a space's floor triangulation:
//! - **Interior nodes** sit at the midpoint of every edge shared by two
//!   triangles.
//! - **Portal nodes** sit at the centroid of every portal, attached to the
//!   triangle whose nearest edge is closest to it.
//! - **Edges** join nodes attached to the same triangle, weighted by
//!   Euclidean distance. Portal nodes link to interior nodes and to other
//!   portal nodes, interior nodes to each other.
//!
//! Since every edge stays within one triangle, paths through the graph stay
//! inside the room. Room graphs are cached on their space and never mutated;
//! a route graph is a fresh copy of several room graphs plus links between
//! the two portal nodes of each doorway on the route ([`NavGraph::combine`]).

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use wayfinder_geometry::Position;

use crate::arena::CampusMap;
use crate::error::Result;
use crate::keys::{PortalKey, SpaceKey};
use crate::policy::ConstraintPolicy;

/// A node in a navigation graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NavNode {
    pub position: Position,
    /// The portal this node stands for, if it is a portal node.
    pub portal: Option<PortalKey>,
    /// The space whose triangulation produced this node.
    pub space: SpaceKey,
}

impl NavNode {
    pub fn is_portal(&self) -> bool {
        self.portal.is_some()
    }
}

/// An undirected edge between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct NavEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// Navigation graph of one space, or of a sequence of spaces.
#[derive(Debug, Clone, Default)]
pub struct NavGraph {
    pub nodes: Vec<NavNode>,
    pub edges: Vec<NavEdge>,
    /// Adjacency list: node index → list of (neighbor index, edge index).
    adjacency: Vec<Vec<(usize, usize)>>,
    /// Portal node of each (space, portal) pair.
    portal_nodes: FxHashMap<(SpaceKey, PortalKey), usize>,
}

/// Nodes attached to one triangle while building a room graph.
#[derive(Default)]
struct TriangleNodes {
    interior: SmallVec<[usize; 3]>,
    portals: SmallVec<[usize; 2]>,
}

impl NavGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the room graph of one space from its triangulation and its
    /// linked portals.
    pub fn build(map: &CampusMap, key: SpaceKey) -> Result<Self> {
        let space = map.space_ref(key)?;
        let triangles = space.triangles()?;
        let mut attached: Vec<TriangleNodes> =
            (0..triangles.len()).map(|_| TriangleNodes::default()).collect();
        let mut graph = Self::new();

        // Interior nodes at shared-edge midpoints
        for i in 0..triangles.len() {
            for j in (i + 1)..triangles.len() {
                if let Some([a, b]) = triangles[i].shared_edge(&triangles[j]) {
                    let node = graph.add_node(a.midpoint(&b), None, key);
                    attached[i].interior.push(node);
                    attached[j].interior.push(node);
                }
            }
        }

        // Portal nodes on the triangle nearest each portal centroid
        for &pk in space.portals() {
            let position = map.portal_ref(pk)?.position();
            let nearest = triangles
                .iter()
                .enumerate()
                .map(|(i, t)| (i, t.closest_edge_distance_sq(&position)))
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(i, _)| i);
            if let Some(i) = nearest {
                let node = graph.add_node(position, Some(pk), key);
                attached[i].portals.push(node);
            }
        }

        for tri in &attached {
            for (n, &a) in tri.interior.iter().enumerate() {
                for &b in &tri.interior[n + 1..] {
                    graph.connect(a, b);
                }
            }
            for (n, &p) in tri.portals.iter().enumerate() {
                for &i in &tri.interior {
                    graph.connect(p, i);
                }
                for &q in &tri.portals[n + 1..] {
                    graph.connect(p, q);
                }
            }
        }

        tracing::debug!(
            space = %space.name(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built room graph"
        );

        Ok(graph)
    }

    /// Builds the route graph for a sequence of spaces.
    ///
    /// Each space's room graph is copied, then every portal node in space
    /// `i` whose portal leads into space `i + 1` and is legal under `policy`
    /// gets an edge to the matching portal node in space `i + 1`. The two
    /// nodes of a doorway stay distinct. The cached room graphs are not
    /// touched.
    pub fn combine(map: &CampusMap, spaces: &[SpaceKey], policy: &ConstraintPolicy) -> Result<Self> {
        let mut graph = Self::new();
        for &key in spaces {
            graph.append(map.room_graph(key)?);
        }

        for pair in spaces.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let mut links: SmallVec<[(usize, usize); 4]> = SmallVec::new();
            for (&(space, pk), &node) in &graph.portal_nodes {
                if space != from {
                    continue;
                }
                let portal = map.portal_ref(pk)?;
                if portal.other_side(from) != Some(to) || policy.evaluate(map, pk, to).is_none() {
                    continue;
                }
                if let Some(&other) = graph.portal_nodes.get(&(to, pk)) {
                    links.push((node, other));
                }
            }
            // Deterministic edge order regardless of hash iteration order
            links.sort_unstable();
            for (a, b) in links {
                graph.connect(a, b);
            }
        }

        Ok(graph)
    }

    // =========================================================================
    // Graph mutation
    // =========================================================================

    /// Adds a node to the graph. Returns its index.
    pub fn add_node(&mut self, position: Position, portal: Option<PortalKey>, space: SpaceKey) -> usize {
        let idx = self.nodes.len();
        if let Some(pk) = portal {
            self.portal_nodes.insert((space, pk), idx);
        }
        self.nodes.push(NavNode {
            position,
            portal,
            space,
        });
        self.adjacency.push(Vec::new());
        idx
    }

    /// Adds an undirected edge between two nodes.
    pub fn add_edge(&mut self, source: usize, target: usize, weight: f64) -> usize {
        let idx = self.edges.len();
        self.edges.push(NavEdge {
            source,
            target,
            weight,
        });
        self.adjacency[source].push((target, idx));
        self.adjacency[target].push((source, idx));
        idx
    }

    /// Adds an edge weighted by the distance between the two nodes.
    fn connect(&mut self, a: usize, b: usize) -> usize {
        let weight = self.nodes[a].position.distance(&self.nodes[b].position);
        self.add_edge(a, b, weight)
    }

    /// Copies another graph's nodes and edges into this one.
    fn append(&mut self, other: &NavGraph) {
        let offset = self.nodes.len();
        for node in &other.nodes {
            self.add_node(node.position, node.portal, node.space);
        }
        for edge in &other.edges {
            self.add_edge(edge.source + offset, edge.target + offset, edge.weight);
        }
    }

    // =========================================================================
    // Graph accessors
    // =========================================================================

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, idx: usize) -> Option<&NavNode> {
        self.nodes.get(idx)
    }

    /// Neighbors of a node as (neighbor index, edge weight) pairs.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.adjacency
            .get(node)
            .into_iter()
            .flatten()
            .map(|&(neighbor, edge)| (neighbor, self.edges[edge].weight))
    }

    /// The node standing for `portal` on the `space` side.
    pub fn portal_node(&self, space: SpaceKey, portal: PortalKey) -> Option<usize> {
        self.portal_nodes.get(&(space, portal)).copied()
    }

    /// Indices of every portal node produced by `space`, in insertion order.
    pub fn portal_nodes_in(&self, space: SpaceKey) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&i| self.nodes[i].space == space && self.nodes[i].is_portal())
            .collect()
    }

    /// Node closest to `position`.
    pub fn nearest_node(&self, position: &Position) -> Option<usize> {
        self.nearest_by(position, |_| true)
    }

    /// Portal node closest to `position`.
    pub fn nearest_portal_node(&self, position: &Position) -> Option<usize> {
        self.nearest_by(position, NavNode::is_portal)
    }

    /// Interior (non-portal) node closest to `position`.
    pub fn nearest_interior_node(&self, position: &Position) -> Option<usize> {
        self.nearest_by(position, |n| !n.is_portal())
    }

    fn nearest_by(&self, position: &Position, filter: impl Fn(&NavNode) -> bool) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|&(_, n)| filter(n))
            .map(|(i, n)| (i, n.position.distance(position)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    // =========================================================================
    // Connected components
    // =========================================================================

    /// Component label per node; labels run from 0 in order of each
    /// component's lowest node index.
    pub fn component_labels(&self) -> Vec<usize> {
        const UNSEEN: usize = usize::MAX;
        let mut labels = vec![UNSEEN; self.node_count()];
        let mut next_label = 0;
        let mut stack = Vec::new();

        for root in 0..labels.len() {
            if labels[root] != UNSEEN {
                continue;
            }
            labels[root] = next_label;
            stack.push(root);
            while let Some(node) = stack.pop() {
                for (other, _) in self.neighbors(node) {
                    if labels[other] == UNSEEN {
                        labels[other] = next_label;
                        stack.push(other);
                    }
                }
            }
            next_label += 1;
        }
        labels
    }

    /// True when every node reaches every other (trivially so when empty).
    pub fn is_connected(&self) -> bool {
        self.component_labels().iter().all(|&l| l == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::MapBuilder;
    use crate::fixtures::{campus, door, room};
    use crate::policy::TravelMode;
    use crate::portal::PortalKind;
    use crate::space::{SpaceRecord, SpaceType};
    use approx::assert_relative_eq;
    use wayfinder_geometry::Polyline;

    #[test]
    fn convex_room_with_one_portal_is_connected() {
        let map = campus();
        let x2 = map.resolve_space("X-2").unwrap();
        let graph = map.room_graph(x2).unwrap();

        assert_eq!(graph.portal_nodes_in(x2).len(), 1);
        assert!(graph.is_connected());
        // Square: one diagonal midpoint plus the door
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn l_shaped_room_graph_is_connected() {
        let mut builder = MapBuilder::new();
        builder
            .add_space(SpaceRecord::new(
                "L-1",
                SpaceType::Other("CORR".into()),
                Polyline::from_xy(
                    &[(0.0, 0.0), (6.0, 0.0), (6.0, 2.0), (2.0, 2.0), (2.0, 6.0), (0.0, 6.0)],
                    0.0,
                ),
            ))
            .unwrap();
        builder.add_space(room("L-2", 6.0, 0.0)).unwrap();
        builder.add_space(room("L-3", 0.0, 6.0)).unwrap();
        builder.add_portal(door("d1", PortalKind::Door, "L-1", "L-2", (6.0, 0.5), (6.0, 1.5)));
        builder.add_portal(door("d2", PortalKind::Door, "L-1", "L-3", (0.5, 6.0), (1.5, 6.0)));
        let (map, _) = builder.finish();

        let l1 = map.resolve_space("L-1").unwrap();
        let graph = map.room_graph(l1).unwrap();
        assert_eq!(graph.portal_nodes_in(l1).len(), 2);
        assert!(graph.is_connected());
        for node in &graph.nodes {
            assert!(map.space(l1).unwrap().contains(&node.position) || node.is_portal());
        }
    }

    #[test]
    fn portal_node_sits_at_contour_centroid() {
        let map = campus();
        let x1 = map.resolve_space("X-1").unwrap();
        let graph = map.room_graph(x1).unwrap();
        let exit = map
            .portals()
            .find(|(_, p)| p.name() == "exit-X")
            .map(|(k, _)| k)
            .unwrap();

        let node = graph.portal_node(x1, exit).unwrap();
        assert_eq!(graph.nodes[node].position, Position::new(4.0, 2.0, 0.0));
        assert_eq!(graph.nearest_portal_node(&Position::new(3.9, 2.1, 0.0)), Some(node));
    }

    #[test]
    fn combine_copies_and_links_doorways() {
        let map = campus();
        let x1 = map.resolve_space("X-1").unwrap();
        let walk = map.resolve_space("BMAP-walk").unwrap();
        let policy = ConstraintPolicy::new(TravelMode::Walking);

        let before = map.room_graph(x1).unwrap().edge_count();
        let combined = NavGraph::combine(&map, &[x1, walk], &policy).unwrap();
        let expected_nodes =
            map.room_graph(x1).unwrap().node_count() + map.room_graph(walk).unwrap().node_count();

        assert_eq!(combined.node_count(), expected_nodes);
        assert!(combined.is_connected());
        assert_eq!(map.room_graph(x1).unwrap().edge_count(), before);

        // The doorway keeps two nodes joined by a zero-length edge
        let exit = map
            .portals()
            .find(|(_, p)| p.name() == "exit-X")
            .map(|(k, _)| k)
            .unwrap();
        let a = combined.portal_node(x1, exit).unwrap();
        let b = combined.portal_node(walk, exit).unwrap();
        assert_ne!(a, b);
        let link = combined.neighbors(a).find(|&(n, _)| n == b).unwrap();
        assert_relative_eq!(link.1, 0.0);
    }

    #[test]
    fn combine_skips_illegal_doorways() {
        let map = campus();
        let walk = map.resolve_space("BMAP-walk").unwrap();
        let lawn = map.resolve_space("BMAP-lawn").unwrap();
        let rolling = ConstraintPolicy::new(TravelMode::Rolling);

        let combined = NavGraph::combine(&map, &[walk, lawn], &rolling).unwrap();
        assert!(!combined.is_connected());
    }
}
