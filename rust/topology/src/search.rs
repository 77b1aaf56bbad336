// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generic label-setting shortest-path search.
//!
//! One search loop serves both granularities of routing. A
//! [`SearchStrategy`] supplies the neighbour enumeration, the step cost and
//! the goal predicate; the loop owns the frontier.
//!
//! Each frontier entry stores its whole path instead of a predecessor
//! pointer. A head is *finalized* the first time it is popped; later entries
//! ending in a finalized head are dropped without expansion, and a path never
//! visits the same node twice. Entries of equal cost pop in insertion order.
//! Step costs must be non-negative.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Neighbour enumeration, edge weighting and goal test for one search.
pub trait SearchStrategy {
    /// Node type searched over (space keys, graph node indices).
    type Node: Copy + Eq + Hash;
    /// Payload of the link to a neighbour (a portal, an edge weight).
    type Link;

    /// Appends the neighbours of `head` and the link used to reach each.
    fn neighbors(&self, head: Self::Node, out: &mut Vec<(Self::Node, Self::Link)>);

    /// Cost of extending `path` to `next` over `link`, or `None` if the step
    /// is not allowed.
    fn step_cost(&self, path: &[Self::Node], next: Self::Node, link: &Self::Link) -> Option<f64>;

    /// Whether the path ending in `head` is a solution.
    fn is_goal(&self, head: Self::Node) -> bool;
}

/// A solution path and its cumulative cost.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPath<N> {
    pub nodes: Vec<N>,
    pub cost: f64,
}

impl<N: Copy> SearchPath<N> {
    pub fn head(&self) -> Option<N> {
        self.nodes.last().copied()
    }
}

/// A partial path in the frontier.
struct SearchState<N> {
    cost: f64,
    seq: u64,
    path: Vec<N>,
}

impl<N> PartialEq for SearchState<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for SearchState<N> {}

impl<N> PartialOrd for SearchState<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for SearchState<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap; earlier insertion wins ties
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Runs the search from every seed (cost zero, in the given order).
///
/// Returns `None` when the frontier empties before a goal head is popped.
pub fn search<S: SearchStrategy>(
    strategy: &S,
    seeds: impl IntoIterator<Item = S::Node>,
) -> Option<SearchPath<S::Node>> {
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;
    for seed in seeds {
        heap.push(SearchState {
            cost: 0.0,
            seq,
            path: vec![seed],
        });
        seq += 1;
    }

    let mut finalized: FxHashSet<S::Node> = FxHashSet::default();
    let mut neighbors = Vec::new();

    while let Some(SearchState { cost, path, .. }) = heap.pop() {
        let Some(&head) = path.last() else {
            continue;
        };
        if !finalized.insert(head) {
            continue;
        }
        if strategy.is_goal(head) {
            return Some(SearchPath { nodes: path, cost });
        }

        neighbors.clear();
        strategy.neighbors(head, &mut neighbors);
        for (next, link) in neighbors.drain(..) {
            if finalized.contains(&next) || path.contains(&next) {
                continue;
            }
            let Some(step) = strategy.step_cost(&path, next, &link) else {
                continue;
            };
            let mut extended = Vec::with_capacity(path.len() + 1);
            extended.extend_from_slice(&path);
            extended.push(next);
            heap.push(SearchState {
                cost: cost + step,
                seq,
                path: extended,
            });
            seq += 1;
        }
    }

    None
}
