// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The routing engine: an immutable campus map plus a route cache.
//!
//! A query runs in two stages. The space-level search finds the cheapest
//! legal sequence of spaces; the room graphs along that sequence are copied
//! into one route graph, and a node-level search through it picks the actual
//! doorways. The node path is then simplified into a polyline.
//!
//! Room graphs and best-portal caches are built once per space (eagerly by
//! [`RoutingEngine::precompute`] or lazily on first use) and are read-only
//! afterwards, so queries can run concurrently on a shared engine.

use std::sync::{Arc, RwLock};

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use wayfinder_topology::{
    BestPortalCache, Building, CampusMap, ConstraintPolicy, NavGraph, NodeSearch, NodeTarget,
    Portal, SpaceKey, SpaceSearch, SpaceTarget, TravelMode, ROOM_SEPARATOR,
};

use crate::assemble::{assemble, single_space, Assembled};
use crate::config::EngineConfig;
use crate::error::{Result, RouteError, SearchStage};
use crate::route::{Route, RouteRequest};

/// A resolved source or destination token.
#[derive(Debug, Clone, Copy)]
enum Endpoint<'a> {
    Space(SpaceKey),
    Building(&'a Building),
}

impl Endpoint<'_> {
    fn seeds(&self) -> Vec<SpaceKey> {
        match self {
            Endpoint::Space(key) => vec![*key],
            Endpoint::Building(b) => b.transition_spaces().to_vec(),
        }
    }

    fn target(&self) -> SpaceTarget {
        match self {
            Endpoint::Space(key) => SpaceTarget::Space(*key),
            Endpoint::Building(b) => SpaceTarget::Building(b.name().to_string()),
        }
    }
}

/// Outcome of the precomputation pass.
#[derive(Debug, Default)]
pub struct PrecomputeReport {
    pub graphs_built: usize,
    pub best_portal_caches: usize,
    /// Spaces whose precomputation failed, with the error.
    pub failures: Vec<(String, wayfinder_topology::Error)>,
}

/// Routing engine context.
#[derive(Debug)]
pub struct RoutingEngine {
    map: Arc<CampusMap>,
    config: EngineConfig,
    cache: RwLock<FxHashMap<String, Route>>,
}

impl RoutingEngine {
    pub fn new(map: CampusMap, config: EngineConfig) -> Self {
        Self::with_shared_map(Arc::new(map), config)
    }

    pub fn with_shared_map(map: Arc<CampusMap>, config: EngineConfig) -> Self {
        Self {
            map,
            config,
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn map(&self) -> &CampusMap {
        &self.map
    }

    pub fn shared_map(&self) -> Arc<CampusMap> {
        Arc::clone(&self.map)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // =========================================================================
    // Precomputation
    // =========================================================================

    /// Room graph of the named space, built on first use.
    pub fn build_room_graph(&self, space: &str) -> Result<&NavGraph> {
        let key = self.space_key(space)?;
        Ok(self.map.room_graph(key)?)
    }

    /// Best-portal cache of the named space, built on first use.
    pub fn precompute_best_portals(&self, space: &str) -> Result<&BestPortalCache> {
        let key = self.space_key(space)?;
        Ok(self.map.best_portals(key)?)
    }

    /// Best `(entry, exit)` portals through `space` between two of its
    /// neighbours; `None` if either is not adjacent to it.
    pub fn lookup_best_portals(
        &self,
        space: &str,
        neighbor_a: &str,
        neighbor_b: &str,
    ) -> Result<Option<(&Portal, &Portal)>> {
        let key = self.space_key(space)?;
        let a = self.space_key(neighbor_a)?;
        let b = self.space_key(neighbor_b)?;
        let pair = self.map.best_portals(key)?.lookup(a, b);
        Ok(pair.and_then(|(entry, exit)| Some((self.map.portal(entry)?, self.map.portal(exit)?))))
    }

    /// Builds every room graph and, if configured, every best-portal cache.
    ///
    /// A failing space is logged and reported; the rest still get built.
    pub fn precompute(&self) -> PrecomputeReport {
        let keys = self.map.space_keys();
        let with_best_portals = self.config.precompute_best_portals;

        // Room graphs first: best-portal caches route through them
        let graph_results: Vec<_> = if self.config.parallel_precompute {
            keys.par_iter()
                .map(|&k| (k, self.map.room_graph(k).map(|_| ())))
                .collect()
        } else {
            keys.iter()
                .map(|&k| (k, self.map.room_graph(k).map(|_| ())))
                .collect()
        };

        let mut report = PrecomputeReport::default();
        let mut ok_keys = Vec::with_capacity(keys.len());
        for (key, result) in graph_results {
            match result {
                Ok(()) => {
                    report.graphs_built += 1;
                    ok_keys.push(key);
                }
                Err(err) => self.record_failure(&mut report, key, err),
            }
        }

        if with_best_portals {
            let cache_results: Vec<_> = if self.config.parallel_precompute {
                ok_keys
                    .par_iter()
                    .map(|&k| (k, self.map.best_portals(k).map(|_| ())))
                    .collect()
            } else {
                ok_keys
                    .iter()
                    .map(|&k| (k, self.map.best_portals(k).map(|_| ())))
                    .collect()
            };
            for (key, result) in cache_results {
                match result {
                    Ok(()) => report.best_portal_caches += 1,
                    Err(err) => self.record_failure(&mut report, key, err),
                }
            }
        }

        tracing::info!(
            graphs = report.graphs_built,
            best_portal_caches = report.best_portal_caches,
            failures = report.failures.len(),
            parallel = self.config.parallel_precompute,
            "Precomputation complete"
        );

        report
    }

    fn record_failure(
        &self,
        report: &mut PrecomputeReport,
        key: SpaceKey,
        err: wayfinder_topology::Error,
    ) {
        let name = self.map.space_name(key).to_string();
        tracing::warn!(space = %name, error = %err, "Precomputation failed");
        report.failures.push((name, err));
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Finds a route between two space or building tokens.
    ///
    /// A token that names a loaded space is that space. Otherwise a token
    /// containing the room separator is an unknown space, and any other token
    /// names a building, whose transition spaces seed or end the search.
    pub fn find_route(&self, source: &str, destination: &str, mode: TravelMode) -> Result<Route> {
        self.route(&RouteRequest::new(source, destination, mode))
    }

    /// Answers a request, consulting the route cache first.
    pub fn route(&self, request: &RouteRequest) -> Result<Route> {
        let mut request = request.clone();
        if let Some(mode) = self.config.forced_mode {
            request.mode = mode;
        }
        let key = request.cache_key();

        if self.config.cache_routes {
            if let Some(hit) = self.cached(&key) {
                tracing::debug!(key = %key, "Route cache hit");
                return Ok(hit);
            }
        }

        let assembled = self.resolve(&request)?;
        let route = Route {
            request,
            spaces: assembled.spaces,
            portals: assembled.portals,
            polyline: assembled.polyline,
        };

        if self.config.cache_routes {
            if let Ok(mut cache) = self.cache.write() {
                cache.insert(key, route.clone());
            }
        }
        Ok(route)
    }

    /// Number of memoized routes.
    pub fn cached_routes(&self) -> usize {
        self.cache.read().map_or(0, |c| c.len())
    }

    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    fn cached(&self, key: &str) -> Option<Route> {
        self.cache.read().ok()?.get(key).cloned()
    }

    fn resolve(&self, request: &RouteRequest) -> Result<Assembled> {
        let map = self.map.as_ref();
        let source = self.endpoint(&request.source)?;
        let destination = self.endpoint(&request.destination)?;
        let policy = ConstraintPolicy::new(request.mode);
        let no_route = |stage| RouteError::NoRouteFound {
            from: request.source.clone(),
            to: request.destination.clone(),
            stage,
        };

        let sequence = SpaceSearch::new(map, policy, destination.target())
            .with_weighting(self.config.weighting)
            .run(source.seeds())
            .ok_or_else(|| no_route(SearchStage::SpaceLevel))?
            .nodes;
        tracing::debug!(
            source = %request.source,
            destination = %request.destination,
            mode = %request.mode,
            spaces = sequence.len(),
            "Space sequence found"
        );

        let n = sequence.len();
        match n {
            0 => return Err(no_route(SearchStage::SpaceLevel)),
            1 => return Ok(single_space(map, sequence[0])?),
            _ => {}
        }
        let (first, via, goal) = (sequence[0], sequence[n - 2], sequence[n - 1]);

        let graph = NavGraph::combine(map, &sequence, &policy)?;
        let seeds = graph.portal_nodes_in(first);
        let target = NodeTarget::PortalInto {
            via,
            destination: goal,
        };
        let path = NodeSearch::new(map, &graph, policy, target)
            .run(seeds)
            .ok_or_else(|| no_route(SearchStage::NodeLevel))?;
        tracing::debug!(
            nodes = path.nodes.len(),
            graph_nodes = graph.node_count(),
            cost = path.cost,
            "Node path found"
        );

        Ok(assemble(map, &graph, goal, &path.nodes)?)
    }

    fn endpoint(&self, token: &str) -> Result<Endpoint<'_>> {
        if let Some(key) = self.map.space_key(token) {
            return Ok(Endpoint::Space(key));
        }
        if token.contains(ROOM_SEPARATOR) {
            return Err(RouteError::UnknownSpace(token.to_string()));
        }
        self.map
            .building(token)
            .map(Endpoint::Building)
            .ok_or_else(|| RouteError::UnknownBuilding(token.to_string()))
    }

    fn space_key(&self, name: &str) -> Result<SpaceKey> {
        self.map
            .space_key(name)
            .ok_or_else(|| RouteError::UnknownSpace(name.to_string()))
    }
}
