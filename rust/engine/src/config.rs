// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Engine configuration loaded from environment variables.

use serde::Deserialize;
use wayfinder_topology::{PortalWeighting, TravelMode};

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Memoize successful routes by request key.
    pub cache_routes: bool,
    /// Distance measure for space-level search steps.
    pub weighting: PortalWeighting,
    /// Run the precomputation pass across spaces in parallel.
    pub parallel_precompute: bool,
    /// Build best-portal caches during precomputation.
    pub precompute_best_portals: bool,
    /// Travel mode applied to every query, overriding the requested one.
    pub forced_mode: Option<TravelMode>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_routes: true,
            weighting: PortalWeighting::Centroid,
            parallel_precompute: true,
            precompute_best_portals: true,
            forced_mode: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            cache_routes: lookup("WAYFINDER_CACHE_ROUTES")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.cache_routes),
            weighting: lookup("WAYFINDER_WEIGHTING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.weighting),
            parallel_precompute: lookup("WAYFINDER_PARALLEL_PRECOMPUTE")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.parallel_precompute),
            precompute_best_portals: lookup("WAYFINDER_PRECOMPUTE_BEST_PORTALS")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.precompute_best_portals),
            forced_mode: lookup("WAYFINDER_FORCED_MODE")
                .and_then(|v| v.parse().ok())
                .or(defaults.forced_mode),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
