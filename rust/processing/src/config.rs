// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gap detection configuration.

use areafill_geometry::SplitOptions;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Thresholds and switches for one gap detection call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapConfig {
    /// Padding added around the union bounding box.
    pub margin: f64,
    /// Gaps below this area are treated as numerical noise.
    pub small_area_threshold: f64,
    /// Gaps above this area are treated as leftover margin.
    pub large_area_ceiling: f64,
    /// Vertex-to-edge distance that marks a corridor as a bottleneck.
    pub bottleneck_threshold: f64,
    /// Smallest piece kept when splitting at a bottleneck.
    pub min_region_area: f64,
    /// Recursion limit for bottleneck splitting.
    pub max_split_depth: usize,
    /// Split gap contours at bottlenecks before seeding.
    pub split_bottlenecks: bool,
    /// Inner loops of an area smaller than this are not treated as holes.
    pub hole_area_threshold: f64,
    /// Wall-clock budget for the subtraction loop, in milliseconds.
    pub time_budget_ms: Option<u64>,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            margin: 1.0,
            small_area_threshold: 0.5,
            large_area_ceiling: 10000.0,
            bottleneck_threshold: 0.5,
            min_region_area: 1.0,
            max_split_depth: 10,
            split_bottlenecks: false,
            hole_area_threshold: 0.5,
            time_budget_ms: None,
        }
    }
}

impl GapConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            margin: env_or("AREAFILL_MARGIN", defaults.margin),
            small_area_threshold: env_or(
                "AREAFILL_SMALL_AREA_THRESHOLD",
                defaults.small_area_threshold,
            ),
            large_area_ceiling: env_or("AREAFILL_LARGE_AREA_CEILING", defaults.large_area_ceiling),
            bottleneck_threshold: env_or(
                "AREAFILL_BOTTLENECK_THRESHOLD",
                defaults.bottleneck_threshold,
            ),
            min_region_area: env_or("AREAFILL_MIN_REGION_AREA", defaults.min_region_area),
            max_split_depth: env_or("AREAFILL_MAX_SPLIT_DEPTH", defaults.max_split_depth),
            split_bottlenecks: env_or("AREAFILL_SPLIT_BOTTLENECKS", defaults.split_bottlenecks),
            hole_area_threshold: env_or(
                "AREAFILL_HOLE_AREA_THRESHOLD",
                defaults.hole_area_threshold,
            ),
            time_budget_ms: std::env::var("AREAFILL_TIME_BUDGET_MS")
                .ok()
                .and_then(|v| v.trim().parse().ok()),
        }
    }

    /// Bottleneck splitter settings derived from this config.
    pub fn split_options(&self) -> SplitOptions {
        SplitOptions {
            bottleneck_threshold: self.bottleneck_threshold,
            min_region_area: self.min_region_area,
            max_depth: self.max_split_depth,
        }
    }

    /// Subtraction time budget, if any.
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    /// Whether `area` passes the noise and margin filters.
    pub fn accepts_area(&self, area: f64) -> bool {
        area >= self.small_area_threshold && area <= self.large_area_ceiling
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
