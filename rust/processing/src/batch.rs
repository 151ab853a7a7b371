// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parallel gap detection over independent plans.

use crate::config::GapConfig;
use crate::gaps::find_gap_regions;
use crate::types::GapRecord;
use areafill_geometry::Contour;
use rayon::prelude::*;

/// Run [`find_gap_regions`] once per plan. Output order matches `plans`.
pub fn find_gap_regions_batch(plans: &[Vec<Contour>], config: &GapConfig) -> Vec<Vec<GapRecord>> {
    let start = std::time::Instant::now();

    let results: Vec<Vec<GapRecord>> = plans
        .par_iter()
        .map(|boundaries| find_gap_regions(boundaries, config))
        .collect();

    tracing::info!(
        plan_count = plans.len(),
        gap_count = results.iter().map(Vec::len).sum::<usize>(),
        total_time_ms = start.elapsed().as_millis() as u64,
        "Batch gap detection complete"
    );

    results
}
