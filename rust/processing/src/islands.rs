// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! "Islands only" mode: gaps inside donut-shaped areas.

use crate::config::GapConfig;
use crate::gaps::find_enclosed_gaps;
use crate::types::{AreaBoundary, GapRecord};
use areafill_geometry::contour::point_in_contour;
use rayon::prelude::*;

/// Find gaps inside every donut area, taking into account the areas placed
/// within it.
///
/// An area belongs to a donut when its location lies inside the donut's
/// exterior loop. Donuts are processed in parallel; records are returned
/// grouped by donut in input order.
pub fn find_island_gaps(areas: &[AreaBoundary], config: &GapConfig) -> Vec<GapRecord> {
    let donuts: Vec<usize> = (0..areas.len()).filter(|&i| areas[i].is_donut()).collect();

    tracing::debug!(
        area_count = areas.len(),
        donut_count = donuts.len(),
        "Searching donut areas"
    );

    let records = donuts
        .par_iter()
        .map(|&index| {
            let group = donut_group(areas, index);
            tracing::debug!(
                donut = index,
                contained = group.len() - 1,
                "Collected areas inside donut"
            );
            find_enclosed_gaps(&group, config)
        })
        .collect::<Vec<_>>()
        .concat();

    tracing::info!(
        donut_count = donuts.len(),
        gap_count = records.len(),
        "Island gap detection complete"
    );

    records
}

/// The donut at `index` followed by every other area located inside it
fn donut_group(areas: &[AreaBoundary], index: usize) -> Vec<AreaBoundary> {
    let donut = &areas[index];
    let mut group = vec![donut.clone()];

    let Some(exterior) = donut.exterior() else {
        return group;
    };

    group.extend(
        areas
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .filter(|(_, area)| {
                area.location()
                    .is_some_and(|p| point_in_contour(&p, exterior))
            })
            .map(|(_, area)| area.clone()),
    );

    group
}
