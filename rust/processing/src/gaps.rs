// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gap region extraction
//!
//! Gaps are found by subtracting every area from a rectangle slightly larger
//! than their combined bounds. What remains is the outer margin plus the
//! uncovered pockets between areas. The margin is the largest remaining piece
//! and is dropped; the pockets are filtered by size, optionally split at
//! narrow corridors, and given a representative point.
//!
//! [`find_enclosed_gaps`] is the union-based variant: it unions the areas and
//! reports the holes of the union, using the exact uncovered region to place
//! the point so islands inside a hole are avoided.

use crate::config::GapConfig;
use crate::types::{AreaBoundary, GapRecord};
use areafill_geometry::contour;
use areafill_geometry::{find_interior_point, split_at_bottlenecks, Contour, Region};
use std::time::{Duration, Instant};

/// Find uncovered regions between simple area boundaries.
///
/// Boundaries that do not form a valid polygon are skipped. Records are
/// sorted by area, largest first. Never fails: geometry errors are logged and
/// yield fewer records.
pub fn find_gap_regions(boundaries: &[Contour], config: &GapConfig) -> Vec<GapRecord> {
    let regions: Vec<Region> = boundaries
        .iter()
        .enumerate()
        .filter_map(|(index, points)| match Region::try_from_points(points) {
            Ok(region) if !region.is_empty() => Some(region),
            Ok(_) => {
                tracing::debug!(index = index, "Skipping empty boundary");
                None
            }
            Err(err) => {
                tracing::debug!(index = index, error = %err, "Skipping invalid boundary");
                None
            }
        })
        .collect();

    tracing::debug!(
        boundary_count = boundaries.len(),
        valid_regions = regions.len(),
        "Converted boundaries"
    );

    extract_gaps(&regions, config)
}

/// Like [`find_gap_regions`], for areas that may have inner loops.
///
/// A donut's inner loop is subtracted as a hole of its area, so the space it
/// encloses is reported as a gap unless other areas cover it.
pub fn find_gap_regions_in_areas(areas: &[AreaBoundary], config: &GapConfig) -> Vec<GapRecord> {
    let regions = area_regions(areas, config);
    tracing::debug!(area_count = areas.len(), valid_regions = regions.len(), "Converted areas");
    extract_gaps(&regions, config)
}

/// Find the holes in the union of all areas.
///
/// Each hole of the union is a candidate; the outlines of disjoint clusters
/// are not. A record's area is that of the uncovered part of its hole, so
/// islands sitting inside a hole reduce it and the point avoids them.
pub fn find_enclosed_gaps(areas: &[AreaBoundary], config: &GapConfig) -> Vec<GapRecord> {
    let regions = area_regions(areas, config);
    if regions.is_empty() {
        return Vec::new();
    }

    let mut union = Region::empty();
    for (index, region) in regions.iter().enumerate() {
        match union.try_union(region) {
            Ok(next) => union = next,
            Err(err) => {
                tracing::warn!(index = index, error = %err, "Union failed, using partial union");
                break;
            }
        }
    }

    let candidates = union.hole_contours(config.small_area_threshold);
    tracing::debug!(candidates = candidates.len(), "Collected union holes");

    let mut records = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let precise = match Region::from_points(&candidate).try_difference(&union) {
            Ok(region) => region,
            Err(err) => {
                tracing::warn!(error = %err, "Skipping candidate, difference failed");
                continue;
            }
        };

        let area = precise.area();
        if !config.accepts_area(area) {
            continue;
        }

        if let Some(point) = find_interior_point(&candidate, Some(&precise)) {
            records.push(GapRecord::new(candidate, point, area));
        }
    }

    sort_by_area(&mut records);
    tracing::info!(
        area_count = areas.len(),
        gap_count = records.len(),
        "Enclosed gap detection complete"
    );
    records
}

fn area_regions(areas: &[AreaBoundary], config: &GapConfig) -> Vec<Region> {
    areas
        .iter()
        .map(|area| area.to_region(config.hole_area_threshold))
        .filter(|region| !region.is_empty())
        .collect()
}

/// Subtract `regions` from their padded bounding rectangle and turn the
/// remaining pockets into records.
pub(crate) fn extract_gaps(regions: &[Region], config: &GapConfig) -> Vec<GapRecord> {
    let Some(bounds) = regions
        .iter()
        .filter_map(Region::bounds)
        .reduce(|a, b| a.merge(&b))
    else {
        return Vec::new();
    };

    let frame = bounds.expand(config.margin);
    let frame = Region::rectangle(frame.min_x, frame.min_y, frame.max_x, frame.max_y);

    let started = Instant::now();
    let Some(result) = subtract_in_order(frame, regions, started, config.time_budget()) else {
        return Vec::new();
    };

    let mut candidates: Vec<(f64, Contour)> = result
        .outer_contours()
        .into_iter()
        .map(|c| (contour::area(&c), c))
        .collect();

    tracing::debug!(raw_contours = candidates.len(), "Subtraction complete");

    // The largest piece is the margin around everything
    if let Some(margin) = candidates
        .iter()
        .enumerate()
        .max_by(|a, b| a.1 .0.total_cmp(&b.1 .0))
        .map(|(i, _)| i)
    {
        candidates.swap_remove(margin);
    }

    let mut gaps: Vec<Contour> = candidates
        .into_iter()
        .filter(|(area, _)| config.accepts_area(*area))
        .map(|(_, c)| c)
        .collect();

    if config.split_bottlenecks {
        let options = config.split_options();
        gaps = gaps
            .iter()
            .flat_map(|c| split_at_bottlenecks(c, &options))
            .filter(|piece| config.accepts_area(contour::area(piece)))
            .collect();
    }

    let mut records: Vec<GapRecord> = gaps
        .into_iter()
        .filter_map(|c| {
            let point = find_interior_point(&c, None)?;
            let area = contour::area(&c);
            Some(GapRecord::new(c, point, area))
        })
        .collect();

    sort_by_area(&mut records);

    tracing::info!(
        region_count = regions.len(),
        gap_count = records.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Gap detection complete"
    );

    records
}

/// Subtract `regions` from `frame` one at a time, in order
///
/// A failed subtraction or an exhausted budget stops the loop and keeps what
/// was derived so far. Returns `None` when not even the first subtraction
/// happened.
fn subtract_in_order(
    frame: Region,
    regions: &[Region],
    started: Instant,
    budget: Option<Duration>,
) -> Option<Region> {
    let mut result = frame;

    for (index, region) in regions.iter().enumerate() {
        if budget.is_some_and(|b| started.elapsed() > b) {
            tracing::warn!(
                processed = index,
                total = regions.len(),
                "Time budget exceeded, stopping subtraction"
            );
            if index == 0 {
                return None;
            }
            break;
        }

        match result.try_difference(region) {
            Ok(next) => result = next,
            Err(err) => {
                tracing::warn!(index = index, error = %err, "Subtraction failed");
                if index == 0 {
                    return None;
                }
                break;
            }
        }

        if result.is_empty() {
            tracing::debug!(index = index, "Bounding frame fully covered");
            break;
        }
    }

    Some(result)
}

/// Largest first; equal areas keep their order
fn sort_by_area(records: &mut [GapRecord]) {
    records.sort_by(|a, b| b.area.total_cmp(&a.area));
}
