// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interior point search
//!
//! The vertex centroid of a non-convex gap can fall outside of it, and even
//! when it is inside it may sit in a sliver where no area tag fits. Instead we
//! scan the contour with horizontal and vertical lines and keep the midpoint of
//! the widest inside segment.

use crate::contour;
use crate::region::Region;
use nalgebra::Point2;
use smallvec::SmallVec;

/// Relative scan line positions within the bounding box
const SCAN_LEVELS: [f64; 9] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];

/// Fraction of the way from an edge midpoint toward the centroid
const EDGE_INSET: f64 = 0.1;

/// Scanline crossings; most gap contours cross a line only a few times
type Crossings = SmallVec<[f64; 8]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Find a point inside `contour`, preferring its widest part
///
/// When `precise` is given, a candidate must also lie inside that region. This
/// matters for donut-shaped gaps whose outer contour alone does not exclude
/// the island in the middle.
///
/// Returns `None` only for contours with fewer than 3 points. If nothing valid
/// is found the vertex centroid is returned even though it may lie outside.
pub fn find_interior_point(contour: &[Point2<f64>], precise: Option<&Region>) -> Option<Point2<f64>> {
    if contour.len() < 3 {
        return None;
    }

    let is_valid = |p: &Point2<f64>| {
        contour::point_in_contour(p, contour)
            && precise.map_or(true, |region| region.contains_point(p.x, p.y))
    };

    let centroid = contour::vertex_centroid(contour)?;
    let (min, max) = contour::contour_bounds(contour)?;

    let mut best: Option<(Point2<f64>, f64)> = None;
    let mut consider = |point: Point2<f64>, clearance: f64| {
        if best.map_or(true, |(_, c)| clearance > c) {
            best = Some((point, clearance));
        }
    };

    if is_valid(&centroid) {
        consider(centroid, estimate_clearance(&centroid, contour));
    }

    for axis in [Axis::Horizontal, Axis::Vertical] {
        for ratio in SCAN_LEVELS {
            let level = match axis {
                Axis::Horizontal => min.y + (max.y - min.y) * ratio,
                Axis::Vertical => min.x + (max.x - min.x) * ratio,
            };

            let crossings = scan_crossings(contour, axis, level);
            for pair in crossings.chunks_exact(2) {
                let width = pair[1] - pair[0];
                let mid = (pair[0] + pair[1]) / 2.0;
                let point = match axis {
                    Axis::Horizontal => Point2::new(mid, level),
                    Axis::Vertical => Point2::new(level, mid),
                };

                if is_valid(&point) {
                    consider(point, width);
                }
            }
        }
    }

    if let Some((point, _)) = best {
        return Some(point);
    }

    // Edge midpoints pulled slightly toward the centroid
    let n = contour.len();
    for i in 0..n {
        let a = &contour[i];
        let b = &contour[(i + 1) % n];
        let mid = Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        let inset = mid + (centroid - mid) * EDGE_INSET;

        if is_valid(&inset) {
            return Some(inset);
        }
    }

    Some(centroid)
}

/// Distance from a point to the nearest contour edge
pub fn estimate_clearance(point: &Point2<f64>, contour: &[Point2<f64>]) -> f64 {
    let n = contour.len();
    (0..n)
        .map(|i| contour::point_segment_distance(point, &contour[i], &contour[(i + 1) % n]))
        .fold(f64::INFINITY, f64::min)
}

/// Sorted crossings of the contour edges with a scan line
///
/// Uses the half-open rule `a <= level < b` so a vertex on the line is
/// counted once.
fn scan_crossings(contour: &[Point2<f64>], axis: Axis, level: f64) -> Crossings {
    let n = contour.len();
    let mut crossings = Crossings::new();

    for i in 0..n {
        let a = &contour[i];
        let b = &contour[(i + 1) % n];

        // (along, across): `across` is compared to the scan level
        let ((a_along, a_across), (b_along, b_across)) = match axis {
            Axis::Horizontal => ((a.x, a.y), (b.x, b.y)),
            Axis::Vertical => ((a.y, a.x), (b.y, b.x)),
        };

        let spans = (a_across <= level && level < b_across) || (b_across <= level && level < a_across);
        if spans && a_across != b_across {
            let t = (level - a_across) / (b_across - a_across);
            crossings.push(a_along + t * (b_along - a_along));
        }
    }

    crossings.sort_by(|a, b| a.total_cmp(b));
    crossings
}
