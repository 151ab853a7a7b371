// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bottleneck splitting
//!
//! A gap contour sometimes describes two wide rooms joined by a hairline
//! corridor that no area could occupy. This module finds the places where the
//! boundary nearly touches itself and cuts the ring there, recursively, so each
//! wide part can be seeded on its own.
//!
//! The pair selection is a heuristic: zones of narrow vertices that sit about
//! half a ring apart are taken as the two walls of the same corridor.

use crate::contour::{self, Contour};
use nalgebra::Point2;

/// Edges within this many indices of a vertex are never tested against it
const ADJACENT_EDGE_SKIP: usize = 3;

/// Contours with fewer vertices cannot have a non-adjacent edge
const MIN_SPLIT_VERTICES: usize = 6;

/// Tuning for [`split_at_bottlenecks`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitOptions {
    /// Vertex-to-edge distance below which a vertex is narrow
    pub bottleneck_threshold: f64,
    /// Pieces smaller than this are discarded
    pub min_region_area: f64,
    /// Recursion limit
    pub max_depth: usize,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            bottleneck_threshold: 0.5,
            min_region_area: 1.0,
            max_depth: 10,
        }
    }
}

/// Indices of vertices closer than `threshold` to a non-adjacent edge
pub fn find_bottleneck_points(contour: &[Point2<f64>], threshold: f64) -> Vec<usize> {
    let n = contour.len();
    if n < MIN_SPLIT_VERTICES {
        return Vec::new();
    }

    (0..n)
        .filter(|&i| {
            let p = &contour[i];
            (0..n)
                .filter(|&j| ring_distance(i, j, n) > ADJACENT_EDGE_SKIP)
                .any(|j| {
                    contour::point_segment_distance(p, &contour[j], &contour[(j + 1) % n])
                        < threshold
                })
        })
        .collect()
}

/// Split a contour at narrow corridors
///
/// Returns the original contour as the only element when no valid split
/// exists.
pub fn split_at_bottlenecks(contour: &[Point2<f64>], options: &SplitOptions) -> Vec<Contour> {
    split_recursive(contour, options, 0)
}

fn split_recursive(contour: &[Point2<f64>], options: &SplitOptions, depth: usize) -> Vec<Contour> {
    let n = contour.len();
    if n < MIN_SPLIT_VERTICES || depth > options.max_depth {
        return vec![contour.to_vec()];
    }

    let narrow = find_bottleneck_points(contour, options.bottleneck_threshold);
    let zones = group_zones(&narrow, n);
    if zones.len() < 2 {
        return vec![contour.to_vec()];
    }

    let Some((first, second)) = best_zone_pair(&zones, n) else {
        return vec![contour.to_vec()];
    };

    // Order the pair by ring position so the arcs come out in a stable order
    let (zone_a, zone_b) = if first[0] > second[0] {
        (second, first)
    } else {
        (first, second)
    };

    let arcs = [
        ring_walk(zone_end(zone_a), zone_b[0], n),
        ring_walk(zone_end(zone_b), zone_a[0], n),
    ];

    let mut result = Vec::new();
    for arc in arcs {
        let piece: Contour = arc.into_iter().map(|i| contour[i]).collect();
        if piece.len() < 3 || contour::area(&piece) < options.min_region_area {
            continue;
        }
        result.extend(split_recursive(&piece, options, depth + 1));
    }

    if result.is_empty() {
        vec![contour.to_vec()]
    } else {
        result
    }
}

/// Group sorted narrow indices into runs of ring-adjacent vertices
///
/// A run ending at `n - 1` continues into a run starting at `0`.
fn group_zones(indices: &[usize], n: usize) -> Vec<Vec<usize>> {
    let mut zones: Vec<Vec<usize>> = Vec::new();

    for &idx in indices {
        match zones.last_mut() {
            Some(zone) if zone_end(zone) + 1 == idx => zone.push(idx),
            _ => zones.push(vec![idx]),
        }
    }

    if zones.len() >= 2 {
        let wraps = zones[0][0] == 0 && zone_end(&zones[zones.len() - 1]) == n - 1;
        if wraps {
            if let Some(mut tail) = zones.pop() {
                tail.extend_from_slice(&zones[0]);
                zones[0] = tail;
            }
        }
    }

    zones
}

/// Pick the zone pair most likely to be opposite walls of one corridor
///
/// Ties keep the first pair in iteration order.
fn best_zone_pair<'a>(zones: &'a [Vec<usize>], n: usize) -> Option<(&'a [usize], &'a [usize])> {
    let half = n as f64 / 2.0;
    let mut best: Option<(&[usize], &[usize])> = None;
    let mut best_score = -1.0;

    for i in 0..zones.len() {
        for j in (i + 1)..zones.len() {
            let mid_i = zone_midpoint(&zones[i], n);
            let mid_j = zone_midpoint(&zones[j], n);

            let mut dist = (mid_j - mid_i).abs();
            if dist > half {
                dist = n as f64 - dist;
            }

            let opposition = 1.0 - (dist - half).abs() / half;
            let size = (zones[i].len() + zones[j].len()) as f64 / n as f64;
            let score = opposition + size * 0.5;

            if score > best_score {
                best_score = score;
                best = Some((zones[i].as_slice(), zones[j].as_slice()));
            }
        }
    }

    best
}

/// Ring position halfway along a zone
fn zone_midpoint(zone: &[usize], n: usize) -> f64 {
    let span = ring_offset(zone[0], zone_end(zone), n) as f64;
    (zone[0] as f64 + span / 2.0) % n as f64
}

fn zone_end(zone: &[usize]) -> usize {
    zone[zone.len() - 1]
}

/// Indices from `from` forward to `to`, both inclusive, wrapping at `n`
fn ring_walk(from: usize, to: usize, n: usize) -> Vec<usize> {
    let steps = ring_offset(from, to, n);
    (0..=steps).map(|k| (from + k) % n).collect()
}

/// Forward steps from `from` to `to` around a ring of `n`
fn ring_offset(from: usize, to: usize, n: usize) -> usize {
    (to + n - from) % n
}

/// Shortest index distance between two ring positions
fn ring_distance(i: usize, j: usize, n: usize) -> usize {
    let d = i.abs_diff(j);
    d.min(n - d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Two 10x10 rooms joined by a 0.2 wide, 5 long corridor
    fn dumbbell() -> Contour {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 4.9),
            Point2::new(15.0, 4.9),
            Point2::new(15.0, 0.0),
            Point2::new(25.0, 0.0),
            Point2::new(25.0, 10.0),
            Point2::new(15.0, 10.0),
            Point2::new(15.0, 5.1),
            Point2::new(10.0, 5.1),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
    }

    /// Three 10x10 rooms in a row joined by two 0.2 wide, 5 long corridors
    fn three_rooms() -> Contour {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 4.9),
            Point2::new(15.0, 4.9),
            Point2::new(15.0, 0.0),
            Point2::new(25.0, 0.0),
            Point2::new(25.0, 4.9),
            Point2::new(30.0, 4.9),
            Point2::new(30.0, 0.0),
            Point2::new(40.0, 0.0),
            Point2::new(40.0, 10.0),
            Point2::new(30.0, 10.0),
            Point2::new(30.0, 5.1),
            Point2::new(25.0, 5.1),
            Point2::new(25.0, 10.0),
            Point2::new(15.0, 10.0),
            Point2::new(15.0, 5.1),
            Point2::new(10.0, 5.1),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_split_three_rooms_recurses() {
        let shape = three_rooms();
        assert_eq!(find_bottleneck_points(&shape, 0.5), vec![2, 3, 6, 7, 12, 13, 16, 17]);

        // The first cut crosses the middle room diagonally, each half is then
        // cut again at its remaining corridor
        let pieces = split_at_bottlenecks(&shape, &SplitOptions::default());
        assert_eq!(pieces.len(), 4);

        let mut areas: Vec<f64> = pieces.iter().map(|p| contour::area(p)).collect();
        areas.sort_by(|a, b| a.total_cmp(b));
        for (area, expected) in areas.iter().zip([50.0, 50.0, 100.0, 100.0]) {
            assert_relative_eq!(*area, expected, epsilon = 1.5);
        }
    }

    #[test]
    fn test_split_three_rooms_without_recursion() {
        let options = SplitOptions {
            max_depth: 0,
            ..SplitOptions::default()
        };
        assert_eq!(split_at_bottlenecks(&three_rooms(), &options).len(), 2);
    }

    #[test]
    fn test_best_zone_pair_tie_keeps_first() {
        // Zones 0/2 and 1/3 are both exactly opposite with equal sizes
        let zones = vec![vec![2, 3], vec![6, 7], vec![12, 13], vec![16, 17]];
        let (a, b) = best_zone_pair(&zones, 20).unwrap();
        assert_eq!(a, &[2, 3]);
        assert_eq!(b, &[12, 13]);
    }

    #[test]
    fn test_best_zone_pair_needs_two_zones() {
        assert!(best_zone_pair(&[vec![1, 2]], 12).is_none());
    }

    #[test]
    fn test_find_bottleneck_points_dumbbell() {
        let points = find_bottleneck_points(&dumbbell(), 0.5);
        assert_eq!(points, vec![2, 3, 8, 9]);
    }

    #[test]
    fn test_find_bottleneck_points_small_contour() {
        let triangle = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.1, 0.0),
            Point2::new(0.0, 0.1),
        ];
        assert!(find_bottleneck_points(&triangle, 1.0).is_empty());
    }

    #[test]
    fn test_split_dumbbell() {
        let pieces = split_at_bottlenecks(&dumbbell(), &SplitOptions::default());

        assert_eq!(pieces.len(), 2);
        for piece in &pieces {
            assert_relative_eq!(contour::area(piece), 100.0, epsilon = 1.5);
        }

        // One piece per room
        let right = contour::vertex_centroid(&pieces[0]).unwrap();
        let left = contour::vertex_centroid(&pieces[1]).unwrap();
        assert!(right.x > 15.0);
        assert!(left.x < 10.0);
    }

    #[test]
    fn test_split_wide_corridor_is_unchanged() {
        let mut shape = dumbbell();
        // Widen the corridor to 4 units
        shape[2].y = 3.0;
        shape[3].y = 3.0;
        shape[8].y = 7.0;
        shape[9].y = 7.0;

        let pieces = split_at_bottlenecks(&shape, &SplitOptions::default());
        assert_eq!(pieces, vec![shape]);
    }

    #[test]
    fn test_split_discards_small_pieces() {
        let options = SplitOptions {
            min_region_area: 500.0,
            ..SplitOptions::default()
        };

        let pieces = split_at_bottlenecks(&dumbbell(), &options);
        assert_eq!(pieces, vec![dumbbell()]);
    }

    #[test]
    fn test_split_respects_depth_limit() {
        let options = SplitOptions {
            max_depth: 0,
            ..SplitOptions::default()
        };

        // Depth 0 still allows the first split
        assert_eq!(split_at_bottlenecks(&dumbbell(), &options).len(), 2);
    }

    #[test]
    fn test_group_zones_wraps_around() {
        let zones = group_zones(&[0, 1, 5, 6, 10, 11], 12);
        assert_eq!(zones, vec![vec![10, 11, 0, 1], vec![5, 6]]);

        let zones = group_zones(&[2, 3, 8, 9], 12);
        assert_eq!(zones, vec![vec![2, 3], vec![8, 9]]);
    }

    #[test]
    fn test_ring_walk() {
        assert_eq!(ring_walk(3, 8, 12), vec![3, 4, 5, 6, 7, 8]);
        assert_eq!(ring_walk(9, 2, 12), vec![9, 10, 11, 0, 1, 2]);
    }

    #[test]
    fn test_zone_midpoint_wrapped() {
        assert_relative_eq!(zone_midpoint(&[10, 11, 0, 1], 12), 11.5);
        assert_relative_eq!(zone_midpoint(&[2, 3], 12), 2.5);
    }
}
