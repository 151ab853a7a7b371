// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Contour primitives
//!
//! A contour is an implicitly closed ring of points: the last point does not
//! repeat the first. These helpers work on plain slices so they can be used on
//! caller-supplied boundaries before they are turned into regions.

use nalgebra::Point2;

/// Coincidence tolerance for 2D comparisons (length units)
pub const TOLERANCE: f64 = 0.001;

/// An implicitly closed ring of points
pub type Contour = Vec<Point2<f64>>;

/// Compute the signed area of a contour
/// Positive = counter-clockwise, Negative = clockwise
pub fn signed_area(contour: &[Point2<f64>]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    let n = contour.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area += contour[i].x * contour[j].y;
        area -= contour[j].x * contour[i].y;
    }

    area * 0.5
}

/// Unsigned area of a contour
pub fn area(contour: &[Point2<f64>]) -> f64 {
    signed_area(contour).abs()
}

/// Arithmetic mean of the contour vertices
///
/// This is not the area centroid; for non-convex rings it can fall outside.
pub fn vertex_centroid(contour: &[Point2<f64>]) -> Option<Point2<f64>> {
    if contour.is_empty() {
        return None;
    }

    let n = contour.len() as f64;
    let (sx, sy) = contour
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));

    Some(Point2::new(sx / n, sy / n))
}

/// Compute bounding box of a contour
pub fn contour_bounds(contour: &[Point2<f64>]) -> Option<(Point2<f64>, Point2<f64>)> {
    if contour.is_empty() {
        return None;
    }

    let mut min = contour[0];
    let mut max = contour[0];

    for p in contour.iter().skip(1) {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    Some((min, max))
}

/// Check if a point is inside a contour using ray casting
pub fn point_in_contour(point: &Point2<f64>, contour: &[Point2<f64>]) -> bool {
    if contour.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = contour.len();

    let mut j = n - 1;
    for i in 0..n {
        let pi = &contour[i];
        let pj = &contour[j];

        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Minimum distance from a point to the segment `a`-`b`
pub fn point_segment_distance(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq == 0.0 {
        return (p - a).norm();
    }

    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    let closest = a + d * t;
    (p - closest).norm()
}

/// Ensure contour has counter-clockwise winding (positive area)
pub fn ensure_ccw(contour: &[Point2<f64>]) -> Contour {
    if signed_area(contour) < 0.0 {
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Ensure contour has clockwise winding (for holes)
pub fn ensure_cw(contour: &[Point2<f64>]) -> Contour {
    if signed_area(contour) > 0.0 {
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Remove near-duplicate points from a tessellated boundary loop
///
/// A point is dropped when it lies within [`TOLERANCE`] of the previously kept
/// point on both axes. A closing point equal to the first is dropped as well.
/// Returns `None` when fewer than 3 points survive.
pub fn clean_contour(points: &[Point2<f64>]) -> Option<Contour> {
    let first = *points.first()?;
    let mut cleaned: Contour = Vec::with_capacity(points.len());
    cleaned.push(first);

    for p in &points[1..] {
        if let Some(last) = cleaned.last() {
            if (p.x - last.x).abs() > TOLERANCE || (p.y - last.y).abs() > TOLERANCE {
                cleaned.push(*p);
            }
        }
    }

    while cleaned.len() > 1 && points_coincide(&cleaned[0], &cleaned[cleaned.len() - 1]) {
        cleaned.pop();
    }

    if cleaned.len() >= 3 {
        Some(cleaned)
    } else {
        None
    }
}

/// Whether two points coincide within [`TOLERANCE`]
pub fn points_coincide(a: &Point2<f64>, b: &Point2<f64>) -> bool {
    (a.x - b.x).abs() <= TOLERANCE && (a.y - b.y).abs() <= TOLERANCE
}
