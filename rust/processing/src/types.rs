// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input and output types for gap detection.

use areafill_geometry::contour;
use areafill_geometry::{clean_contour, find_interior_point, Contour, Region};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// One uncovered region found between area boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapRecord {
    /// Outer boundary of the gap.
    pub contour: Contour,
    /// Point inside the gap where a new area can be placed.
    pub centroid: Point2<f64>,
    /// Gap area in squared input units.
    pub area: f64,
}

impl GapRecord {
    /// Create a new GapRecord.
    pub fn new(contour: Contour, centroid: Point2<f64>, area: f64) -> Self {
        Self {
            contour,
            centroid,
            area,
        }
    }
}

/// All boundary loops of one area element.
///
/// The largest loop is the exterior. Every other loop is an inner boundary,
/// so an area with more than one loop is a donut.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaBoundary {
    loops: Vec<Contour>,
    location: Option<Point2<f64>>,
}

impl AreaBoundary {
    /// Build from raw loops; near-duplicate points are removed and loops
    /// that collapse below 3 points are dropped.
    pub fn new(loops: Vec<Contour>) -> Self {
        Self {
            loops: loops.iter().filter_map(|l| clean_contour(l)).collect(),
            location: None,
        }
    }

    /// Single-loop area.
    pub fn simple(exterior: Contour) -> Self {
        Self::new(vec![exterior])
    }

    /// Attach the host location point of the area.
    pub fn with_location(mut self, location: Point2<f64>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn loops(&self) -> &[Contour] {
        &self.loops
    }

    pub fn is_donut(&self) -> bool {
        self.loops.len() > 1
    }

    /// The loop with the largest area.
    pub fn exterior(&self) -> Option<&Contour> {
        self.loops
            .iter()
            .max_by(|a, b| contour::area(a).total_cmp(&contour::area(b)))
    }

    /// Non-exterior loops with at least `threshold` area.
    pub fn holes(&self, threshold: f64) -> Vec<Contour> {
        let Some(exterior) = self.exterior() else {
            return Vec::new();
        };

        self.loops
            .iter()
            .filter(|l| !std::ptr::eq(*l, exterior))
            .filter(|l| contour::area(l) >= threshold)
            .cloned()
            .collect()
    }

    /// Region covered by this area, holes excluded.
    pub fn to_region(&self, hole_threshold: f64) -> Region {
        match self.exterior() {
            Some(exterior) => Region::from_points_with_holes(exterior, &self.holes(hole_threshold)),
            None => Region::empty(),
        }
    }

    /// Host location, or an interior point of the exterior when none was given.
    pub fn location(&self) -> Option<Point2<f64>> {
        self.location
            .or_else(|| self.exterior().and_then(|e| find_interior_point(e, None)))
    }
}

impl From<Contour> for AreaBoundary {
    fn from(exterior: Contour) -> Self {
        Self::simple(exterior)
    }
}
