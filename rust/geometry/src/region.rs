// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar regions with boolean set operations
//!
//! A [`Region`] is a set of shapes (outer boundary plus holes) under the
//! even-odd fill rule. Every region is kept in the normalized form produced by
//! the i_overlay clipper, so area, containment and contour extraction never
//! have to resolve overlapping input rings themselves.
//!
//! Construction is fail-soft: malformed input yields an empty region. The
//! `try_*` boolean operations report clipper range problems as errors; the
//! plain operations turn those into an empty result.

use crate::contour::{self, Contour};
use crate::error::{Error, Result};
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Minimum area threshold - contours smaller than this are considered degenerate
const MIN_AREA_THRESHOLD: f64 = 1e-10;

/// Largest coordinate magnitude accepted by boolean operations
pub const MAX_COORDINATE: f64 = 1e9;

/// i_overlay path: one ring of `[x, y]` pairs
type Path = Vec<[f64; 2]>;

/// Axis-aligned bounding box `(min_x, min_y, max_x, max_y)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Smallest box containing both boxes
    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Pad the box by `margin` on all four sides
    pub fn expand(&self, margin: f64) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Largest absolute coordinate touched by the box
    fn extent(&self) -> f64 {
        self.min_x
            .abs()
            .max(self.min_y.abs())
            .max(self.max_x.abs())
            .max(self.max_y.abs())
    }
}

/// One connected piece of a region
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Outer boundary (counter-clockwise)
    pub outer: Contour,
    /// Holes (clockwise)
    pub holes: Vec<Contour>,
}

impl Shape {
    /// Area of the outer boundary minus its holes
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| contour::area(h)).sum();
        (contour::area(&self.outer) - holes).max(0.0)
    }

    /// Even-odd containment: inside the outer boundary and outside every hole
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        contour::point_in_contour(point, &self.outer)
            && !self
                .holes
                .iter()
                .any(|hole| contour::point_in_contour(point, hole))
    }
}

/// A planar area under the even-odd fill rule
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    shapes: Vec<Shape>,
}

impl From<Shape> for Region {
    fn from(shape: Shape) -> Self {
        Region {
            shapes: vec![shape],
        }
    }
}

impl Region {
    /// The empty region
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a single-contour region, returning an empty region on bad input
    pub fn from_points(points: &[Point2<f64>]) -> Self {
        Self::try_from_points(points).unwrap_or_default()
    }

    /// Build a single-contour region
    ///
    /// Fails on fewer than 3 points, non-finite coordinates or zero area.
    pub fn try_from_points(points: &[Point2<f64>]) -> Result<Self> {
        validate_contour(points)?;

        if contour::area(points) <= MIN_AREA_THRESHOLD {
            return Err(Error::InvalidContour(
                "Contour encloses no area".to_string(),
            ));
        }

        Self::normalize(vec![contour_to_path(points)])
    }

    /// Build a region from an exterior ring and interior holes (even-odd fill)
    ///
    /// Holes that are not valid contours are ignored. An invalid exterior
    /// yields an empty region.
    pub fn from_points_with_holes(exterior: &[Point2<f64>], holes: &[Contour]) -> Self {
        if validate_contour(exterior).is_err() || contour::area(exterior) <= MIN_AREA_THRESHOLD {
            return Self::empty();
        }

        let mut paths = Vec::with_capacity(1 + holes.len());
        paths.push(contour_to_path(exterior));

        for hole in holes {
            if validate_contour(hole).is_ok() {
                paths.push(contour_to_path(hole));
            }
        }

        Self::normalize(paths).unwrap_or_default()
    }

    /// Axis-aligned rectangle; corners may be given in any order
    pub fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        let (x0, x1) = (min_x.min(max_x), min_x.max(max_x));
        let (y0, y1) = (min_y.min(max_y), min_y.max(max_y));

        let outer = vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ];

        if validate_contour(&outer).is_err() || contour::area(&outer) <= MIN_AREA_THRESHOLD {
            return Self::empty();
        }

        Shape {
            outer,
            holes: Vec::new(),
        }
        .into()
    }

    /// Left fold of [`Region::union`] over `regions`, skipping empty ones
    pub fn union_all(regions: &[Region]) -> Region {
        regions
            .iter()
            .filter(|r| !r.is_empty())
            .fold(Region::empty(), |acc, r| acc.union(r))
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Connected pieces of the region
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Union; an empty operand returns the other one unchanged
    pub fn union(&self, other: &Region) -> Region {
        self.try_union(other).unwrap_or_default()
    }

    pub fn try_union(&self, other: &Region) -> Result<Region> {
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        self.overlay(other, OverlayRule::Union)
    }

    /// Intersection; empty when either operand is empty
    pub fn intersection(&self, other: &Region) -> Region {
        self.try_intersection(other).unwrap_or_default()
    }

    pub fn try_intersection(&self, other: &Region) -> Result<Region> {
        if self.is_empty() || other.is_empty() {
            return Ok(Region::empty());
        }
        self.overlay(other, OverlayRule::Intersect)
    }

    /// `self` minus `other`
    pub fn difference(&self, other: &Region) -> Region {
        self.try_difference(other).unwrap_or_default()
    }

    pub fn try_difference(&self, other: &Region) -> Result<Region> {
        if self.is_empty() {
            return Ok(Region::empty());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        self.overlay(other, OverlayRule::Difference)
    }

    /// Symmetric difference; an empty operand returns the other one unchanged
    pub fn xor(&self, other: &Region) -> Region {
        self.try_xor(other).unwrap_or_default()
    }

    pub fn try_xor(&self, other: &Region) -> Result<Region> {
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        self.overlay(other, OverlayRule::Xor)
    }

    /// Even-odd point containment
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let point = Point2::new(x, y);
        self.shapes.iter().any(|shape| shape.contains(&point))
    }

    /// Bounding box, `None` for an empty region
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.shapes
            .iter()
            .filter_map(|shape| contour::contour_bounds(&shape.outer))
            .map(|(min, max)| BoundingBox::new(min.x, min.y, max.x, max.y))
            .reduce(|a, b| a.merge(&b))
    }

    /// Unsigned area under the fill rule
    pub fn area(&self) -> f64 {
        self.shapes.iter().map(Shape::area).sum()
    }

    /// All contours, outer boundaries and holes, shape by shape
    pub fn contours(&self) -> Vec<Contour> {
        self.shapes
            .iter()
            .flat_map(|shape| std::iter::once(&shape.outer).chain(shape.holes.iter()))
            .cloned()
            .collect()
    }

    /// Outer boundary of every connected piece
    pub fn outer_contours(&self) -> Vec<Contour> {
        self.shapes.iter().map(|shape| shape.outer.clone()).collect()
    }

    /// Every contour except the largest one, filtered by `area_threshold`
    ///
    /// The largest contour is taken to be the exterior. Results are ordered by
    /// area, largest first.
    pub fn interior_contours(&self, area_threshold: f64) -> Vec<Contour> {
        let mut by_area: Vec<(f64, Contour)> = self
            .contours()
            .into_iter()
            .map(|c| (contour::area(&c), c))
            .collect();

        if by_area.len() <= 1 {
            return Vec::new();
        }

        by_area.sort_by(|a, b| b.0.total_cmp(&a.0));

        by_area
            .into_iter()
            .skip(1)
            .filter(|(area, _)| *area >= area_threshold)
            .map(|(_, c)| c)
            .collect()
    }

    /// Holes of every connected piece with at least `area_threshold` area,
    /// largest first
    ///
    /// Unlike [`Region::interior_contours`] this never returns the outer
    /// boundary of a smaller disjoint piece.
    pub fn hole_contours(&self, area_threshold: f64) -> Vec<Contour> {
        let mut holes: Vec<(f64, Contour)> = self
            .shapes
            .iter()
            .flat_map(|shape| shape.holes.iter())
            .map(|h| (contour::area(h), h.clone()))
            .filter(|(area, _)| *area >= area_threshold)
            .collect();

        holes.sort_by(|a, b| b.0.total_cmp(&a.0));
        holes.into_iter().map(|(_, h)| h).collect()
    }

    /// Run a boolean operation through i_overlay
    fn overlay(&self, other: &Region, rule: OverlayRule) -> Result<Region> {
        check_extent(self, other)?;

        let subject = self.to_paths();
        let clip = other.to_paths();

        let result = subject.overlay(&clip, rule, FillRule::EvenOdd);

        Ok(Self::from_overlay(&result))
    }

    /// Resolve raw rings into shapes using the even-odd rule
    fn normalize(paths: Vec<Path>) -> Result<Region> {
        let extent = paths
            .iter()
            .flatten()
            .fold(0.0f64, |acc, p| acc.max(p[0].abs()).max(p[1].abs()));
        if extent > MAX_COORDINATE {
            return Err(Error::CoordinateOutOfRange(extent));
        }

        // Self-union with an empty clip resolves overlapping rings into shapes
        let clip: Vec<Path> = Vec::new();
        let result = paths.overlay(&clip, OverlayRule::Union, FillRule::EvenOdd);

        Ok(Self::from_overlay(&result))
    }

    /// Flatten the region into i_overlay paths (outer rings and holes)
    fn to_paths(&self) -> Vec<Path> {
        self.shapes
            .iter()
            .flat_map(|shape| std::iter::once(&shape.outer).chain(shape.holes.iter()))
            .map(|c| contour_to_path(c))
            .collect()
    }

    /// Build shapes from clipper output, outer rings CCW and holes CW
    ///
    /// Rings that collapse to no area are dropped; a shape whose outer ring
    /// collapses is dropped with its holes.
    fn from_overlay(shapes: &[Vec<Path>]) -> Region {
        let mut result = Vec::with_capacity(shapes.len());

        for shape in shapes {
            let mut contours = shape.iter().map(|path| path_to_contour(path));

            let outer = match contours.next() {
                Some(outer) if is_valid_contour(&outer) => contour::ensure_ccw(&outer),
                _ => continue,
            };

            let holes = contours
                .filter(|hole| is_valid_contour(hole))
                .map(|hole| contour::ensure_cw(&hole))
                .collect();

            result.push(Shape { outer, holes });
        }

        Region { shapes: result }
    }
}

/// Check that a ring has at least 3 points and only finite coordinates
fn validate_contour(points: &[Point2<f64>]) -> Result<()> {
    if points.len() < 3 {
        return Err(Error::InvalidContour(format!(
            "Contour must have at least 3 vertices, got {}",
            points.len()
        )));
    }

    if let Some(p) = points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(Error::NonFiniteCoordinate { x: p.x, y: p.y });
    }

    Ok(())
}

/// Reject operand pairs the clipper cannot place on its integer grid
fn check_extent(a: &Region, b: &Region) -> Result<()> {
    let bounds = match (a.bounds(), b.bounds()) {
        (Some(a), Some(b)) => a.merge(&b),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => return Ok(()),
    };

    let extent = bounds.extent();
    if !extent.is_finite() || extent > MAX_COORDINATE {
        return Err(Error::CoordinateOutOfRange(extent));
    }

    Ok(())
}

fn is_valid_contour(points: &[Point2<f64>]) -> bool {
    points.len() >= 3 && contour::area(points) > MIN_AREA_THRESHOLD
}

/// Contour as a clipper ring
fn contour_to_path(contour: &[Point2<f64>]) -> Path {
    contour.iter().map(|p| [p.x, p.y]).collect()
}

/// Clipper ring as a contour, without a closing duplicate
fn path_to_contour(path: &[[f64; 2]]) -> Contour {
    let mut points: Contour = path.iter().map(|p| Point2::new(p[0], p[1])).collect();

    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    points
}
