// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use areafill_geometry::contour::{self, point_in_contour};
use areafill_geometry::{find_interior_point, Contour, Point2, Region};

fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Contour {
    vec![
        Point2::new(min_x, min_y),
        Point2::new(max_x, min_y),
        Point2::new(max_x, max_y),
        Point2::new(min_x, max_y),
    ]
}

fn l_shape() -> Contour {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(6.0, 0.0),
        Point2::new(6.0, 2.0),
        Point2::new(2.0, 2.0),
        Point2::new(2.0, 5.0),
        Point2::new(0.0, 5.0),
    ]
}

fn operand_pairs() -> Vec<(Region, Region)> {
    vec![
        // Overlapping squares
        (
            Region::from_points(&rect(0.0, 0.0, 2.0, 2.0)),
            Region::from_points(&rect(1.0, 1.0, 3.0, 3.0)),
        ),
        // Disjoint
        (
            Region::from_points(&rect(0.0, 0.0, 1.0, 1.0)),
            Region::from_points(&rect(5.0, 5.0, 7.0, 6.0)),
        ),
        // Containment
        (
            Region::rectangle(0.0, 0.0, 10.0, 10.0),
            Region::from_points(&rect(3.0, 3.0, 4.0, 6.0)),
        ),
        // Shared edge
        (
            Region::from_points(&rect(0.0, 0.0, 1.0, 1.0)),
            Region::from_points(&rect(1.0, 0.0, 2.0, 1.0)),
        ),
        // Non-convex against a region with a hole
        (
            Region::from_points(&l_shape()),
            Region::from_points_with_holes(&rect(1.0, 1.0, 5.0, 4.0), &[rect(2.5, 2.5, 3.5, 3.5)]),
        ),
    ]
}

#[test]
fn union_plus_intersection_equals_sum_of_areas() {
    for (a, b) in operand_pairs() {
        let lhs = a.union(&b).area() + a.intersection(&b).area();
        let rhs = a.area() + b.area();
        assert_relative_eq!(lhs, rhs, epsilon = 1e-6);
    }
}

#[test]
fn difference_and_intersection_partition_the_minuend() {
    for (a, b) in operand_pairs() {
        let lhs = a.difference(&b).area() + a.intersection(&b).area();
        assert_relative_eq!(lhs, a.area(), epsilon = 1e-6);
    }
}

#[test]
fn xor_is_union_minus_intersection() {
    for (a, b) in operand_pairs() {
        let expected = a.union(&b).area() - a.intersection(&b).area();
        assert_relative_eq!(a.xor(&b).area(), expected, epsilon = 1e-6);
    }
}

#[test]
fn contours_round_trip_simple_polygon() {
    for points in [l_shape(), rect(-3.0, 1.5, 4.25, 7.0)] {
        let region = Region::from_points(&points);
        let contours = region.contours();

        assert_eq!(contours.len(), 1);
        let out = &contours[0];
        assert_eq!(out.len(), points.len());
        assert_relative_eq!(contour::area(out), contour::area(&points), epsilon = 1e-6);

        for p in &points {
            assert!(
                out.iter().any(|q| (p - q).norm() < 1e-6),
                "point {:?} missing from round-tripped contour",
                p
            );
        }
    }
}

#[test]
fn clockwise_input_is_accepted() {
    let cw: Contour = l_shape().into_iter().rev().collect();
    let region = Region::from_points(&cw);
    assert_relative_eq!(region.area(), contour::area(&l_shape()), epsilon = 1e-6);
}

#[test]
fn interior_point_lies_inside_region() {
    let shapes = vec![
        l_shape(),
        rect(0.0, 0.0, 3.0, 0.8),
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 1.0),
            Point2::new(8.0, 0.0),
            Point2::new(6.0, 5.0),
            Point2::new(4.0, 2.0),
            Point2::new(2.0, 5.0),
        ],
    ];

    for shape in shapes {
        let region = Region::from_points(&shape);
        let p = find_interior_point(&shape, None).unwrap();
        assert!(point_in_contour(&p, &shape));
        assert!(region.contains_point(p.x, p.y));
    }
}

#[test]
fn hole_region_scenario() {
    let region = Region::from_points_with_holes(&rect(0.0, 0.0, 10.0, 10.0), &[rect(4.0, 4.0, 6.0, 6.0)]);

    assert_relative_eq!(region.area(), 96.0, epsilon = 1e-6);
    assert!(!region.contains_point(5.0, 5.0));
    assert!(region.contains_point(1.0, 1.0));
}

#[test]
fn rectangle_minus_itself_is_empty() {
    let rect = Region::rectangle(0.0, 0.0, 10.0, 10.0);
    let result = rect.difference(&rect);

    assert!(result.is_empty());
    assert_eq!(result.area(), 0.0);
}
