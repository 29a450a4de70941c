// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use floorgen_geometry::{
    boundary_within, buffer, difference, exterior_segments, intersection, longest,
    longest_shared_segment, minimum_rotated_rectangle, scale_about, segment_buffer, union,
    union_all, validate_region, Point2, Polygon2D, Shape, BOUNDARY_TOLERANCE,
};

fn l_shape() -> Shape {
    Shape::from_coords(&[
        (0.0, 0.0),
        (20.0, 0.0),
        (20.0, 12.0),
        (7.0, 12.0),
        (7.0, 7.0),
        (0.0, 7.0),
    ])
}

fn courtyard() -> Shape {
    Shape::from_polygon(Polygon2D::with_holes(
        Polygon2D::rect(0.0, 0.0, 10.0, 10.0).outer,
        vec![Polygon2D::rect(3.0, 3.0, 7.0, 7.0).outer],
    ))
}

#[test]
fn test_strips_of_concave_region_tile_it() {
    let region = l_shape();
    let strips: Vec<Shape> = (0..4)
        .map(|i| {
            let x0 = 5.0 * i as f64;
            intersection(&region, &Shape::rect(x0, 0.0, x0 + 5.0, 12.0))
        })
        .collect();

    let total: f64 = strips.iter().map(Shape::area).sum();
    assert_abs_diff_eq!(total, region.area(), epsilon = 1e-6);
    assert_abs_diff_eq!(union_all(&strips).area(), region.area(), epsilon = 1e-6);

    // Neighbouring strips share their cut line
    let seg = longest_shared_segment(&strips[0], &strips[1]).unwrap();
    assert_abs_diff_eq!(seg.length(), 7.0, epsilon = 1e-6);
}

#[test]
fn test_strip_across_courtyard_is_two_parts() {
    let strip = intersection(&courtyard(), &Shape::rect(4.0, 0.0, 6.0, 10.0));
    assert_eq!(strip.parts.len(), 2);
    assert_abs_diff_eq!(strip.area(), 12.0, epsilon = 1e-6);
    assert_abs_diff_eq!(strip.largest_part().area(), 6.0, epsilon = 1e-6);
}

#[test]
fn test_courtyard_walls_are_not_exterior() {
    let footprint = courtyard();
    let room = intersection(&footprint, &Shape::rect(0.0, 0.0, 10.0, 3.0));
    let walls = exterior_segments(&room, &footprint);
    let total: f64 = walls.iter().map(|s| s.length()).sum();
    // Bottom wall plus the two 3 m side walls; the courtyard edge is excluded
    assert_abs_diff_eq!(total, 16.0, epsilon = 1e-6);
}

#[test]
fn test_merge_heals_adjacent_zones() {
    let a = Shape::rect(0.0, 0.0, 4.0, 3.0);
    let b = Shape::rect(4.0, 0.0, 6.0, 3.0);
    let merged = union(&a, &b);
    assert_eq!(merged.parts.len(), 1);
    assert_abs_diff_eq!(merged.area(), 18.0, epsilon = 1e-9);
}

#[test]
fn test_inset_then_outset_of_rectangle() {
    let parcel = Shape::rect(0.0, 0.0, 24.0, 14.0);
    let inner = buffer(&parcel, -0.6);
    assert_abs_diff_eq!(inner.area(), 22.8 * 12.8, epsilon = 1e-3);
    let grown = buffer(&inner, 0.35);
    assert_abs_diff_eq!(grown.area(), 23.5 * 13.5, epsilon = 1e-3);
    assert!(buffer(&Shape::rect(0.0, 0.0, 1.0, 1.0), -0.6).is_empty());
}

#[test]
fn test_scaled_rotated_rectangle_of_triangle() {
    let triangle = Shape::from_coords(&[(0.0, 0.0), (10.0, 0.0), (5.0, 8.0)]);
    let mbr = minimum_rotated_rectangle(&triangle).unwrap();
    assert_abs_diff_eq!(mbr.area(), 80.0, epsilon = 1e-6);

    let (origin, _) = mbr.centroid_and_area().unwrap();
    let scaled = scale_about(&Shape::from_polygon(mbr), 0.5, origin);
    assert_abs_diff_eq!(scaled.area(), 20.0, epsilon = 1e-6);
}

#[test]
fn test_corridor_contact_and_parking_clearance() {
    let footprint = Shape::rect(0.0, 0.0, 20.0, 10.0);
    let front = Shape::rect(0.0, 0.0, 20.0, 4.0);
    let core = Shape::rect(0.0, 4.0, 20.0, 10.0);
    let interface = longest_shared_segment(&front, &core).unwrap();
    let corridor = intersection(&segment_buffer(&interface, 0.2), &footprint);

    let room = Shape::rect(5.0, 4.0, 9.0, 10.0);
    let contact = longest(boundary_within(&room, &corridor, BOUNDARY_TOLERANCE)).unwrap();
    assert_abs_diff_eq!(contact.length(), 4.0, epsilon = 1e-6);

    let pad = Shape::rect(8.0, -6.0, 12.0, 0.0);
    let parking = difference(&pad, &buffer(&footprint, 0.05));
    assert_abs_diff_eq!(parking.area(), 4.0 * 5.95, epsilon = 1e-6);
    assert!(intersection(&parking, &footprint).is_empty());
}

#[test]
fn test_validate_region() {
    assert!(validate_region(&l_shape()).is_ok());
    assert!(validate_region(&Shape::empty()).is_err());
    let sliver = Shape::from_polygon(Polygon2D {
        outer: vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
        holes: Vec::new(),
    });
    assert!(validate_region(&sliver).is_err());
}
