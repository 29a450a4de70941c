// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Boolean Operations on multi-part shapes
//!
//! Thin wrappers over the i_overlay crate. Every region operation in the
//! layout pipeline (strip clipping, footprint carving, zone merging, parking
//! clipping) funnels through here so winding and degenerate-part filtering
//! are handled in one place.

use crate::polygon::{Polygon2D, Shape, MIN_PART_AREA};
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;

type Path = Vec<[f64; 2]>;

/// Boolean intersection `a ∩ b`
pub fn intersection(a: &Shape, b: &Shape) -> Shape {
    if a.is_empty() || b.is_empty() {
        return Shape::empty();
    }
    overlay(a, b, OverlayRule::Intersect)
}

/// Boolean union `a ∪ b`
pub fn union(a: &Shape, b: &Shape) -> Shape {
    if a.is_empty() {
        return b.clone();
    }
    if b.is_empty() {
        return a.clone();
    }
    overlay(a, b, OverlayRule::Union)
}

/// Boolean difference `a - b`
pub fn difference(a: &Shape, b: &Shape) -> Shape {
    if a.is_empty() {
        return Shape::empty();
    }
    if b.is_empty() {
        return a.clone();
    }
    overlay(a, b, OverlayRule::Difference)
}

/// Union of many shapes in one pass
pub fn union_all(shapes: &[Shape]) -> Shape {
    let subject: Vec<Path> = shapes.iter().flat_map(shape_to_paths).collect();
    if subject.is_empty() {
        return Shape::empty();
    }
    let clip: Vec<Path> = Vec::new();
    let result = subject.overlay(&clip, OverlayRule::Union, FillRule::NonZero);
    shapes_to_shape(&result)
}

/// Rebuild a shape from loose rings whose winding encodes outer/hole
///
/// Outer rings must be counter-clockwise and holes clockwise, which is what
/// offsetting produces.
pub fn normalize_rings(rings: Vec<Vec<Point2<f64>>>) -> Shape {
    let subject: Vec<Path> = rings
        .iter()
        .filter(|r| is_valid_contour(r))
        .map(|r| contour_to_path(r))
        .collect();
    if subject.is_empty() {
        return Shape::empty();
    }
    let clip: Vec<Path> = Vec::new();
    let result = subject.overlay(&clip, OverlayRule::Union, FillRule::NonZero);
    shapes_to_shape(&result)
}

fn overlay(a: &Shape, b: &Shape, rule: OverlayRule) -> Shape {
    let subject = shape_to_paths(a);
    let clip = shape_to_paths(b);
    // Result is Vec<Vec<Vec<[f64; 2]>>> - Vec of shapes, each shape is Vec of contours
    let result = subject.overlay(&clip, rule, FillRule::EvenOdd);
    shapes_to_shape(&result)
}

/// Check if a contour is valid (has area, not degenerate)
pub fn is_valid_contour(contour: &[Point2<f64>]) -> bool {
    if contour.len() < 3 {
        return false;
    }

    compute_signed_area(contour).abs() > MIN_PART_AREA
}

/// Compute the signed area of a 2D contour
/// Positive = counter-clockwise, Negative = clockwise
pub fn compute_signed_area(contour: &[Point2<f64>]) -> f64 {
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

/// Ensure contour has counter-clockwise winding (positive area)
pub fn ensure_ccw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    if compute_signed_area(contour) < 0.0 {
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Ensure contour has clockwise winding (for holes)
pub fn ensure_cw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    if compute_signed_area(contour) > 0.0 {
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
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

// ============================================================================
// Internal Helper Functions
// ============================================================================

/// Convert a shape to i_overlay path format (outer CCW, holes CW)
fn shape_to_paths(shape: &Shape) -> Vec<Path> {
    let mut paths = Vec::new();
    for part in &shape.parts {
        if !is_valid_contour(&part.outer) {
            continue;
        }
        paths.push(contour_to_path(&ensure_ccw(&part.outer)));
        for hole in &part.holes {
            if is_valid_contour(hole) {
                paths.push(contour_to_path(&ensure_cw(hole)));
            }
        }
    }
    paths
}

fn contour_to_path(contour: &[Point2<f64>]) -> Path {
    contour.iter().map(|p| [p.x, p.y]).collect()
}

fn path_to_contour(path: &[[f64; 2]]) -> Vec<Point2<f64>> {
    path.iter().map(|p| Point2::new(p[0], p[1])).collect()
}

/// Convert i_overlay result shapes back to a [`Shape`]
///
/// i_overlay returns Vec<Vec<Vec<[f64; 2]>>> where:
/// - Outer Vec: list of shapes
/// - Middle Vec: list of contours per shape (first is outer, rest are holes)
/// - Inner Vec: list of points per contour
fn shapes_to_shape(shapes: &[Vec<Path>]) -> Shape {
    let mut parts = Vec::with_capacity(shapes.len());
    for shape in shapes {
        let Some(first) = shape.first() else {
            continue;
        };
        let outer = path_to_contour(first);
        if !is_valid_contour(&outer) {
            continue;
        }
        let holes = shape
            .iter()
            .skip(1)
            .map(|c| path_to_contour(c))
            .filter(|h| is_valid_contour(h))
            .collect();
        parts.push(Polygon2D::with_holes(outer, holes));
    }
    Shape { parts }
}
