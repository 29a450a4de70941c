// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon offsetting (buffering) backed by clipper2
//!
//! Positive distances grow a shape, negative distances inset it. Corners use
//! mitre joins so rectangles stay rectangles, which keeps downstream strip
//! cuts axis-aligned.

use crate::bool2d::{ensure_ccw, ensure_cw, normalize_rings};
use crate::polygon::Shape;
use clipper2::{EndType, JoinType, Paths};
use nalgebra::Point2;

/// Distances below this are treated as no-ops
const MIN_OFFSET: f64 = 1e-6;

/// Mitre limit, as a multiple of the offset distance
const MITER_LIMIT: f64 = 2.0;

/// Offset a shape outward (positive) or inward (negative)
///
/// Returns an empty shape when an inset consumes the whole region.
pub fn buffer(shape: &Shape, distance: f64) -> Shape {
    if shape.is_empty() {
        return Shape::empty();
    }
    if distance.abs() < MIN_OFFSET {
        return shape.clone();
    }

    let mut coords: Vec<Vec<(f64, f64)>> = Vec::new();
    for part in &shape.parts {
        coords.push(ensure_ccw(&part.outer).iter().map(|p| (p.x, p.y)).collect());
        for hole in &part.holes {
            coords.push(ensure_cw(hole).iter().map(|p| (p.x, p.y)).collect());
        }
    }

    let paths: Paths = coords.into();

    // inflate(delta, join_type, end_type, miter_limit)
    let result = paths.inflate(distance, JoinType::Miter, EndType::Polygon, MITER_LIMIT);

    let output: Vec<Vec<(f64, f64)>> = result.into();

    let rings = output
        .into_iter()
        .filter(|path| path.len() >= 3)
        .map(|path| path.into_iter().map(|(x, y)| Point2::new(x, y)).collect())
        .collect();

    normalize_rings(rings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_inset_rectangle() {
        let shape = Shape::rect(0.0, 0.0, 10.0, 6.0);
        let inner = buffer(&shape, -1.0);
        assert_abs_diff_eq!(inner.area(), 8.0 * 4.0, epsilon = 0.05);
        let b = inner.bounds().unwrap();
        assert_abs_diff_eq!(b.min.x, 1.0, epsilon = 0.01);
        assert_abs_diff_eq!(b.max.y, 5.0, epsilon = 0.01);
    }

    #[test]
    fn test_inset_consumes_thin_shape() {
        let shape = Shape::rect(0.0, 0.0, 10.0, 1.0);
        assert!(buffer(&shape, -0.8).is_empty());
    }

    #[test]
    fn test_outset_rectangle_keeps_square_corners() {
        let shape = Shape::rect(0.0, 0.0, 4.0, 4.0);
        let grown = buffer(&shape, 0.5);
        assert_abs_diff_eq!(grown.area(), 25.0, epsilon = 0.05);
    }

    #[test]
    fn test_zero_distance_is_identity() {
        let shape = Shape::rect(0.0, 0.0, 3.0, 2.0);
        assert_eq!(buffer(&shape, 0.0), shape);
    }
}
