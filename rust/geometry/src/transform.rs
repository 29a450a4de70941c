// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar transforms and oriented bounds
//!
//! Convex hull, minimum-area rotated bounding rectangle and uniform scaling
//! about a point. The footprint deriver uses these to orient the building
//! with the parcel's dominant direction.

use crate::polygon::{Polygon2D, Shape};
use nalgebra::{Point2, Vector2};

/// Convex hull by Andrew's monotone chain, counter-clockwise, no duplicates
pub fn convex_hull(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut pts: Vec<Point2<f64>> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| (a.x - b.x).abs() < 1e-12 && (a.y - b.y).abs() < 1e-12);

    if pts.len() < 3 {
        return pts;
    }

    let cross = |o: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>| {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    };

    let mut lower: Vec<Point2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Point2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Minimum-area rectangle enclosing the shape, aligned to one hull edge
///
/// Falls back to the axis-aligned bounds when the hull is degenerate.
pub fn minimum_rotated_rectangle(shape: &Shape) -> Option<Polygon2D> {
    let hull = convex_hull(&shape.outer_points());
    if hull.len() < 3 {
        return shape.bounds().map(|b| b.to_polygon());
    }

    let mut best: Option<(f64, [Point2<f64>; 4])> = None;
    let n = hull.len();
    for i in 0..n {
        let edge = hull[(i + 1) % n] - hull[i];
        let len = edge.norm();
        if len < 1e-12 {
            continue;
        }
        let u = edge / len;
        let v = Vector2::new(-u.y, u.x);

        let (mut min_u, mut max_u) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_v, mut max_v) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &hull {
            let d = p.coords;
            let pu = d.dot(&u);
            let pv = d.dot(&v);
            min_u = min_u.min(pu);
            max_u = max_u.max(pu);
            min_v = min_v.min(pv);
            max_v = max_v.max(pv);
        }

        let area = (max_u - min_u) * (max_v - min_v);
        if best.as_ref().map_or(true, |(a, _)| area < *a - 1e-12) {
            let corner = |su: f64, sv: f64| Point2::from(u * su + v * sv);
            best = Some((
                area,
                [
                    corner(min_u, min_v),
                    corner(max_u, min_v),
                    corner(max_u, max_v),
                    corner(min_u, max_v),
                ],
            ));
        }
    }

    best.map(|(_, corners)| Polygon2D::new(corners.to_vec()))
}

/// Uniform scale about `origin`
pub fn scale_about(shape: &Shape, factor: f64, origin: Point2<f64>) -> Shape {
    let scale_ring = |ring: &[Point2<f64>]| -> Vec<Point2<f64>> {
        ring.iter().map(|p| origin + (p - origin) * factor).collect()
    };
    Shape {
        parts: shape
            .parts
            .iter()
            .map(|part| Polygon2D {
                outer: scale_ring(&part.outer),
                holes: part.holes.iter().map(|h| scale_ring(h)).collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_convex_hull_drops_interior_points() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert_eq!(convex_hull(&points).len(), 4);
    }

    #[test]
    fn test_rotated_rectangle_of_axis_aligned_rect() {
        let shape = Shape::rect(0.0, 0.0, 24.0, 14.0);
        let mbr = minimum_rotated_rectangle(&shape).unwrap();
        assert_relative_eq!(mbr.area(), 336.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rotated_rectangle_of_diamond() {
        // A square rotated 45 degrees: the oriented box is the square itself
        let shape = Shape::from_coords(&[(1.0, 0.0), (2.0, 1.0), (1.0, 2.0), (0.0, 1.0)]);
        let mbr = minimum_rotated_rectangle(&shape).unwrap();
        assert_relative_eq!(mbr.area(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_scale_about_centroid() {
        let shape = Shape::rect(0.0, 0.0, 4.0, 4.0);
        let scaled = scale_about(&shape, 0.5, Point2::new(2.0, 2.0));
        assert_relative_eq!(scaled.area(), 4.0, epsilon = 1e-12);
        let b = scaled.bounds().unwrap();
        assert_relative_eq!(b.min.x, 1.0, epsilon = 1e-12);
    }
}
