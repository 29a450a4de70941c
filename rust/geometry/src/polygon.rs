// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar polygon model: single polygons with holes and multi-part shapes
//!
//! Every region the layout engine handles (parcel, footprint, band, zone,
//! corridor, parking) is a [`Shape`]. Strip intersections against concave
//! footprints can yield several disjoint parts, so a shape is a list of
//! [`Polygon2D`] parts rather than a single ring.

use crate::bool2d::{compute_signed_area, ensure_ccw, ensure_cw, point_in_contour};
use nalgebra::Point2;

/// Parts whose area falls below this are dropped as degenerate
pub const MIN_PART_AREA: f64 = 1e-9;

/// Polygon with optional holes
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2D {
    /// Outer boundary (counter-clockwise)
    pub outer: Vec<Point2<f64>>,
    /// Holes (clockwise)
    pub holes: Vec<Vec<Point2<f64>>>,
}

impl Polygon2D {
    /// Create a polygon from an outer ring, normalising winding
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        Self {
            outer: ensure_ccw(&outer),
            holes: Vec::new(),
        }
    }

    /// Create a polygon with holes, normalising winding of every ring
    pub fn with_holes(outer: Vec<Point2<f64>>, holes: Vec<Vec<Point2<f64>>>) -> Self {
        Self {
            outer: ensure_ccw(&outer),
            holes: holes.iter().map(|h| ensure_cw(h)).collect(),
        }
    }

    /// Axis-aligned rectangle
    pub fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(vec![
            Point2::new(min_x, min_y),
            Point2::new(max_x, min_y),
            Point2::new(max_x, max_y),
            Point2::new(min_x, max_y),
        ])
    }

    /// Area of the outer ring minus the holes
    pub fn area(&self) -> f64 {
        let outer = compute_signed_area(&self.outer).abs();
        let holes: f64 = self.holes.iter().map(|h| compute_signed_area(h).abs()).sum();
        (outer - holes).max(0.0)
    }

    /// Area-weighted centroid together with the area it was computed over
    pub fn centroid_and_area(&self) -> Option<(Point2<f64>, f64)> {
        let (mut cx, mut cy, mut total) = ring_moments(&self.outer, 1.0);
        for hole in &self.holes {
            let (hx, hy, ha) = ring_moments(hole, -1.0);
            cx += hx;
            cy += hy;
            total += ha;
        }
        if total.abs() < MIN_PART_AREA {
            return None;
        }
        Some((Point2::new(cx / total, cy / total), total))
    }

    /// Point containment (inside the outer ring and outside every hole)
    pub fn contains_point(&self, point: &Point2<f64>) -> bool {
        point_in_contour(point, &self.outer) && !self.holes.iter().any(|h| point_in_contour(point, h))
    }

    /// Outer ring followed by the holes
    pub fn rings(&self) -> impl Iterator<Item = &Vec<Point2<f64>>> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }
}

/// First moments of a ring, oriented so that `sign` = 1 counts positive area
fn ring_moments(ring: &[Point2<f64>], sign: f64) -> (f64, f64, f64) {
    let n = ring.len();
    if n < 3 {
        return (0.0, 0.0, 0.0);
    }
    let mut a = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p = ring[i];
        let q = ring[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        a += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    let area = a * 0.5;
    // Normalise to the requested orientation regardless of stored winding
    let flip = if area.signum() == sign.signum() { 1.0 } else { -1.0 };
    (flip * cx / 6.0, flip * cy / 6.0, flip * area)
}

/// Axis-aligned bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Bounds2D {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    pub fn to_polygon(&self) -> Polygon2D {
        Polygon2D::rect(self.min.x, self.min.y, self.max.x, self.max.y)
    }
}

/// A region made of zero or more disjoint polygon parts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub parts: Vec<Polygon2D>,
}

impl Shape {
    /// The empty region
    pub fn empty() -> Self {
        Self { parts: Vec::new() }
    }

    pub fn from_polygon(polygon: Polygon2D) -> Self {
        Self {
            parts: vec![polygon],
        }
    }

    /// Shape from a single outer ring given as coordinate pairs
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        let outer = coords.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        Self::from_polygon(Polygon2D::new(outer))
    }

    pub fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::from_polygon(Polygon2D::rect(min_x, min_y, max_x, max_y))
    }

    /// True when the shape has no parts of measurable area
    pub fn is_empty(&self) -> bool {
        self.area() < MIN_PART_AREA
    }

    pub fn area(&self) -> f64 {
        self.parts.iter().map(Polygon2D::area).sum()
    }

    /// Area-weighted centroid over all parts
    pub fn centroid(&self) -> Option<Point2<f64>> {
        let mut sx = 0.0;
        let mut sy = 0.0;
        let mut total = 0.0;
        for part in &self.parts {
            if let Some((c, a)) = part.centroid_and_area() {
                sx += c.x * a;
                sy += c.y * a;
                total += a;
            }
        }
        if total < MIN_PART_AREA {
            return None;
        }
        Some(Point2::new(sx / total, sy / total))
    }

    pub fn bounds(&self) -> Option<Bounds2D> {
        let mut points = self.parts.iter().flat_map(|p| p.outer.iter());
        let first = points.next()?;
        let mut min = *first;
        let mut max = *first;
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Bounds2D { min, max })
    }

    /// Keep only the part with the largest area
    pub fn largest_part(&self) -> Shape {
        self.parts
            .iter()
            .max_by(|a, b| a.area().total_cmp(&b.area()))
            .map(|p| Shape::from_polygon(p.clone()))
            .unwrap_or_default()
    }

    pub fn contains_point(&self, point: &Point2<f64>) -> bool {
        self.parts.iter().any(|p| p.contains_point(point))
    }

    /// Every ring of every part
    pub fn rings(&self) -> impl Iterator<Item = &Vec<Point2<f64>>> {
        self.parts.iter().flat_map(Polygon2D::rings)
    }

    /// The same shape with holes dropped
    pub fn exterior(&self) -> Shape {
        Shape {
            parts: self
                .parts
                .iter()
                .map(|p| Polygon2D::new(p.outer.clone()))
                .collect(),
        }
    }

    /// All vertices of all outer rings
    pub fn outer_points(&self) -> Vec<Point2<f64>> {
        self.parts.iter().flat_map(|p| p.outer.iter().copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rect_area_and_centroid() {
        let shape = Shape::rect(0.0, 0.0, 4.0, 2.0);
        assert_relative_eq!(shape.area(), 8.0, epsilon = 1e-12);
        let c = shape.centroid().unwrap();
        assert_relative_eq!(c.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hole_reduces_area_and_shifts_centroid() {
        let outer = Polygon2D::rect(0.0, 0.0, 10.0, 10.0).outer;
        let hole = Polygon2D::rect(5.0, 0.0, 10.0, 10.0).outer;
        // Hole covering the right half is unusual but keeps the arithmetic simple
        let poly = Polygon2D::with_holes(outer, vec![hole]);
        assert_relative_eq!(poly.area(), 50.0, epsilon = 1e-9);
        let (c, a) = poly.centroid_and_area().unwrap();
        assert_relative_eq!(a, 50.0, epsilon = 1e-9);
        assert_relative_eq!(c.x, 2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_cw_input_is_normalised() {
        let shape = Shape::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        assert!(compute_signed_area(&shape.parts[0].outer) > 0.0);
    }

    #[test]
    fn test_largest_part() {
        let shape = Shape {
            parts: vec![
                Polygon2D::rect(0.0, 0.0, 1.0, 1.0),
                Polygon2D::rect(5.0, 5.0, 8.0, 8.0),
            ],
        };
        assert_relative_eq!(shape.largest_part().area(), 9.0, epsilon = 1e-12);
        assert!(Shape::empty().largest_part().is_empty());
    }

    #[test]
    fn test_contains_point_respects_holes() {
        let poly = Polygon2D::with_holes(
            Polygon2D::rect(0.0, 0.0, 10.0, 10.0).outer,
            vec![Polygon2D::rect(4.0, 4.0, 6.0, 6.0).outer],
        );
        let shape = Shape::from_polygon(poly);
        assert!(shape.contains_point(&Point2::new(1.0, 1.0)));
        assert!(!shape.contains_point(&Point2::new(5.0, 5.0)));
        assert!(!shape.contains_point(&Point2::new(11.0, 5.0)));
    }
}
