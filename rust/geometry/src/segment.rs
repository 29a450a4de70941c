// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary segment queries
//!
//! Doors, windows, corridors and driveways are all anchored on straight
//! pieces of boundary that two regions have in common. This module extracts
//! those pieces: collinear overlaps between two boundaries, the part of one
//! boundary lying inside another region, and flat-capped segment buffers.

use crate::polygon::{Polygon2D, Shape};
use nalgebra::{Point2, Vector2};

/// Default tolerance for treating two edges as lying on the same line
pub const BOUNDARY_TOLERANCE: f64 = 1e-3;

/// Shared pieces shorter than this are ignored
pub const MIN_SHARED_LENGTH: f64 = 0.1;

/// Straight line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2D {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl Segment2D {
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    pub fn midpoint(&self) -> Point2<f64> {
        Point2::new(
            (self.start.x + self.end.x) * 0.5,
            (self.start.y + self.end.y) * 0.5,
        )
    }

    /// Unit direction from start to end (zero for degenerate segments)
    pub fn direction(&self) -> Vector2<f64> {
        let d = self.end - self.start;
        let len = d.norm();
        if len < f64::EPSILON {
            Vector2::zeros()
        } else {
            d / len
        }
    }

    /// Left-hand unit normal
    pub fn normal(&self) -> Vector2<f64> {
        let d = self.direction();
        Vector2::new(-d.y, d.x)
    }

    pub fn point_at(&self, t: f64) -> Point2<f64> {
        self.start + (self.end - self.start) * t
    }

    /// Unit normal at the midpoint pointing out of `region`
    ///
    /// Probes a short distance along the left normal; if the probe lands
    /// inside the region the normal is flipped.
    pub fn outward_normal(&self, region: &Shape) -> Vector2<f64> {
        let n = self.normal();
        let probe = self.midpoint() + n * 0.3;
        if region.contains_point(&probe) {
            -n
        } else {
            n
        }
    }

    pub fn distance_to_point(&self, p: &Point2<f64>) -> f64 {
        let d = self.end - self.start;
        let len2 = d.norm_squared();
        if len2 < f64::EPSILON {
            return (p - self.start).norm();
        }
        let t = ((p - self.start).dot(&d) / len2).clamp(0.0, 1.0);
        (p - self.point_at(t)).norm()
    }
}

/// All edges of all rings of a shape
pub fn boundary_edges(shape: &Shape) -> Vec<Segment2D> {
    let mut edges = Vec::new();
    for ring in shape.rings() {
        let n = ring.len();
        for i in 0..n {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            if (b - a).norm() > f64::EPSILON {
                edges.push(Segment2D::new(a, b));
            }
        }
    }
    edges
}

/// Maximal collinear overlaps between the boundaries of `a` and `b`
pub fn shared_segments(a: &Shape, b: &Shape, tolerance: f64) -> Vec<Segment2D> {
    let edges_a = boundary_edges(a);
    let edges_b = boundary_edges(b);
    let mut pieces = Vec::new();

    for ea in &edges_a {
        let len = ea.length();
        let dir = ea.direction();
        for eb in &edges_b {
            // Both endpoints of eb must lie on ea's supporting line
            if line_distance(ea, &eb.start) > tolerance || line_distance(ea, &eb.end) > tolerance {
                continue;
            }
            let t0 = (eb.start - ea.start).dot(&dir);
            let t1 = (eb.end - ea.start).dot(&dir);
            let lo = t0.min(t1).max(0.0);
            let hi = t0.max(t1).min(len);
            if hi - lo > tolerance {
                pieces.push(Segment2D::new(
                    ea.start + dir * lo,
                    ea.start + dir * hi,
                ));
            }
        }
    }

    merge_collinear(pieces, tolerance)
}

/// Longest shared boundary piece of at least [`MIN_SHARED_LENGTH`]
pub fn longest_shared_segment(a: &Shape, b: &Shape) -> Option<Segment2D> {
    longest(shared_segments(a, b, BOUNDARY_TOLERANCE))
}

/// Pieces of `zone`'s boundary lying on the outer ring of `footprint`
///
/// Courtyard (hole) rings of the footprint are not exterior walls.
pub fn exterior_segments(zone: &Shape, footprint: &Shape) -> Vec<Segment2D> {
    shared_segments(zone, &footprint.exterior(), BOUNDARY_TOLERANCE)
        .into_iter()
        .filter(|s| s.length() >= MIN_SHARED_LENGTH)
        .collect()
}

/// Pieces of `a`'s boundary lying inside or on the boundary of `region`
///
/// A corridor straddles the interface line between two bands, so a zone's
/// wall along that line runs through the corridor's interior rather than
/// along its boundary. This captures that contact.
pub fn boundary_within(a: &Shape, region: &Shape, tolerance: f64) -> Vec<Segment2D> {
    let region_edges = boundary_edges(region);
    let mut pieces = Vec::new();

    for edge in boundary_edges(a) {
        let mut cuts = vec![0.0, 1.0];
        for re in &region_edges {
            if let Some(t) = crossing_parameter(&edge, re) {
                cuts.push(t);
            }
            // Endpoints of region edges touching this edge also split it
            for p in [re.start, re.end] {
                if edge.distance_to_point(&p) <= tolerance {
                    cuts.push(project_parameter(&edge, &p));
                }
            }
        }
        cuts.sort_by(|x, y| x.total_cmp(y));
        cuts.dedup_by(|x, y| (*x - *y).abs() < 1e-9);

        for w in cuts.windows(2) {
            let (t0, t1) = (w[0], w[1]);
            let piece = Segment2D::new(edge.point_at(t0), edge.point_at(t1));
            if piece.length() <= tolerance {
                continue;
            }
            let mid = piece.midpoint();
            let on_boundary = region_edges
                .iter()
                .any(|re| re.distance_to_point(&mid) <= tolerance);
            if on_boundary || region.contains_point(&mid) {
                pieces.push(piece);
            }
        }
    }

    merge_collinear(pieces, tolerance)
}

/// Longest piece of at least [`MIN_SHARED_LENGTH`]
pub fn longest(segments: Vec<Segment2D>) -> Option<Segment2D> {
    segments
        .into_iter()
        .filter(|s| s.length() >= MIN_SHARED_LENGTH)
        .max_by(|a, b| a.length().total_cmp(&b.length()))
}

/// Flat-capped rectangle of half-width `half_width` around a segment
pub fn segment_buffer(segment: &Segment2D, half_width: f64) -> Shape {
    let n = segment.normal() * half_width;
    Shape::from_polygon(Polygon2D::new(vec![
        segment.start - n,
        segment.end - n,
        segment.end + n,
        segment.start + n,
    ]))
}

// ============================================================================
// Internal Helper Functions
// ============================================================================

/// Perpendicular distance from `p` to the infinite line through `seg`
fn line_distance(seg: &Segment2D, p: &Point2<f64>) -> f64 {
    let d = seg.end - seg.start;
    let len = d.norm();
    if len < f64::EPSILON {
        return (p - seg.start).norm();
    }
    let v = p - seg.start;
    (d.x * v.y - d.y * v.x).abs() / len
}

fn project_parameter(seg: &Segment2D, p: &Point2<f64>) -> f64 {
    let d = seg.end - seg.start;
    let len2 = d.norm_squared();
    if len2 < f64::EPSILON {
        return 0.0;
    }
    ((p - seg.start).dot(&d) / len2).clamp(0.0, 1.0)
}

/// Parameter along `a` where it properly crosses `b`, if it does
fn crossing_parameter(a: &Segment2D, b: &Segment2D) -> Option<f64> {
    let r = a.end - a.start;
    let s = b.end - b.start;
    let denom = r.x * s.y - r.y * s.x;
    if denom.abs() < 1e-12 {
        return None;
    }
    let qp = b.start - a.start;
    let t = (qp.x * s.y - qp.y * s.x) / denom;
    let u = (qp.x * r.y - qp.y * r.x) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(t)
    } else {
        None
    }
}

/// Join collinear pieces that touch or overlap end to end
fn merge_collinear(mut pieces: Vec<Segment2D>, tolerance: f64) -> Vec<Segment2D> {
    let mut merged = true;
    while merged {
        merged = false;
        'outer: for i in 0..pieces.len() {
            for j in (i + 1)..pieces.len() {
                if let Some(joined) = try_join(&pieces[i], &pieces[j], tolerance) {
                    pieces[i] = joined;
                    pieces.swap_remove(j);
                    merged = true;
                    break 'outer;
                }
            }
        }
    }
    pieces
}

fn try_join(a: &Segment2D, b: &Segment2D, tolerance: f64) -> Option<Segment2D> {
    if line_distance(a, &b.start) > tolerance || line_distance(a, &b.end) > tolerance {
        return None;
    }
    let dir = a.direction();
    let len = a.length();
    let t0 = (b.start - a.start).dot(&dir);
    let t1 = (b.end - a.start).dot(&dir);
    let (lo, hi) = (t0.min(t1), t0.max(t1));
    // Disjoint along the shared line
    if lo > len + tolerance || hi < -tolerance {
        return None;
    }
    let start = lo.min(0.0);
    let end = hi.max(len);
    Some(Segment2D::new(a.start + dir * start, a.start + dir * end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_shared_segment_between_neighbours() {
        let a = Shape::rect(0.0, 0.0, 4.0, 3.0);
        let b = Shape::rect(4.0, 1.0, 7.0, 5.0);
        let seg = longest_shared_segment(&a, &b).unwrap();
        assert_abs_diff_eq!(seg.length(), 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(seg.midpoint().x, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(seg.midpoint().y, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_corner_touch_is_not_shared() {
        let a = Shape::rect(0.0, 0.0, 1.0, 1.0);
        let b = Shape::rect(1.0, 1.0, 2.0, 2.0);
        assert!(longest_shared_segment(&a, &b).is_none());
    }

    #[test]
    fn test_split_edges_are_merged() {
        // b's top edge is covered by two neighbours on a's side
        let a = Shape {
            parts: vec![
                Polygon2D::rect(0.0, 1.0, 2.0, 2.0),
                Polygon2D::rect(2.0, 1.0, 5.0, 2.0),
            ],
        };
        let b = Shape::rect(0.0, 0.0, 5.0, 1.0);
        let segs = shared_segments(&a, &b, BOUNDARY_TOLERANCE);
        assert_eq!(segs.len(), 1);
        assert_abs_diff_eq!(segs[0].length(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_exterior_segments_ignore_interior_walls() {
        let footprint = Shape::rect(0.0, 0.0, 10.0, 10.0);
        let corner_room = Shape::rect(0.0, 0.0, 4.0, 3.0);
        let segs = exterior_segments(&corner_room, &footprint);
        let mut lengths: Vec<f64> = segs.iter().map(Segment2D::length).collect();
        lengths.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(lengths.len(), 2);
        assert_abs_diff_eq!(lengths[0], 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lengths[1], 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_boundary_within_corridor_strip() {
        let zone = Shape::rect(0.0, 0.0, 6.0, 3.0);
        let corridor = segment_buffer(
            &Segment2D::new(Point2::new(-1.0, 3.0), Point2::new(10.0, 3.0)),
            0.2,
        );
        let seg = longest(boundary_within(&zone, &corridor, BOUNDARY_TOLERANCE)).unwrap();
        assert_abs_diff_eq!(seg.length(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_outward_normal_points_away() {
        let region = Shape::rect(0.0, 0.0, 4.0, 4.0);
        let bottom = Segment2D::new(Point2::new(4.0, 0.0), Point2::new(0.0, 0.0));
        let n = bottom.outward_normal(&region);
        assert!(n.y < 0.0);
    }

    #[test]
    fn test_segment_buffer_area() {
        let seg = Segment2D::new(Point2::new(0.0, 0.0), Point2::new(5.0, 0.0));
        assert_abs_diff_eq!(segment_buffer(&seg, 0.2).area(), 2.0, epsilon = 1e-9);
    }
}
