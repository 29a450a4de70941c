//! Floorgen Geometry
//!
//! Planar polygon kernel for the floor plan generator: multi-part shapes,
//! boolean operations via i_overlay, offsetting via clipper2, oriented
//! bounds, and shared-boundary segment queries built on nalgebra points.

pub mod bool2d;
pub mod error;
pub mod offset;
pub mod polygon;
pub mod segment;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};

pub use bool2d::{difference, intersection, union, union_all};
pub use error::{Error, Result};
pub use offset::buffer;
pub use polygon::{Bounds2D, Polygon2D, Shape};
pub use segment::{
    boundary_within, exterior_segments, longest, longest_shared_segment, segment_buffer,
    shared_segments, Segment2D, BOUNDARY_TOLERANCE, MIN_SHARED_LENGTH,
};
pub use transform::{convex_hull, minimum_rotated_rectangle, scale_about};

/// Validate that a shape is usable as a region input
pub fn validate_region(shape: &Shape) -> Result<()> {
    if shape.parts.iter().any(|p| p.outer.len() < 3) {
        return Err(Error::InvalidPolygon(
            "Polygon must have at least 3 vertices".to_string(),
        ));
    }
    if shape.is_empty() {
        return Err(Error::EmptyResult("Region has zero area".to_string()));
    }
    Ok(())
}
