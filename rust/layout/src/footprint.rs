// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Footprint derivation
//!
//! The buildable footprint is the parcel's minimum rotated rectangle scaled
//! down to the target fill ratio, clipped to a setback inset of the parcel and
//! rounded outward at the corners.

use crate::config::GeometryThresholds;
use crate::error::{Error, Result};
use floorgen_geometry::{buffer, intersection, minimum_rotated_rectangle, scale_about, Shape};

/// Setback distance for a parcel of the given area
pub fn setback_for(parcel_area: f64, geometry: &GeometryThresholds) -> f64 {
    geometry
        .min_setback
        .max(geometry.setback_ratio * parcel_area.max(0.0).sqrt())
}

/// Inset of the parcel that is guaranteed to be non-empty
///
/// Tries the full setback, then half of it, then a centred rectangle of 30%
/// of the parcel's extents (at least 4 m per side).
pub fn safe_inner(parcel: &Shape, setback: f64) -> Shape {
    for offset in [setback, setback * 0.5] {
        match inset(parcel, offset) {
            Ok(inner) => return inner,
            Err(err) => tracing::debug!(error = %err, "Setback inset degenerate, retrying"),
        }
    }

    let (Some(center), Some(bounds)) = (parcel.centroid(), parcel.bounds()) else {
        return Shape::empty();
    };
    let w = (bounds.width() * 0.3).max(4.0);
    let h = (bounds.height() * 0.3).max(4.0);
    tracing::warn!(width = w, height = h, "Parcel too thin for a setback, using centred box");
    Shape::rect(
        center.x - w / 2.0,
        center.y - h / 2.0,
        center.x + w / 2.0,
        center.y + h / 2.0,
    )
}

fn inset(parcel: &Shape, offset: f64) -> Result<Shape> {
    let inner = buffer(parcel, -offset);
    if inner.is_empty() {
        return Err(Error::DegenerateRegion { offset });
    }
    Ok(inner)
}

/// Derive the building footprint for a parcel at the given fill ratio
pub fn derive_footprint(parcel: &Shape, fill_ratio: f64, geometry: &GeometryThresholds) -> Result<Shape> {
    let site_area = parcel.area();
    let inner = safe_inner(parcel, setback_for(site_area, geometry));

    let mbr = minimum_rotated_rectangle(parcel)
        .ok_or_else(|| Error::Config("parcel has no bounding rectangle".to_string()))?;
    let mbr_area = mbr.area();
    let (origin, _) = mbr
        .centroid_and_area()
        .ok_or(Error::DegenerateRegion { offset: 0.0 })?;

    let factor = geometry
        .max_scale
        .min((site_area * fill_ratio / mbr_area.max(1e-6)).sqrt());
    let core = intersection(&scale_about(&Shape::from_polygon(mbr), factor, origin), &inner);
    let rounded = intersection(&buffer(&core, geometry.rounding), &inner);

    let footprint = if rounded.is_empty() {
        tracing::warn!("Scaled footprint missed the inset region, using the inset itself");
        inner.largest_part()
    } else {
        rounded.largest_part()
    };

    tracing::debug!(
        site_area,
        fill_ratio,
        scale = factor,
        footprint_area = footprint.area(),
        "Derived footprint"
    );
    Ok(footprint)
}
