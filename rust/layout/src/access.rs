// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vehicle access: a driveway rectangle in front of the entry zone, clipped
//! to the parcel and kept clear of the footprint.

use crate::config::{EntryRule, GeometryThresholds};
use crate::error::{Error, Result};
use crate::types::Zone;
use floorgen_geometry::{buffer, difference, exterior_segments, intersection, longest, Polygon2D, Shape};

/// Index of the zone the driveway attaches to
pub fn entry_zone(zones: &[Zone], rule: EntryRule) -> Result<usize> {
    zones
        .iter()
        .position(|z| match rule {
            EntryRule::Room(room) => z.room == room,
            EntryRule::FirstOfKind(kind) => z.kind == kind,
        })
        .ok_or(Error::NoEntryZone)
}

/// Driveway polygon for `cars` vehicles in front of `entry`
pub fn place_driveway(
    parcel: &Shape,
    footprint: &Shape,
    entry: &Shape,
    cars: u32,
    geometry: &GeometryThresholds,
) -> Result<Shape> {
    let wall = longest(exterior_segments(entry, footprint))
        .ok_or_else(|| Error::NoSharedBoundary("entry".to_string(), "footprint exterior".to_string()))?;

    let cars_f = f64::from(cars.max(1));
    let width = (geometry.car_width * cars_f + geometry.car_gap * (cars_f - 1.0))
        .max(geometry.min_driveway_width);
    let depth = if cars <= 1 { 3.2 } else { 5.0 };
    let take = (wall.length() * 0.6).min(width);

    let mid = wall.midpoint();
    let u = wall.direction();
    let n = wall.outward_normal(footprint);
    let reach = n * (depth + geometry.driveway_offset);
    let c0 = mid - u * (take / 2.0);
    let c1 = mid + u * (take / 2.0);
    let pad = Shape::from_polygon(Polygon2D::new(vec![c0, c1, c1 + reach, c0 + reach]));

    let clearance = buffer(footprint, geometry.footprint_clearance);
    let parking = difference(&intersection(&pad, parcel), &clearance).largest_part();
    if parking.is_empty() {
        return Err(Error::NoValidAccessIntersection);
    }
    tracing::debug!(cars, area = parking.area(), "Placed driveway");
    Ok(parking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::{RoomType, ZoneKind};
    use approx::assert_relative_eq;

    #[test]
    fn test_driveway_sits_outside_footprint() {
        let parcel = Shape::rect(0.0, 0.0, 30.0, 20.0);
        let footprint = Shape::rect(2.0, 8.0, 28.0, 18.0);
        let entry = Shape::rect(10.0, 8.0, 20.0, 12.0);
        let g = GeometryThresholds::default();
        let parking = place_driveway(&parcel, &footprint, &entry, 2, &g).unwrap();

        // Two cars: 5.6 m wide, 5.8 m deep minus the clearance strip
        assert_relative_eq!(parking.area(), 5.6 * (5.8 - 0.05), epsilon = 1e-3);
        assert!(intersection(&parking, &footprint).area() < 1e-9);
        assert!(difference(&parking, &parcel).area() < 1e-9);
    }

    #[test]
    fn test_driveway_clipped_away_is_an_error() {
        let parcel = Shape::rect(0.0, 0.0, 10.0, 10.0);
        let entry = Shape::rect(0.0, 0.0, 4.0, 10.0);
        // The footprint fills the parcel, nothing is left outside
        let err = place_driveway(&parcel, &parcel, &entry, 2, &GeometryThresholds::default());
        assert!(matches!(err, Err(Error::NoValidAccessIntersection)));
    }

    #[test]
    fn test_entry_rules() {
        let zones = vec![
            Zone::new("Dining", RoomType::Dining, ZoneKind::Public, 0.0, Shape::rect(0.0, 0.0, 1.0, 1.0)),
            Zone::new("Entry", RoomType::Entry, ZoneKind::Public, 0.0, Shape::rect(1.0, 0.0, 2.0, 1.0)),
        ];
        assert_eq!(entry_zone(&zones, EntryRule::Room(RoomType::Entry)).unwrap(), 1);
        assert_eq!(entry_zone(&zones, EntryRule::FirstOfKind(ZoneKind::Public)).unwrap(), 0);
        assert!(matches!(
            entry_zone(&zones, EntryRule::FirstOfKind(ZoneKind::Circulation)),
            Err(Error::NoEntryZone)
        ));
    }
}
