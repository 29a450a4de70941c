// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone consolidation: merging undersized zones, pushing utility rooms to
//! band ends and moving the anchor room to the centre.
//!
//! Swaps exchange shapes between slots of an index-addressed zone slice;
//! targets are chosen from a snapshot taken before any swap is applied.

use crate::error::{Error, Result};
use crate::room::RoomType;
use crate::types::Zone;
use floorgen_geometry::{union, Point2};

/// Merge zones smaller than `min_area` into their nearest neighbour
///
/// Bath-like zones and zones of a `keep` type are never merged. The absorbing
/// zone keeps its own name and kind. Zones with an empty shape are dropped.
pub fn merge_small(zones: Vec<Zone>, min_area: f64, keep: &[RoomType]) -> Vec<Zone> {
    let mut zones = zones;
    let mut active = vec![true; zones.len()];

    for i in 0..zones.len() {
        if zones[i].shape.is_empty() {
            tracing::debug!(zone = %zones[i].name, "Dropping empty zone");
            active[i] = false;
            continue;
        }
        let exempt = zones[i].room.is_bath_like() || keep.contains(&zones[i].room);
        if exempt || zones[i].shape.area() >= min_area {
            continue;
        }

        match nearest_active(&zones, &active, i) {
            Ok(target) => {
                let merged = union(&zones[target].shape, &zones[i].shape);
                tracing::debug!(
                    zone = %zones[i].name,
                    area = zones[i].shape.area(),
                    into = %zones[target].name,
                    "Merged undersized zone"
                );
                zones[target].shape = merged;
                zones[target].refresh_area();
                active[i] = false;
            }
            Err(err) => tracing::debug!(error = %err, "Keeping undersized zone"),
        }
    }

    zones
        .into_iter()
        .zip(active)
        .filter(|(_, keep)| *keep)
        .map(|(mut zone, _)| {
            zone.refresh_area();
            zone
        })
        .collect()
}

/// Nearest other active zone by centroid distance
fn nearest_active(zones: &[Zone], active: &[bool], index: usize) -> Result<usize> {
    let origin = zones[index]
        .centroid()
        .ok_or_else(|| Error::NoMergeCandidate(zones[index].name.clone()))?;

    zones
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index && active[*j])
        .filter_map(|(j, z)| z.centroid().map(|c| (j, (c - origin).norm_squared())))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(j, _)| j)
        .ok_or_else(|| Error::NoMergeCandidate(zones[index].name.clone()))
}

/// Exchange the shapes (and areas) of two zones
pub fn swap_shapes(zones: &mut [Zone], a: usize, b: usize) {
    if a == b {
        return;
    }
    let (lo, hi) = (a.min(b), a.max(b));
    let (left, right) = zones.split_at_mut(hi);
    let (x, y) = (&mut left[lo], &mut right[0]);
    std::mem::swap(&mut x.shape, &mut y.shape);
    std::mem::swap(&mut x.area, &mut y.area);
}

#[derive(Clone, Copy)]
enum End {
    Left,
    Right,
}

/// Move utility zones to the ends of their band
///
/// Each utility zone takes the end (leftmost or rightmost by centroid x)
/// farther from its own position, swapping shapes with whichever zone holds
/// that end's shape at the time.
pub fn push_utility_to_edges(zones: &mut [Zone]) {
    let xs: Vec<f64> = zones
        .iter()
        .map(|z| z.centroid().map(|c| c.x).unwrap_or(0.0))
        .collect();
    let mut order: Vec<usize> = (0..zones.len()).collect();
    order.sort_by(|a, b| xs[*a].total_cmp(&xs[*b]));

    let (Some(&first), Some(&last)) = (order.first(), order.last()) else {
        return;
    };
    let (left_x, right_x) = (xs[first], xs[last]);
    let mut holder = [first, last];

    for &i in &order {
        if !zones[i].room.is_utility() {
            continue;
        }
        let end = if (xs[i] - left_x).abs() > (xs[i] - right_x).abs() {
            End::Left
        } else {
            End::Right
        };
        let (this, other) = match end {
            End::Left => (0, 1),
            End::Right => (1, 0),
        };

        let h = holder[this];
        if h == i {
            continue;
        }
        swap_shapes(zones, i, h);
        tracing::debug!(zone = %zones[i].name, with = %zones[h].name, "Pushed utility zone to band end");
        holder[this] = i;
        if holder[other] == i {
            holder[other] = h;
        }
    }
}

/// Swap the first `anchor` zone with the zone closest to `center`
///
/// Returns `true` when a swap happened.
pub fn centralize(zones: &mut [Zone], anchor: RoomType, center: Point2<f64>) -> bool {
    let Some(anchor_index) = zones.iter().position(|z| z.room == anchor) else {
        return false;
    };
    let best = zones
        .iter()
        .enumerate()
        .filter_map(|(j, z)| z.centroid().map(|c| (j, (c - center).norm_squared())))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(j, _)| j);

    match best {
        Some(j) if j != anchor_index => {
            tracing::debug!(anchor = %zones[anchor_index].name, with = %zones[j].name, "Centralized anchor room");
            swap_shapes(zones, anchor_index, j);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::ZoneKind;
    use approx::assert_relative_eq;
    use floorgen_geometry::Shape;

    fn strip_zone(name: &str, room: RoomType, x0: f64, x1: f64) -> Zone {
        Zone::new(name, room, ZoneKind::Private, 0.0, Shape::rect(x0, 0.0, x1, 4.0))
    }

    #[test]
    fn test_small_zone_merges_into_nearest() {
        let zones = vec![
            strip_zone("Bedroom 1", RoomType::Bedroom, 0.0, 6.0),
            strip_zone("Utility", RoomType::Utility, 6.0, 8.0),
            strip_zone("Study", RoomType::Study, 8.0, 20.0),
        ];
        let merged = merge_small(zones, 20.0, &[]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "Bedroom 1");
        assert_relative_eq!(merged[0].area, 32.0, epsilon = 1e-6);
        assert_relative_eq!(merged[1].area, 48.0, epsilon = 1e-6);
    }

    #[test]
    fn test_bath_zones_survive_merge() {
        let zones = vec![
            strip_zone("Bedroom 1", RoomType::Bedroom, 0.0, 6.0),
            strip_zone("Bath 1", RoomType::Bath, 6.0, 7.0),
            strip_zone("Bath 2", RoomType::Bath, 7.0, 8.0),
        ];
        let merged = merge_small(zones, 20.0, &[]);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.iter().filter(|z| z.room == RoomType::Bath).count(), 2);
    }

    #[test]
    fn test_provisioned_bedrooms_survive_merge() {
        let zones = vec![
            strip_zone("Utility", RoomType::Utility, 0.0, 2.0),
            strip_zone("Bedroom 1", RoomType::Bedroom, 2.0, 5.0),
            strip_zone("Bedroom 2", RoomType::Bedroom, 5.0, 8.0),
            strip_zone("Study", RoomType::Study, 8.0, 14.0),
        ];
        let merged = merge_small(zones, 20.0, &[RoomType::Bedroom]);
        let names: Vec<&str> = merged.iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, ["Bedroom 1", "Bedroom 2", "Study"]);
        assert_relative_eq!(merged[0].area, 20.0, epsilon = 1e-6);
        assert_relative_eq!(merged[1].area, 12.0, epsilon = 1e-6);
    }

    #[test]
    fn test_lone_small_zone_is_kept() {
        let merged = merge_small(vec![strip_zone("Utility", RoomType::Utility, 0.0, 1.0)], 20.0, &[]);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_utility_moves_to_far_end() {
        let mut zones = vec![
            strip_zone("Storage 1", RoomType::Storage, 0.0, 2.0),
            strip_zone("Open Office", RoomType::OpenOffice, 2.0, 12.0),
            strip_zone("Break Room", RoomType::BreakRoom, 12.0, 16.0),
        ];
        push_utility_to_edges(&mut zones);
        // Storage started at the left end, so it takes the right end
        let c = zones[0].centroid().unwrap();
        assert_relative_eq!(c.x, 14.0, epsilon = 1e-9);
        let c = zones[2].centroid().unwrap();
        assert_relative_eq!(c.x, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_anchor_takes_central_slot() {
        let mut zones = vec![
            strip_zone("Living", RoomType::Living, 0.0, 4.0),
            strip_zone("Kitchen", RoomType::Kitchen, 4.0, 8.0),
            strip_zone("Dining", RoomType::Dining, 8.0, 12.0),
        ];
        assert!(centralize(&mut zones, RoomType::Living, Point2::new(6.0, 2.0)));
        let c = zones[0].centroid().unwrap();
        assert_relative_eq!(c.x, 6.0, epsilon = 1e-9);
        assert!(!centralize(&mut zones, RoomType::Living, Point2::new(6.0, 2.0)));
    }
}
