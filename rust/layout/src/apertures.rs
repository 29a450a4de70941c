// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exterior window placement

use crate::config::{ArchetypeConfig, GeometryThresholds};
use crate::types::{Window, Zone};
use floorgen_geometry::{exterior_segments, Shape};

/// Windows per zone at most
const MAX_WINDOWS_PER_ZONE: usize = 2;

/// Windows on the two longest exterior walls of each eligible zone
pub fn plan_windows(
    zones: &[Zone],
    footprint: &Shape,
    policy: &ArchetypeConfig,
    geometry: &GeometryThresholds,
) -> Vec<Window> {
    let mut windows = Vec::new();

    for (index, zone) in zones.iter().enumerate() {
        if !policy.allows_window(zone.room) {
            continue;
        }
        let mut walls = exterior_segments(&zone.shape, footprint);
        walls.sort_by(|a, b| b.length().total_cmp(&a.length()));

        let base = if zone.room.is_compact_window() {
            geometry.compact_window_size
        } else {
            geometry.window_size
        };

        for wall in walls
            .iter()
            .take(MAX_WINDOWS_PER_ZONE)
            .filter(|w| w.length() > geometry.window_min_segment)
        {
            let length = wall.length();
            windows.push(Window {
                zone: zone.name.clone(),
                zone_index: index,
                center: wall.midpoint(),
                direction: wall.direction(),
                outward: wall.outward_normal(footprint),
                width: base.min(length * 0.5),
                wall_length: length,
            });
        }
    }

    tracing::debug!(windows = windows.len(), "Planned windows");
    windows
}
