// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room programs
//!
//! Expands an archetype's count policy into ordered lists of named entries.
//! Counts of repeated rooms scale with the footprint area; large repeated
//! types are grouped into named instances ("Patient Ward 1" holds up to six
//! patient rooms) whose target area is multiplied by the group size.

use crate::config::LayoutConfig;
use crate::partition::scaled_room_area;
use crate::room::{Archetype, RoomType};
use crate::tier::BudgetTier;
use crate::types::HouseOptions;
use rand::Rng;
use std::collections::BTreeMap;

/// One named zone to be instantiated
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramItem {
    pub name: String,
    pub room: RoomType,
    /// Rooms represented by this entry
    pub multiplier: u32,
}

impl ProgramItem {
    pub fn single(room: RoomType) -> Self {
        Self {
            name: room.label().to_string(),
            room,
            multiplier: 1,
        }
    }
}

/// Room counts by type
#[derive(Debug, Clone, Default)]
pub struct RoomCounts(BTreeMap<RoomType, u32>);

impl RoomCounts {
    pub fn get(&self, room: RoomType) -> u32 {
        self.0.get(&room).copied().unwrap_or(0)
    }

    fn set(&mut self, room: RoomType, count: u32) {
        self.0.insert(room, count);
    }
}

fn scaled(area: f64, per: f64, offset: u32, lo: u32, hi: u32) -> u32 {
    let n = (area / per).max(0.0) as u32 + offset;
    n.clamp(lo, hi)
}

/// Area-driven counts of repeated rooms
pub fn smart_counts(archetype: Archetype, area: f64, house: &HouseOptions) -> RoomCounts {
    let mut counts = RoomCounts::default();
    match archetype {
        Archetype::Hospital => {
            counts.set(RoomType::PatientRoom, scaled(area, 160.0, 0, 10, 24));
            counts.set(RoomType::Icu, scaled(area, 1200.0, 2, 2, 6));
            counts.set(RoomType::OperatingRoom, scaled(area, 1800.0, 2, 2, 4));
            counts.set(RoomType::Bathroom, scaled(area, 2200.0, 2, 2, 3));
        }
        Archetype::Company => {
            counts.set(RoomType::Storage, scaled(area, 1400.0, 1, 1, 2));
            counts.set(RoomType::Bathroom, scaled(area, 2000.0, 1, 1, 2));
            counts.set(RoomType::ServerRoom, scaled(area, 2200.0, 1, 1, 2));
            counts.set(RoomType::PrintRoom, scaled(area, 2500.0, 1, 1, 2));
        }
        Archetype::School => {
            counts.set(RoomType::Classroom, scaled(area, 500.0, 6, 6, 10));
            counts.set(RoomType::ScienceLab, scaled(area, 3500.0, 2, 2, 4));
            counts.set(RoomType::Bathroom, scaled(area, 3000.0, 1, 1, 2));
            counts.set(RoomType::Storage, scaled(area, 3000.0, 1, 1, 2));
        }
        Archetype::House => {
            // The master bedroom sits in the public band and counts as one
            counts.set(RoomType::Bedroom, house.bedrooms.saturating_sub(1).max(2));
            counts.set(RoomType::Bath, house.baths.max(2));
            counts.set(RoomType::Study, u32::from(house.with_study));
            counts.set(RoomType::Utility, 1);
        }
    }
    counts
}

/// Room types provisioned at a minimum count, kept through the merge pass
pub fn provisioned_rooms(archetype: Archetype) -> &'static [RoomType] {
    match archetype {
        Archetype::House => &[RoomType::Bedroom],
        _ => &[],
    }
}

/// Split `total` rooms into groups of at most `per_group`
pub fn group_rooms(room: RoomType, total: u32, per_group: u32) -> Vec<ProgramItem> {
    let label = room.group_label().unwrap_or(room.label());
    let per_group = per_group.max(1);
    let mut items = Vec::new();
    let mut remaining = total;
    let mut index = 1;
    while remaining > 0 {
        let k = remaining.min(per_group);
        items.push(ProgramItem {
            name: format!("{} {}", label, index),
            room,
            multiplier: k,
        });
        remaining -= k;
        index += 1;
    }
    items
}

/// `count` numbered single rooms ("Bathroom 1", "Bathroom 2", ...)
pub fn numbered(room: RoomType, count: u32) -> Vec<ProgramItem> {
    (1..=count)
        .map(|i| ProgramItem {
            name: format!("{} {}", room.label(), i),
            room,
            multiplier: 1,
        })
        .collect()
}

pub fn singles(rooms: &[RoomType]) -> Vec<ProgramItem> {
    rooms.iter().copied().map(ProgramItem::single).collect()
}

/// Private band of a zoned archetype
pub fn private_program(archetype: Archetype, counts: &RoomCounts, config: &LayoutConfig) -> Vec<ProgramItem> {
    let mut items = Vec::new();
    match archetype {
        Archetype::House => {
            items.push(ProgramItem::single(RoomType::Utility));
            items.extend(numbered(RoomType::Bedroom, counts.get(RoomType::Bedroom)));
            items.extend(numbered(RoomType::Bath, counts.get(RoomType::Bath)));
            if counts.get(RoomType::Study) > 0 {
                items.push(ProgramItem::single(RoomType::Study));
            }
        }
        Archetype::Company => {
            for room in [
                RoomType::Storage,
                RoomType::Bathroom,
                RoomType::ServerRoom,
                RoomType::PrintRoom,
            ] {
                items.extend(numbered(room, counts.get(room)));
            }
        }
        Archetype::School => {
            for room in [RoomType::Classroom, RoomType::ScienceLab] {
                items.extend(group_rooms(room, counts.get(room), config.group_size(room)));
            }
            items.extend(numbered(RoomType::Bathroom, counts.get(RoomType::Bathroom)));
            items.extend(numbered(RoomType::Storage, counts.get(RoomType::Storage)));
            items.push(ProgramItem::single(RoomType::Gym));
        }
        Archetype::Hospital => {}
    }
    items
}

/// Hospital core band: wards, ICU units and the nurses' station
pub fn clinical_core_program(counts: &RoomCounts, config: &LayoutConfig) -> Vec<ProgramItem> {
    let mut items = Vec::new();
    for room in [RoomType::PatientRoom, RoomType::Icu] {
        items.extend(group_rooms(room, counts.get(room), config.group_size(room)));
    }
    items.push(ProgramItem::single(RoomType::NursesStation));
    items
}

/// Hospital rear band: theatres, diagnostics and bathrooms
pub fn clinical_rear_program(counts: &RoomCounts, config: &LayoutConfig) -> Vec<ProgramItem> {
    let mut items = group_rooms(
        RoomType::OperatingRoom,
        counts.get(RoomType::OperatingRoom),
        config.group_size(RoomType::OperatingRoom),
    );
    items.extend(singles(&[RoomType::Radiology, RoomType::Lab, RoomType::Pharmacy]));
    items.extend(numbered(RoomType::Bathroom, counts.get(RoomType::Bathroom)));
    items
}

/// Sampled target area for each item, scaled by its multiplier
pub fn target_areas<R: Rng + ?Sized>(
    items: &[ProgramItem],
    config: &LayoutConfig,
    footprint_area: f64,
    tier: BudgetTier,
    rng: &mut R,
) -> Vec<f64> {
    items
        .iter()
        .map(|item| {
            f64::from(item.multiplier) * scaled_room_area(config, item.room, footprint_area, tier, rng)
        })
        .collect()
}
