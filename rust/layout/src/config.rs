// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static configuration tables.
//!
//! Room size ranges, per-archetype band weights, door and window policies and
//! the colour palette live in one immutable [`LayoutConfig`] that is handed to
//! the engine at construction. `Default` yields the built-in tables; a JSON
//! document with the same structure can replace them.

use crate::error::{Error, Result};
use crate::room::{Archetype, RoomType, ZoneKind};
use crate::tier::{BudgetTier, TierTable, TierThresholds};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Inclusive area range in m²
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

impl SizeRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// First-level band weights; the corridor share is folded into the
/// service and private bands
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BandWeights {
    pub public: f64,
    pub service: f64,
    pub corridor: f64,
    pub private: f64,
}

impl BandWeights {
    pub const fn new(public: f64, service: f64, corridor: f64, private: f64) -> Self {
        Self {
            public,
            service,
            corridor,
            private,
        }
    }

    /// Public/service/private ratios with the corridor folded 30/70
    pub fn folded(&self) -> [f64; 3] {
        let total = self.public + self.service + self.corridor + self.private;
        let total = if total > 0.0 { total } else { 1.0 };
        [
            self.public / total,
            (self.service + 0.30 * self.corridor) / total,
            (self.private + 0.70 * self.corridor) / total,
        ]
    }
}

/// How the footprint is first divided into bands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "plan", rename_all = "snake_case")]
pub enum BandPlan {
    /// Public / service / private bands
    Zoned {
        weights: TierTable<BandWeights>,
        public_rooms: Vec<RoomType>,
        service_rooms: Vec<RoomType>,
    },
    /// Front / core / rear bands with corridors on both interfaces
    Clinical {
        front: TierTable<f64>,
        core: TierTable<f64>,
        front_rooms: Vec<RoomType>,
    },
}

/// Allowed door target in a connectivity policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DoorTarget {
    Corridor,
    Room(RoomType),
}

impl TryFrom<String> for DoorTarget {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        if value == "Corridor" {
            return Ok(DoorTarget::Corridor);
        }
        RoomType::from_label(&value)
            .map(DoorTarget::Room)
            .ok_or_else(|| format!("unknown door target: {}", value))
    }
}

impl From<DoorTarget> for String {
    fn from(value: DoorTarget) -> Self {
        match value {
            DoorTarget::Corridor => "Corridor".to_string(),
            DoorTarget::Room(room) => room.label().to_string(),
        }
    }
}

/// Which zone the vehicle access attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "value", rename_all = "snake_case")]
pub enum EntryRule {
    /// First zone of this room category
    Room(RoomType),
    /// First zone of this kind
    FirstOfKind(ZoneKind),
}

/// Per-archetype policy tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypeConfig {
    pub name: String,
    pub cost_per_sqm: f64,
    /// Default parcel width and height in metres
    pub default_parcel: [f64; 2],
    pub default_budget: f64,
    pub bands: BandPlan,
    pub door_policy: BTreeMap<RoomType, Vec<DoorTarget>>,
    pub window_rooms: Vec<RoomType>,
    /// Rooms allowed two doors instead of one
    pub hub_rooms: Vec<RoomType>,
    /// Room moved to the most central position
    pub anchor_room: RoomType,
    pub entry: EntryRule,
    pub parking_cars: u32,
    pub requires_parking: bool,
}

impl ArchetypeConfig {
    pub fn door_targets(&self, room: RoomType) -> &[DoorTarget] {
        self.door_policy.get(&room).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn max_doors_for(&self, room: RoomType) -> usize {
        if self.hub_rooms.contains(&room) {
            2
        } else {
            1
        }
    }

    pub fn allows_window(&self, room: RoomType) -> bool {
        self.window_rooms.contains(&room)
    }
}

/// Minimum zone areas below which zones are merged into a neighbour
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MergeThresholds {
    pub clinical_core: f64,
    pub clinical_rear: f64,
    pub private: f64,
}

impl Default for MergeThresholds {
    fn default() -> Self {
        Self {
            clinical_core: 24.0,
            clinical_rear: 22.0,
            private: 20.0,
        }
    }
}

/// Geometric constants of the footprint, adjacency and aperture stages (metres)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeometryThresholds {
    pub min_setback: f64,
    pub setback_ratio: f64,
    pub max_scale: f64,
    pub rounding: f64,
    pub corridor_half_width: f64,
    pub corridor_min_interface: f64,
    pub door_min_shared: f64,
    pub fallback_min_shared: f64,
    pub door_width: f64,
    pub window_min_segment: f64,
    pub window_size: f64,
    pub compact_window_size: f64,
    pub car_width: f64,
    pub car_gap: f64,
    pub min_driveway_width: f64,
    pub driveway_offset: f64,
    pub footprint_clearance: f64,
}

impl Default for GeometryThresholds {
    fn default() -> Self {
        Self {
            min_setback: 0.6,
            setback_ratio: 0.02,
            max_scale: 0.98,
            rounding: 0.35,
            corridor_half_width: 0.20,
            corridor_min_interface: 0.6,
            door_min_shared: 0.7,
            fallback_min_shared: 0.9,
            door_width: 0.9,
            window_min_segment: 1.2,
            window_size: 1.6,
            compact_window_size: 1.2,
            car_width: 2.5,
            car_gap: 0.6,
            min_driveway_width: 4.8,
            driveway_offset: 0.8,
            footprint_clearance: 0.05,
        }
    }
}

/// Fill colours keyed by zone name, then by kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palette {
    pub by_name: BTreeMap<String, String>,
    pub by_kind: BTreeMap<ZoneKind, String>,
    pub fallback: String,
}

impl Palette {
    /// Colour for a zone: exact name, then its category label, then its kind
    pub fn zone_color(&self, name: &str, room: RoomType, kind: ZoneKind) -> &str {
        self.by_name
            .get(name)
            .or_else(|| self.by_name.get(room.label()))
            .or_else(|| self.by_kind.get(&kind))
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub tiers: TierThresholds,
    pub fill_ratio: TierTable<f64>,
    pub tier_factor: TierTable<f64>,
    pub room_sizes: BTreeMap<RoomType, SizeRange>,
    pub default_room_size: SizeRange,
    /// Maximum rooms of one type grouped into a single named zone
    pub group_sizes: BTreeMap<RoomType, u32>,
    pub merge: MergeThresholds,
    pub geometry: GeometryThresholds,
    pub palette: Palette,
    pub archetypes: BTreeMap<Archetype, ArchetypeConfig>,
}

impl LayoutConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn archetype(&self, archetype: Archetype) -> Result<&ArchetypeConfig> {
        self.archetypes
            .get(&archetype)
            .ok_or_else(|| Error::Config(format!("no tables for archetype {}", archetype)))
    }

    pub fn classify(&self, budget: f64) -> BudgetTier {
        self.tiers.classify(budget)
    }

    pub fn room_size(&self, room: RoomType) -> SizeRange {
        self.room_sizes
            .get(&room)
            .copied()
            .unwrap_or(self.default_room_size)
    }

    pub fn group_size(&self, room: RoomType) -> u32 {
        self.group_sizes.get(&room).copied().unwrap_or(1).max(1)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tiers: TierThresholds::default(),
            fill_ratio: TierTable::new(0.82, 0.86, 0.90),
            tier_factor: TierTable::new(0.95, 1.0, 1.08),
            room_sizes: default_room_sizes(),
            default_room_size: SizeRange::new(10.0, 20.0),
            group_sizes: [
                (RoomType::PatientRoom, 6),
                (RoomType::Icu, 3),
                (RoomType::OperatingRoom, 2),
                (RoomType::Classroom, 4),
                (RoomType::ScienceLab, 2),
            ]
            .into_iter()
            .collect(),
            merge: MergeThresholds::default(),
            geometry: GeometryThresholds::default(),
            palette: default_palette(),
            archetypes: [
                (Archetype::House, house_config()),
                (Archetype::Hospital, hospital_config()),
                (Archetype::Company, company_config()),
                (Archetype::School, school_config()),
            ]
            .into_iter()
            .collect(),
        }
    }
}

// ============================================================================
// Built-in tables
// ============================================================================

fn default_room_sizes() -> BTreeMap<RoomType, SizeRange> {
    use RoomType::*;
    [
        // House
        (Entry, (4.0, 10.0)),
        (Living, (22.0, 45.0)),
        (Dining, (12.0, 25.0)),
        (Kitchen, (10.0, 20.0)),
        (PantryFlex, (4.0, 10.0)),
        (FamilyLounge, (12.0, 25.0)),
        (MasterBedroom, (16.0, 30.0)),
        (Bedroom, (10.0, 20.0)),
        (Study, (8.0, 16.0)),
        (Bath, (4.0, 8.0)),
        (Utility, (4.0, 10.0)),
        // Hospital
        (Reception, (22.0, 40.0)),
        (Waiting, (26.0, 55.0)),
        (Consultation, (14.0, 24.0)),
        (PatientRoom, (18.0, 28.0)),
        (Icu, (26.0, 38.0)),
        (OperatingRoom, (34.0, 48.0)),
        (Pharmacy, (12.0, 20.0)),
        (Lab, (18.0, 28.0)),
        (Radiology, (24.0, 36.0)),
        (NursesStation, (16.0, 24.0)),
        (Admin, (16.0, 26.0)),
        // Company
        (Lobby, (12.0, 25.0)),
        (OpenOffice, (40.0, 90.0)),
        (ManagerOffice, (16.0, 28.0)),
        (MeetingRoom, (18.0, 32.0)),
        (Conference, (30.0, 48.0)),
        (BreakRoom, (10.0, 18.0)),
        (ItRoom, (8.0, 15.0)),
        (PrintRoom, (6.0, 12.0)),
        (Storage, (6.0, 16.0)),
        (ServerRoom, (8.0, 16.0)),
        // School
        (Classroom, (48.0, 68.0)),
        (ScienceLab, (36.0, 54.0)),
        (ComputerLab, (30.0, 44.0)),
        (Library, (40.0, 68.0)),
        (Cafeteria, (55.0, 95.0)),
        (AdminOffice, (16.0, 28.0)),
        (Gym, (90.0, 140.0)),
        (ArtsRoom, (32.0, 44.0)),
        (Auditorium, (90.0, 140.0)),
        // Common
        (Bathroom, (4.0, 8.0)),
    ]
    .into_iter()
    .map(|(room, (min, max))| (room, SizeRange::new(min, max)))
    .collect()
}

fn default_palette() -> Palette {
    let by_name = [
        // House
        ("Entry", "#fff4cc"),
        ("Living", "#ffe6cc"),
        ("Dining", "#ffdacc"),
        ("Kitchen", "#ffeccc"),
        ("Pantry / Flex", "#f2ffcc"),
        ("Family / Lounge", "#d6ffcc"),
        ("Master Bedroom", "#cce6ff"),
        ("Bedroom", "#cce6ff"),
        ("Study", "#e6ccff"),
        ("Bath", "#ccfff9"),
        ("Utility", "#f0f0f0"),
        // Hospital
        ("Reception", "#e6f2ff"),
        ("Waiting", "#f0f8ff"),
        ("Consultation", "#e6ffe6"),
        ("Patient Room", "#fff0f5"),
        ("ICU", "#ffe6e6"),
        ("Operating Room", "#fff5ee"),
        ("Pharmacy", "#f0fff0"),
        ("Lab", "#f5f5f5"),
        ("Radiology", "#f8f8ff"),
        ("Nurses Station", "#e6f7ff"),
        ("Admin", "#f5f5f5"),
        ("Admin Office", "#f5f5f5"),
        // Company
        ("Lobby", "#f5f5f5"),
        ("Open Office", "#e6f2ff"),
        ("Manager Office", "#fff0e6"),
        ("Meeting Room", "#e6ffe6"),
        ("Conference", "#fff5e6"),
        ("Break Room", "#ffe6e6"),
        ("IT Room", "#f0f0f0"),
        ("Print Room", "#f5f5f5"),
        ("Storage", "#e6e6e6"),
        // School
        ("Classroom", "#e6f2ff"),
        ("Science Lab", "#e6ffe6"),
        ("Computer Lab", "#f0f0f0"),
        ("Library", "#fff0e6"),
        ("Gym", "#ffe6e6"),
        ("Cafeteria", "#fff5e6"),
        ("Auditorium", "#f0f8ff"),
        ("Arts Room", "#fff5f5"),
        // Common
        ("Parking", "#e0e0e0"),
        ("Bathroom", "#ccfff9"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let by_kind = [
        (ZoneKind::Public, "#ffeedd"),
        (ZoneKind::Service, "#f7ffd8"),
        (ZoneKind::Private, "#dde9ff"),
        (ZoneKind::Circulation, "#f2f2f2"),
    ]
    .into_iter()
    .map(|(k, v)| (k, v.to_string()))
    .collect();

    Palette {
        by_name,
        by_kind,
        fallback: "#dddddd".to_string(),
    }
}

fn policy(entries: &[(RoomType, &[DoorTarget])]) -> BTreeMap<RoomType, Vec<DoorTarget>> {
    entries
        .iter()
        .map(|(room, targets)| (*room, targets.to_vec()))
        .collect()
}

fn house_config() -> ArchetypeConfig {
    use DoorTarget::Room;
    use RoomType::*;
    ArchetypeConfig {
        name: "House".to_string(),
        cost_per_sqm: 2000.0,
        default_parcel: [24.0, 14.0],
        default_budget: 350_000.0,
        bands: BandPlan::Zoned {
            weights: TierTable::new(
                BandWeights::new(0.30, 0.27, 0.12, 0.31),
                BandWeights::new(0.32, 0.28, 0.13, 0.27),
                BandWeights::new(0.34, 0.28, 0.14, 0.24),
            ),
            public_rooms: vec![Entry, Living, Dining, MasterBedroom],
            service_rooms: vec![PantryFlex, Kitchen, FamilyLounge],
        },
        door_policy: policy(&[
            (Entry, &[Room(Living), Room(Kitchen)]),
            (
                Living,
                &[Room(Entry), Room(Kitchen), Room(Dining), Room(FamilyLounge)],
            ),
            (Bedroom, &[Room(Living)]),
            (MasterBedroom, &[Room(Living)]),
            (Bath, &[Room(Bedroom), Room(MasterBedroom), Room(Living)]),
            (Kitchen, &[Room(Living), Room(PantryFlex)]),
            (Study, &[Room(Living)]),
            (Utility, &[Room(Kitchen)]),
        ]),
        window_rooms: vec![
            Entry,
            Living,
            Dining,
            Kitchen,
            FamilyLounge,
            MasterBedroom,
            Study,
            Bedroom,
        ],
        hub_rooms: vec![Living, Entry],
        anchor_room: Living,
        entry: EntryRule::Room(Entry),
        parking_cars: 2,
        requires_parking: true,
    }
}

fn hospital_config() -> ArchetypeConfig {
    use DoorTarget::{Corridor, Room};
    use RoomType::*;
    ArchetypeConfig {
        name: "Hospital".to_string(),
        cost_per_sqm: 5000.0,
        default_parcel: [50.0, 40.0],
        default_budget: 2_000_000.0,
        bands: BandPlan::Clinical {
            front: TierTable::new(0.28, 0.30, 0.32),
            core: TierTable::new(0.44, 0.44, 0.46),
            front_rooms: vec![Reception, Waiting, Consultation, Admin],
        },
        door_policy: policy(&[
            (Reception, &[Room(Waiting), Room(Consultation)]),
            (Waiting, &[Room(Reception), Room(Consultation)]),
            (Consultation, &[Room(Waiting)]),
            (PatientRoom, &[Corridor]),
            (Icu, &[Corridor]),
            (NursesStation, &[Corridor]),
            (OperatingRoom, &[Corridor]),
            (Pharmacy, &[]),
            (Lab, &[]),
            (Radiology, &[]),
            (Bathroom, &[Room(Reception), Room(PatientRoom), Room(Icu)]),
            (Admin, &[Room(Reception)]),
        ]),
        window_rooms: vec![Reception, Waiting, Consultation, PatientRoom, Icu, Admin],
        hub_rooms: vec![Reception, NursesStation],
        anchor_room: Reception,
        entry: EntryRule::Room(Reception),
        parking_cars: 3,
        requires_parking: true,
    }
}

fn company_config() -> ArchetypeConfig {
    use DoorTarget::Room;
    use RoomType::*;
    ArchetypeConfig {
        name: "Office Building".to_string(),
        cost_per_sqm: 3000.0,
        default_parcel: [40.0, 30.0],
        default_budget: 800_000.0,
        bands: BandPlan::Zoned {
            weights: TierTable::new(
                BandWeights::new(0.22, 0.46, 0.12, 0.20),
                BandWeights::new(0.24, 0.44, 0.12, 0.20),
                BandWeights::new(0.26, 0.42, 0.12, 0.20),
            ),
            public_rooms: vec![Lobby, MeetingRoom, Conference],
            service_rooms: vec![OpenOffice, ManagerOffice, BreakRoom, ItRoom],
        },
        door_policy: policy(&[
            (Lobby, &[Room(OpenOffice), Room(ManagerOffice)]),
            (ManagerOffice, &[Room(Lobby), Room(OpenOffice)]),
            (OpenOffice, &[Room(Lobby), Room(ManagerOffice)]),
            (MeetingRoom, &[Room(Lobby)]),
            (Conference, &[]),
            (BreakRoom, &[]),
            (Bathroom, &[Room(OpenOffice), Room(Lobby)]),
            (Storage, &[]),
            (PrintRoom, &[]),
            (ServerRoom, &[]),
            (ItRoom, &[]),
        ]),
        window_rooms: vec![
            Lobby,
            OpenOffice,
            ManagerOffice,
            MeetingRoom,
            Conference,
            BreakRoom,
        ],
        hub_rooms: vec![Lobby, OpenOffice, ManagerOffice],
        anchor_room: ManagerOffice,
        entry: EntryRule::FirstOfKind(ZoneKind::Public),
        parking_cars: 2,
        requires_parking: true,
    }
}

fn school_config() -> ArchetypeConfig {
    use DoorTarget::{Corridor, Room};
    use RoomType::*;
    ArchetypeConfig {
        name: "School".to_string(),
        cost_per_sqm: 2500.0,
        default_parcel: [60.0, 50.0],
        default_budget: 1_500_000.0,
        bands: BandPlan::Zoned {
            weights: TierTable::new(
                BandWeights::new(0.30, 0.40, 0.15, 0.15),
                BandWeights::new(0.32, 0.38, 0.17, 0.13),
                BandWeights::new(0.35, 0.35, 0.20, 0.10),
            ),
            public_rooms: vec![AdminOffice, Library, Cafeteria],
            service_rooms: vec![ScienceLab, ComputerLab, ArtsRoom],
        },
        door_policy: policy(&[
            (AdminOffice, &[Room(Library)]),
            (Library, &[Room(AdminOffice)]),
            (Classroom, &[Corridor]),
            (ScienceLab, &[Corridor]),
            (ComputerLab, &[]),
            (Gym, &[]),
            (Cafeteria, &[]),
            (ArtsRoom, &[]),
            (Bathroom, &[Room(AdminOffice), Room(Library)]),
            (Storage, &[]),
        ]),
        window_rooms: vec![
            Classroom,
            ScienceLab,
            ComputerLab,
            Library,
            AdminOffice,
            ArtsRoom,
        ],
        hub_rooms: vec![AdminOffice, Library],
        anchor_room: AdminOffice,
        entry: EntryRule::FirstOfKind(ZoneKind::Public),
        parking_cars: 3,
        requires_parking: true,
    }
}
