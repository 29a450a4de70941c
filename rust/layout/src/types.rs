// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout inputs and outputs
//!
//! Geometry is exported as nested coordinate arrays: a shape is a list of
//! parts, each part a list of rings (outer first, then holes), each ring a
//! list of `[x, y]` pairs.

use crate::room::{Archetype, RoomType, ZoneKind};
use crate::tier::BudgetTier;
use floorgen_geometry::{Point2, Shape, Vector2};
use serde::{Serialize, Serializer};

/// A room region
#[derive(Debug, Clone, Serialize)]
pub struct Zone {
    /// Unique display label ("Bedroom 2", "Patient Ward 1")
    pub name: String,
    /// Category the name normalises to
    pub room: RoomType,
    pub kind: ZoneKind,
    /// Target area the zone was partitioned with
    pub weight: f64,
    #[serde(serialize_with = "serialize_shape")]
    pub shape: Shape,
    pub area: f64,
    pub color: String,
}

impl Zone {
    pub fn new(name: impl Into<String>, room: RoomType, kind: ZoneKind, weight: f64, shape: Shape) -> Self {
        let area = shape.area();
        Self {
            name: name.into(),
            room,
            kind,
            weight,
            shape,
            area,
            color: String::new(),
        }
    }

    pub fn centroid(&self) -> Option<Point2<f64>> {
        self.shape.centroid()
    }

    pub fn refresh_area(&mut self) {
        self.area = self.shape.area();
    }
}

/// House-only program options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HouseOptions {
    pub bedrooms: u32,
    pub baths: u32,
    pub with_study: bool,
}

impl Default for HouseOptions {
    fn default() -> Self {
        Self {
            bedrooms: 3,
            baths: 2,
            with_study: true,
        }
    }
}

/// Input of one layout run
#[derive(Debug, Clone)]
pub struct LayoutRequest {
    pub archetype: Archetype,
    pub parcel: Shape,
    pub budget: f64,
    pub house: HouseOptions,
    pub seed: u64,
}

impl LayoutRequest {
    pub fn new(archetype: Archetype, parcel: Shape, budget: f64, seed: u64) -> Self {
        Self {
            archetype,
            parcel,
            budget,
            house: HouseOptions::default(),
            seed,
        }
    }

    pub fn with_house_options(mut self, house: HouseOptions) -> Self {
        self.house = house;
        self
    }
}

/// Which step of door resolution produced a door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorRule {
    Corridor,
    Policy,
    Fallback,
}

/// Door placement between a zone and a neighbour or corridor
#[derive(Debug, Clone, Serialize)]
pub struct Door {
    pub from: String,
    pub from_index: usize,
    /// Neighbour zone name, or "Corridor"
    pub to: String,
    /// Neighbour zone index; `None` for corridor doors
    pub to_index: Option<usize>,
    pub corridor_index: Option<usize>,
    pub rule: DoorRule,
    #[serde(serialize_with = "serialize_point")]
    pub center: Point2<f64>,
    /// Unit vector along the wall
    #[serde(serialize_with = "serialize_vector")]
    pub direction: Vector2<f64>,
    /// Unit vector toward the side the leaf swings into
    #[serde(serialize_with = "serialize_vector")]
    pub swing: Vector2<f64>,
    pub width: f64,
    pub wall_length: f64,
}

/// Exterior window on a zone wall
#[derive(Debug, Clone, Serialize)]
pub struct Window {
    pub zone: String,
    pub zone_index: usize,
    #[serde(serialize_with = "serialize_point")]
    pub center: Point2<f64>,
    #[serde(serialize_with = "serialize_vector")]
    pub direction: Vector2<f64>,
    /// Unit vector pointing out of the building
    #[serde(serialize_with = "serialize_vector")]
    pub outward: Vector2<f64>,
    pub width: f64,
    pub wall_length: f64,
}

/// Share of usable area taken by one zone
#[derive(Debug, Clone, Serialize)]
pub struct AreaShare {
    pub name: String,
    pub area: f64,
    pub percent: f64,
}

/// Aggregate metrics of a layout
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub footprint_area: f64,
    pub usable_area: f64,
    /// usable / footprint × 100
    pub efficiency: f64,
    pub estimated_cost: f64,
    pub budget: f64,
    pub within_budget: bool,
    pub breakdown: Vec<AreaShare>,
}

impl Summary {
    pub fn from_zones(zones: &[Zone], footprint_area: f64, cost_per_sqm: f64, budget: f64) -> Self {
        let usable_area: f64 = zones.iter().map(|z| z.area).sum();
        let efficiency = if footprint_area > 0.0 {
            usable_area / footprint_area * 100.0
        } else {
            0.0
        };
        let estimated_cost = footprint_area * cost_per_sqm;
        let breakdown = zones
            .iter()
            .filter(|z| z.area > 0.0)
            .map(|z| AreaShare {
                name: z.name.clone(),
                area: z.area,
                percent: if usable_area > 0.0 {
                    z.area / usable_area * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        Self {
            footprint_area,
            usable_area,
            efficiency,
            estimated_cost,
            budget,
            within_budget: estimated_cost <= budget,
            breakdown,
        }
    }
}

/// Complete output of one layout run
#[derive(Debug, Clone, Serialize)]
pub struct LayoutResult {
    pub archetype: Archetype,
    pub tier: BudgetTier,
    pub fill_ratio: f64,
    pub seed: u64,
    #[serde(serialize_with = "serialize_shape")]
    pub parcel: Shape,
    #[serde(serialize_with = "serialize_shape")]
    pub footprint: Shape,
    pub zones: Vec<Zone>,
    #[serde(serialize_with = "serialize_shapes")]
    pub corridors: Vec<Shape>,
    #[serde(serialize_with = "serialize_optional_shape")]
    pub parking: Option<Shape>,
    pub doors: Vec<Door>,
    pub windows: Vec<Window>,
    pub summary: Summary,
}

impl LayoutResult {
    pub fn zone(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name == name)
    }

    pub fn zones_of(&self, room: RoomType) -> impl Iterator<Item = &Zone> {
        self.zones.iter().filter(move |z| z.room == room)
    }

    /// Doors placed on behalf of the zone at `index`
    pub fn doors_from(&self, index: usize) -> usize {
        self.doors.iter().filter(|d| d.from_index == index).count()
    }
}

// ============================================================================
// Geometry serialisation
// ============================================================================

/// Parts → rings → `[x, y]` pairs
pub fn shape_rings(shape: &Shape) -> Vec<Vec<Vec<[f64; 2]>>> {
    shape
        .parts
        .iter()
        .map(|part| {
            part.rings()
                .map(|ring| ring.iter().map(|p| [p.x, p.y]).collect())
                .collect()
        })
        .collect()
}

fn serialize_shape<S: Serializer>(shape: &Shape, serializer: S) -> Result<S::Ok, S::Error> {
    shape_rings(shape).serialize(serializer)
}

fn serialize_shapes<S: Serializer>(shapes: &[Shape], serializer: S) -> Result<S::Ok, S::Error> {
    let rings: Vec<_> = shapes.iter().map(shape_rings).collect();
    rings.serialize(serializer)
}

fn serialize_optional_shape<S: Serializer>(
    shape: &Option<Shape>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    shape.as_ref().map(shape_rings).serialize(serializer)
}

fn serialize_point<S: Serializer>(p: &Point2<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    [p.x, p.y].serialize(serializer)
}

fn serialize_vector<S: Serializer>(v: &Vector2<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    [v.x, v.y].serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn zone(name: &str, room: RoomType, w: f64) -> Zone {
        Zone::new(name, room, ZoneKind::Public, 0.0, Shape::rect(0.0, 0.0, w, 1.0))
    }

    #[test]
    fn test_summary_efficiency_and_breakdown() {
        let zones = vec![zone("Living", RoomType::Living, 30.0), zone("Entry", RoomType::Entry, 10.0)];
        let summary = Summary::from_zones(&zones, 50.0, 2000.0, 120_000.0);
        assert_relative_eq!(summary.usable_area, 40.0, epsilon = 1e-9);
        assert_relative_eq!(summary.efficiency, 80.0, epsilon = 1e-9);
        assert_relative_eq!(summary.estimated_cost, 100_000.0, epsilon = 1e-6);
        assert!(summary.within_budget);
        assert_relative_eq!(summary.breakdown[0].percent, 75.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zone_serialises_shape_as_rings() {
        let z = zone("Study", RoomType::Study, 2.0);
        let value = serde_json::to_value(&z).unwrap();
        assert_eq!(value["room"], "Study");
        assert_eq!(value["kind"], "public");
        let rings = value["shape"].as_array().unwrap();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0][0].as_array().unwrap().len(), 4);
    }
}
