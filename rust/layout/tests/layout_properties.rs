// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout-wide properties checked across archetypes, parcel shapes and seeds

use approx::assert_relative_eq;
use floorgen_geometry::{difference, intersection};
use floorgen_layout::{
    classify_budget, generate_layout, make_parcel, Archetype, BudgetTier, HouseOptions, LayoutConfig,
    LayoutEngine, LayoutRequest, LayoutResult, ParcelShape, RoomType,
};
use std::collections::HashSet;

const SHAPES: [ParcelShape; 6] = [
    ParcelShape::Rectangle,
    ParcelShape::Square,
    ParcelShape::Triangle,
    ParcelShape::LShape,
    ParcelShape::Irregular,
    ParcelShape::Courtyard,
];

const SEEDS: [u64; 3] = [1, 42, 977];

fn generate(archetype: Archetype, shape: ParcelShape, budget: Option<f64>, seed: u64) -> LayoutResult {
    let engine = LayoutEngine::default();
    let tables = engine.config().archetype(archetype).unwrap();
    let [w, h] = tables.default_parcel;
    let budget = budget.unwrap_or(tables.default_budget);
    let request = LayoutRequest::new(archetype, make_parcel(shape, w, h), budget, seed);
    engine.generate(&request).unwrap()
}

fn for_each_layout(mut check: impl FnMut(&LayoutResult, &str)) {
    for archetype in Archetype::ALL {
        for shape in SHAPES {
            for seed in SEEDS {
                let layout = generate(archetype, shape, None, seed);
                let label = format!("{} {} seed {}", archetype, shape, seed);
                check(&layout, &label);
            }
        }
    }
}

#[test]
fn test_zones_do_not_overlap_and_stay_in_footprint() {
    for_each_layout(|layout, label| {
        for (i, a) in layout.zones.iter().enumerate() {
            let outside = difference(&a.shape, &layout.footprint).area();
            assert!(outside < 0.01, "{}: {} leaks {:.4} m²", label, a.name, outside);
            for b in &layout.zones[i + 1..] {
                let overlap = intersection(&a.shape, &b.shape).area();
                assert!(
                    overlap < 0.01,
                    "{}: {} overlaps {} by {:.4} m²",
                    label,
                    a.name,
                    b.name,
                    overlap
                );
            }
        }
    });
}

#[test]
fn test_usable_area_bounded_by_footprint() {
    for_each_layout(|layout, label| {
        let footprint_area = layout.footprint.area();
        assert!(layout.zones.iter().all(|z| z.area > 0.0), "{}", label);
        assert!(
            layout.summary.usable_area <= footprint_area + 0.01,
            "{}: usable {:.2} > footprint {:.2}",
            label,
            layout.summary.usable_area,
            footprint_area
        );
        assert!(footprint_area <= layout.parcel.area(), "{}", label);
        assert!(difference(&layout.footprint, &layout.parcel).area() < 1e-6, "{}", label);
    });
}

#[test]
fn test_rectangular_footprint_respects_fill_ratio() {
    for archetype in Archetype::ALL {
        let layout = generate(archetype, ParcelShape::Rectangle, None, 7);
        let cap = layout.parcel.area() * layout.fill_ratio;
        // Corner rounding can add a thin rim beyond the scaled rectangle
        assert!(
            layout.footprint.area() <= cap * 1.05,
            "{}: footprint {:.1} over {:.1}",
            archetype,
            layout.footprint.area(),
            cap
        );
    }
}

#[test]
fn test_door_counts_within_budget() {
    let config = LayoutConfig::default();
    for_each_layout(|layout, label| {
        let tables = config.archetype(layout.archetype).unwrap();
        for (i, zone) in layout.zones.iter().enumerate() {
            let placed = layout.doors_from(i);
            assert!(
                placed <= tables.max_doors_for(zone.room),
                "{}: {} has {} doors",
                label,
                zone.name,
                placed
            );
        }
    });
}

#[test]
fn test_zone_pairs_share_at_most_one_door() {
    for_each_layout(|layout, label| {
        let mut pairs = HashSet::new();
        for door in &layout.doors {
            if let Some(to) = door.to_index {
                let pair = (door.from_index.min(to), door.from_index.max(to));
                assert!(pairs.insert(pair), "{}: {} and {} joined twice", label, door.from, door.to);
            }
        }
    });
}

#[test]
fn test_parking_outside_footprint_and_inside_parcel() {
    for_each_layout(|layout, label| {
        if let Some(parking) = &layout.parking {
            assert!(parking.area() > 0.0, "{}", label);
            assert!(intersection(parking, &layout.footprint).area() < 1e-6, "{}", label);
            assert!(difference(parking, &layout.parcel).area() < 1e-6, "{}", label);
        }
    });
}

#[test]
fn test_houses_keep_two_baths() {
    let engine = LayoutEngine::default();
    let house = HouseOptions {
        bedrooms: 2,
        baths: 1,
        with_study: true,
    };
    for shape in SHAPES {
        for seed in SEEDS {
            let request = LayoutRequest::new(
                Archetype::House,
                make_parcel(shape, 24.0, 14.0),
                350_000.0,
                seed,
            )
            .with_house_options(house);
            let layout = engine.generate(&request).unwrap();
            assert!(layout.zones_of(RoomType::Bath).count() >= 2, "{} seed {}", shape, seed);
            assert_eq!(layout.zones_of(RoomType::Bedroom).count(), 2, "{} seed {}", shape, seed);
        }
    }
}

#[test]
fn test_requested_bathrooms_survive_merging() {
    for_each_layout(|layout, label| {
        let baths = layout
            .zones
            .iter()
            .filter(|z| z.room.is_bath_like())
            .count();
        assert!(baths >= 1, "{}: no bathrooms", label);
    });
}

#[test]
fn test_same_seed_same_layout() {
    for archetype in Archetype::ALL {
        let a = generate(archetype, ParcelShape::LShape, None, 4242);
        let b = generate(archetype, ParcelShape::LShape, None, 4242);
        assert_eq!(a.zones.len(), b.zones.len());
        for (za, zb) in a.zones.iter().zip(&b.zones) {
            assert_eq!(za.name, zb.name);
            assert_eq!(za.shape, zb.shape);
            assert_relative_eq!(za.area, zb.area, epsilon = 1e-9);
        }
        assert_eq!(a.doors.len(), b.doors.len());
        assert_eq!(a.windows.len(), b.windows.len());
    }
}

#[test]
fn test_house_scenario_24_by_14() {
    let layout = generate(Archetype::House, ParcelShape::Rectangle, Some(350_000.0), 42);
    assert_eq!(layout.tier, BudgetTier::Medium);

    for room in [
        RoomType::Entry,
        RoomType::Living,
        RoomType::Dining,
        RoomType::MasterBedroom,
        RoomType::Kitchen,
        RoomType::PantryFlex,
        RoomType::FamilyLounge,
    ] {
        assert_eq!(layout.zones_of(room).count(), 1, "{}", room);
    }
    assert_eq!(layout.zones_of(RoomType::Bath).count(), 2);
    assert!(layout.zone("Bath 1").is_some() && layout.zone("Bath 2").is_some());
    assert!(layout.zone("Bedroom 1").is_some() && layout.zone("Bedroom 2").is_some());
    assert_eq!(layout.zones_of(RoomType::Bedroom).count(), 2);
    assert_eq!(layout.zones_of(RoomType::Study).count(), 1);
    assert_eq!(layout.zones.len(), 12);

    // The driveway attaches to the entry's exterior wall
    let parking = layout.parking.as_ref().expect("house should have parking");
    let entry = layout.zone("Entry").unwrap();
    let gap = floorgen_geometry::buffer(&entry.shape, 0.2);
    assert!(intersection(parking, &gap).area() > 0.0);
}

#[test]
fn test_company_low_budget_scenario() {
    assert_eq!(classify_budget(180_000.0).as_str(), "low");
    let layout = generate(Archetype::Company, ParcelShape::Square, Some(180_000.0), 11);
    assert_eq!(layout.tier, BudgetTier::Low);
    assert_relative_eq!(layout.fill_ratio, 0.82, epsilon = 1e-12);
    assert!(layout.zone("Lobby").is_some());
}

#[test]
fn test_layout_serialises_to_json() {
    let layout = generate(Archetype::School, ParcelShape::Rectangle, None, 5);
    let value = serde_json::to_value(&layout).unwrap();
    assert_eq!(value["archetype"], "SCHOOL");
    assert_eq!(value["tier"], "high");
    assert!(value["zones"].as_array().unwrap().len() >= 10);
    assert!(value["summary"]["efficiency"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_same_seed_gives_same_layout() {
    let request = LayoutRequest::new(
        Archetype::House,
        make_parcel(ParcelShape::Rectangle, 24.0, 14.0),
        350_000.0,
        42,
    );
    let a = generate_layout(&request).unwrap();
    let b = generate(Archetype::House, ParcelShape::Rectangle, Some(350_000.0), 42);
    let names = |l: &LayoutResult| l.zones.iter().map(|z| z.name.clone()).collect::<Vec<_>>();
    assert_eq!(names(&a), names(&b));
    assert_relative_eq!(a.footprint.area(), b.footprint.area(), epsilon = 1e-9);
    assert_eq!(a.doors.len(), b.doors.len());
}
