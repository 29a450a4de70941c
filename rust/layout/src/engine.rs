// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout engine
//!
//! One run is a pure function of the request and the injected configuration:
//! footprint, bands, room program, consolidation, doors, windows and access,
//! in that order. All randomness comes from a `ChaCha8Rng` seeded with the
//! request seed.

use crate::access::{entry_zone, place_driveway};
use crate::adjacency::{corridor_between, resolve_doors, AdjacencyGraph};
use crate::apertures::plan_windows;
use crate::config::{ArchetypeConfig, BandPlan, LayoutConfig};
use crate::consolidate::{centralize, merge_small, push_utility_to_edges};
use crate::error::Result;
use crate::footprint::derive_footprint;
use crate::partition::{partition_by_area, split_h};
use crate::program::{
    clinical_core_program, clinical_rear_program, private_program, provisioned_rooms, singles,
    smart_counts, target_areas, ProgramItem,
};
use crate::room::{Archetype, RoomType, ZoneKind};
use crate::tier::BudgetTier;
use crate::types::{HouseOptions, LayoutRequest, LayoutResult, Summary, Zone};
use floorgen_geometry::{validate_region, Shape};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Zones and corridors produced by the band planners
struct Planned {
    zones: Vec<Zone>,
    corridors: Vec<Shape>,
}

/// Inputs shared by the band planners
struct PlanContext<'a> {
    config: &'a LayoutConfig,
    archetype: Archetype,
    footprint: &'a Shape,
    footprint_area: f64,
    tier: BudgetTier,
    house: HouseOptions,
}

impl PlanContext<'_> {
    /// Sample target areas and cut `region` into one zone per item
    ///
    /// Items whose strip came back empty get no zone.
    fn instantiate(&self, items: Vec<ProgramItem>, kind: ZoneKind, region: &Shape, rng: &mut ChaCha8Rng) -> Vec<Zone> {
        let targets = target_areas(&items, self.config, self.footprint_area, self.tier, rng);
        let shapes = partition_by_area(region, &targets);
        items
            .into_iter()
            .zip(targets)
            .zip(shapes)
            .filter_map(|((item, target), shape)| {
                if shape.is_empty() {
                    tracing::debug!(zone = %item.name, "No room strip left for zone");
                    return None;
                }
                Some(Zone::new(item.name, item.room, kind, target, shape))
            })
            .collect()
    }

    fn corridor(&self, a: &Shape, b: &Shape) -> Option<Shape> {
        match corridor_between(a, b, self.footprint, &self.config.geometry) {
            Ok(corridor) => Some(corridor),
            Err(err) => {
                tracing::debug!(error = %err, "No corridor between bands");
                None
            }
        }
    }
}

/// Floor plan generator bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Generate one layout
    ///
    /// Fails only for an invalid parcel or a configuration without tables for
    /// the requested archetype; every geometric failure is recovered.
    pub fn generate(&self, request: &LayoutRequest) -> Result<LayoutResult> {
        validate_region(&request.parcel)?;
        let policy = self.config.archetype(request.archetype)?;
        let geometry = &self.config.geometry;

        let tier = self.config.classify(request.budget);
        let fill_ratio = *self.config.fill_ratio.get(tier);
        let footprint = derive_footprint(&request.parcel, fill_ratio, geometry)?;
        let footprint_area = footprint.area();

        tracing::info!(
            archetype = %request.archetype,
            tier = %tier,
            fill_ratio,
            footprint_area,
            seed = request.seed,
            "Generating layout"
        );

        let ctx = PlanContext {
            config: &self.config,
            archetype: request.archetype,
            footprint: &footprint,
            footprint_area,
            tier,
            house: request.house,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(request.seed);

        let Planned { mut zones, corridors } = match &policy.bands {
            BandPlan::Zoned {
                weights,
                public_rooms,
                service_rooms,
            } => plan_zoned(&ctx, weights.get(tier).folded(), public_rooms, service_rooms, &mut rng),
            BandPlan::Clinical {
                front,
                core,
                front_rooms,
            } => plan_clinical(&ctx, *front.get(tier), *core.get(tier), front_rooms, &mut rng),
        };

        if let Some(center) = footprint.centroid() {
            centralize(&mut zones, policy.anchor_room, center);
        }

        zones.retain(|z| !z.shape.is_empty());
        for zone in &mut zones {
            zone.refresh_area();
            zone.color = self
                .config
                .palette
                .zone_color(&zone.name, zone.room, zone.kind)
                .to_string();
        }

        let graph = AdjacencyGraph::build(&zones);
        let doors = resolve_doors(&zones, &corridors, &graph, policy, geometry);
        let windows = plan_windows(&zones, &footprint, policy, geometry);
        let parking = if policy.requires_parking {
            self.plan_access(&request.parcel, &footprint, &zones, policy)
        } else {
            None
        };

        let summary = Summary::from_zones(&zones, footprint_area, policy.cost_per_sqm, request.budget);
        tracing::info!(
            zones = zones.len(),
            corridors = corridors.len(),
            doors = doors.len(),
            windows = windows.len(),
            parking = parking.is_some(),
            efficiency = summary.efficiency,
            "Layout complete"
        );

        Ok(LayoutResult {
            archetype: request.archetype,
            tier,
            fill_ratio,
            seed: request.seed,
            parcel: request.parcel.clone(),
            footprint,
            zones,
            corridors,
            parking,
            doors,
            windows,
            summary,
        })
    }

    fn plan_access(&self, parcel: &Shape, footprint: &Shape, zones: &[Zone], policy: &ArchetypeConfig) -> Option<Shape> {
        let placed = entry_zone(zones, policy.entry).and_then(|i| {
            place_driveway(
                parcel,
                footprint,
                &zones[i].shape,
                policy.parking_cars,
                &self.config.geometry,
            )
        });
        match placed {
            Ok(parking) => Some(parking),
            Err(err) => {
                tracing::debug!(error = %err, "Omitting parking");
                None
            }
        }
    }
}

/// Public / service / private bands with a corridor between service and private
fn plan_zoned(
    ctx: &PlanContext<'_>,
    ratios: [f64; 3],
    public_rooms: &[RoomType],
    service_rooms: &[RoomType],
    rng: &mut ChaCha8Rng,
) -> Planned {
    let bands = split_h(ctx.footprint, &ratios);
    let (public, service, private) = (&bands[0], &bands[1], &bands[2]);
    tracing::debug!(
        public = public.area(),
        service = service.area(),
        private = private.area(),
        "Split footprint into bands"
    );

    let corridors: Vec<Shape> = ctx.corridor(service, private).into_iter().collect();

    let mut zones = ctx.instantiate(singles(public_rooms), ZoneKind::Public, public, rng);
    let mut service_zones = ctx.instantiate(singles(service_rooms), ZoneKind::Service, service, rng);

    let counts = smart_counts(ctx.archetype, ctx.footprint_area, &ctx.house);
    let private_items = private_program(ctx.archetype, &counts, ctx.config);
    let mut private_zones = merge_small(
        ctx.instantiate(private_items, ZoneKind::Private, private, rng),
        ctx.config.merge.private,
        provisioned_rooms(ctx.archetype),
    );

    push_utility_to_edges(&mut service_zones);
    push_utility_to_edges(&mut private_zones);

    zones.extend(service_zones);
    zones.extend(private_zones);
    Planned { zones, corridors }
}

/// Front / core / rear bands with corridors on both interfaces
fn plan_clinical(
    ctx: &PlanContext<'_>,
    front_ratio: f64,
    core_ratio: f64,
    front_rooms: &[RoomType],
    rng: &mut ChaCha8Rng,
) -> Planned {
    let rear_ratio = (1.0 - front_ratio - core_ratio).max(0.0);
    let bands = split_h(ctx.footprint, &[front_ratio, core_ratio, rear_ratio]);
    let (front, core, rear) = (&bands[0], &bands[1], &bands[2]);

    let corridors: Vec<Shape> = [(front, core), (core, rear)]
        .into_iter()
        .filter_map(|(a, b)| ctx.corridor(a, b))
        .collect();

    let mut zones = ctx.instantiate(singles(front_rooms), ZoneKind::Public, front, rng);

    let counts = smart_counts(ctx.archetype, ctx.footprint_area, &ctx.house);
    let core_zones = merge_small(
        ctx.instantiate(clinical_core_program(&counts, ctx.config), ZoneKind::Private, core, rng),
        ctx.config.merge.clinical_core,
        provisioned_rooms(ctx.archetype),
    );
    let rear_zones = merge_small(
        ctx.instantiate(clinical_rear_program(&counts, ctx.config), ZoneKind::Service, rear, rng),
        ctx.config.merge.clinical_rear,
        provisioned_rooms(ctx.archetype),
    );

    zones.extend(core_zones);
    zones.extend(rear_zones);
    Planned { zones, corridors }
}
