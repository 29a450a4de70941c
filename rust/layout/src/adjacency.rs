// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adjacency graph and door resolution
//!
//! Two zones are adjacent when their boundaries overlap along a straight
//! piece of at least [`MIN_SHARED_LENGTH`]. Doors are then resolved per zone
//! in three steps, stopping at the zone's door budget:
//!
//! 1. a door to the best-touching corridor, if the policy lists `Corridor`;
//! 2. doors to policy targets, longest shared wall first;
//! 3. if still doorless, one door to the best-touching zone of another kind.
//!
//! [`MIN_SHARED_LENGTH`]: floorgen_geometry::MIN_SHARED_LENGTH

use crate::config::{ArchetypeConfig, DoorTarget, GeometryThresholds};
use crate::error::{Error, Result};
use crate::types::{Door, DoorRule, Zone};
use floorgen_geometry::{
    boundary_within, intersection, longest, longest_shared_segment, segment_buffer, Segment2D,
    Shape, BOUNDARY_TOLERANCE,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// Virtual corridor straddling the interface between two bands
pub fn corridor_between(a: &Shape, b: &Shape, footprint: &Shape, geometry: &GeometryThresholds) -> Result<Shape> {
    let interface = longest_shared_segment(a, b)
        .filter(|s| s.length() > geometry.corridor_min_interface)
        .ok_or_else(|| Error::NoSharedBoundary("band".to_string(), "band".to_string()))?;
    let corridor = intersection(&segment_buffer(&interface, geometry.corridor_half_width), footprint);
    if corridor.is_empty() {
        return Err(Error::NoSharedBoundary("corridor".to_string(), "footprint".to_string()));
    }
    Ok(corridor)
}

/// Zone adjacency keyed by index pair
#[derive(Debug, Default)]
pub struct AdjacencyGraph {
    walls: FxHashMap<(usize, usize), Segment2D>,
    zone_count: usize,
}

impl AdjacencyGraph {
    /// Longest shared wall of every touching pair
    pub fn build(zones: &[Zone]) -> Self {
        let mut walls = FxHashMap::default();
        for i in 0..zones.len() {
            for j in (i + 1)..zones.len() {
                if let Some(seg) = longest_shared_segment(&zones[i].shape, &zones[j].shape) {
                    walls.insert((i, j), seg);
                }
            }
        }
        tracing::debug!(zones = zones.len(), edges = walls.len(), "Built adjacency graph");
        Self {
            walls,
            zone_count: zones.len(),
        }
    }

    pub fn shared_wall(&self, a: usize, b: usize) -> Option<&Segment2D> {
        self.walls.get(&(a.min(b), a.max(b)))
    }

    /// Indices adjacent to `index` with their shared wall
    pub fn neighbours(&self, index: usize) -> impl Iterator<Item = (usize, &Segment2D)> + '_ {
        (0..self.zone_count)
            .filter(move |&j| j != index)
            .filter_map(move |j| self.shared_wall(index, j).map(|s| (j, s)))
    }

    pub fn edge_count(&self) -> usize {
        self.walls.len()
    }
}

/// Door anchored at the middle of `wall`, swinging away from `zone`
fn door_on(wall: &Segment2D, zone: &Shape, geometry: &GeometryThresholds) -> Door {
    let length = wall.length();
    Door {
        from: String::new(),
        from_index: 0,
        to: String::new(),
        to_index: None,
        corridor_index: None,
        rule: DoorRule::Policy,
        center: wall.midpoint(),
        direction: wall.direction(),
        swing: wall.outward_normal(zone),
        width: geometry.door_width.min(length * 0.6),
        wall_length: length,
    }
}

/// Resolve doors for every zone
pub fn resolve_doors(
    zones: &[Zone],
    corridors: &[Shape],
    graph: &AdjacencyGraph,
    policy: &ArchetypeConfig,
    geometry: &GeometryThresholds,
) -> Vec<Door> {
    let mut doors = Vec::new();

    for (i, zone) in zones.iter().enumerate() {
        let budget = policy.max_doors_for(zone.room);
        let targets = policy.door_targets(zone.room);
        let mut placed = 0;

        // Corridor first
        if !corridors.is_empty() && targets.contains(&DoorTarget::Corridor) {
            let best = corridors
                .iter()
                .enumerate()
                .filter_map(|(k, c)| {
                    longest(boundary_within(&zone.shape, c, BOUNDARY_TOLERANCE)).map(|s| (k, s))
                })
                .filter(|(_, s)| s.length() > geometry.door_min_shared)
                .max_by(|a, b| a.1.length().total_cmp(&b.1.length()));
            if let Some((k, wall)) = best {
                let mut door = door_on(&wall, &zone.shape, geometry);
                door.from = zone.name.clone();
                door.from_index = i;
                door.to = "Corridor".to_string();
                door.corridor_index = Some(k);
                door.rule = DoorRule::Corridor;
                doors.push(door);
                placed += 1;
            }
        }

        // Zones that already drew a door to this one
        let mut connected: FxHashSet<usize> = doors
            .iter()
            .filter(|d| d.to_index == Some(i))
            .map(|d| d.from_index)
            .collect();

        // Policy targets, longest shared wall first
        if placed < budget {
            let mut candidates: Vec<(usize, &Segment2D)> = graph
                .neighbours(i)
                .filter(|(j, wall)| {
                    !zones[*j].shape.is_empty()
                        && targets.contains(&DoorTarget::Room(zones[*j].room))
                        && wall.length() > geometry.door_min_shared
                })
                .collect();
            candidates.sort_by(|a, b| b.1.length().total_cmp(&a.1.length()));

            for (j, wall) in candidates {
                if placed >= budget {
                    break;
                }
                if !connected.insert(j) {
                    continue;
                }
                doors.push(zone_door(zones, i, j, wall, DoorRule::Policy, geometry));
                placed += 1;
            }
        }

        // Fallback: any neighbour of a different kind, unless a door already reaches this zone
        if placed == 0 && connected.is_empty() {
            let fallback = graph
                .neighbours(i)
                .filter(|(j, wall)| zones[*j].kind != zone.kind && wall.length() > geometry.fallback_min_shared)
                .max_by(|a, b| a.1.length().total_cmp(&b.1.length()));
            match fallback {
                Some((j, wall)) => {
                    doors.push(zone_door(zones, i, j, wall, DoorRule::Fallback, geometry));
                    placed += 1;
                }
                None => {
                    let err = Error::NoSharedBoundary(zone.name.clone(), "any neighbour".to_string());
                    tracing::debug!(error = %err, "Zone left without a door");
                }
            }
        }

        tracing::debug!(zone = %zone.name, doors = placed, budget, "Resolved doors");
    }

    doors
}

fn zone_door(
    zones: &[Zone],
    from: usize,
    to: usize,
    wall: &Segment2D,
    rule: DoorRule,
    geometry: &GeometryThresholds,
) -> Door {
    let mut door = door_on(wall, &zones[from].shape, geometry);
    door.from = zones[from].name.clone();
    door.from_index = from;
    door.to = zones[to].name.clone();
    door.to_index = Some(to);
    door.rule = rule;
    door
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::room::{Archetype, RoomType, ZoneKind};
    use approx::assert_relative_eq;

    fn zone(name: &str, room: RoomType, kind: ZoneKind, rect: (f64, f64, f64, f64)) -> Zone {
        Zone::new(name, room, kind, 0.0, Shape::rect(rect.0, rect.1, rect.2, rect.3))
    }

    #[test]
    fn test_graph_records_touching_pairs() {
        let zones = vec![
            zone("Entry", RoomType::Entry, ZoneKind::Public, (0.0, 0.0, 3.0, 4.0)),
            zone("Living", RoomType::Living, ZoneKind::Public, (3.0, 0.0, 10.0, 4.0)),
            zone("Study", RoomType::Study, ZoneKind::Private, (20.0, 0.0, 24.0, 4.0)),
        ];
        let graph = AdjacencyGraph::build(&zones);
        assert_eq!(graph.edge_count(), 1);
        assert_relative_eq!(graph.shared_wall(1, 0).unwrap().length(), 4.0, epsilon = 1e-9);
        assert_eq!(graph.neighbours(2).count(), 0);
    }

    #[test]
    fn test_policy_doors_respect_budget() {
        let config = LayoutConfig::default();
        let house = config.archetype(Archetype::House).unwrap();
        // Bedroom touches Living and Dining; policy only allows Living, budget 1
        let zones = vec![
            zone("Living", RoomType::Living, ZoneKind::Public, (0.0, 4.0, 8.0, 8.0)),
            zone("Dining", RoomType::Dining, ZoneKind::Public, (8.0, 4.0, 12.0, 8.0)),
            zone("Bedroom 1", RoomType::Bedroom, ZoneKind::Private, (0.0, 0.0, 12.0, 4.0)),
        ];
        let graph = AdjacencyGraph::build(&zones);
        let doors = resolve_doors(&zones, &[], &graph, house, &config.geometry);
        let bedroom: Vec<&Door> = doors.iter().filter(|d| d.from_index == 2).collect();
        assert_eq!(bedroom.len(), 1);
        assert_eq!(bedroom[0].to, "Living");
        assert_eq!(bedroom[0].rule, DoorRule::Policy);
        assert_relative_eq!(bedroom[0].width, 0.9, epsilon = 1e-12);
        // Swing points out of the bedroom, into the living room
        assert!(bedroom[0].swing.y > 0.0);
        // Living is a hub and has two allowed neighbours here
        assert!(doors.iter().filter(|d| d.from_index == 0).count() <= 2);
    }

    #[test]
    fn test_mutual_policy_gives_one_door() {
        let config = LayoutConfig::default();
        let house = config.archetype(Archetype::House).unwrap();
        // Living lists Kitchen and Kitchen lists Living
        let zones = vec![
            zone("Living", RoomType::Living, ZoneKind::Public, (0.0, 0.0, 8.0, 4.0)),
            zone("Kitchen", RoomType::Kitchen, ZoneKind::Service, (8.0, 0.0, 12.0, 4.0)),
        ];
        let graph = AdjacencyGraph::build(&zones);
        let doors = resolve_doors(&zones, &[], &graph, house, &config.geometry);
        assert_eq!(doors.len(), 1);
        assert_eq!((doors[0].from_index, doors[0].to_index), (0, Some(1)));
    }

    #[test]
    fn test_fallback_picks_other_kind() {
        let config = LayoutConfig::default();
        let company = config.archetype(Archetype::Company).unwrap();
        // Conference has no policy targets
        let zones = vec![
            zone("Conference", RoomType::Conference, ZoneKind::Public, (0.0, 0.0, 6.0, 4.0)),
            zone("Lobby", RoomType::Lobby, ZoneKind::Public, (6.0, 0.0, 10.0, 4.0)),
            zone("Break Room", RoomType::BreakRoom, ZoneKind::Service, (0.0, 4.0, 3.0, 8.0)),
        ];
        let graph = AdjacencyGraph::build(&zones);
        let doors = resolve_doors(&zones, &[], &graph, company, &config.geometry);
        let conference: Vec<&Door> = doors.iter().filter(|d| d.from_index == 0).collect();
        assert_eq!(conference.len(), 1);
        assert_eq!(conference[0].to, "Break Room");
        assert_eq!(conference[0].rule, DoorRule::Fallback);
    }

    #[test]
    fn test_corridor_door_for_wards() {
        let config = LayoutConfig::default();
        let hospital = config.archetype(Archetype::Hospital).unwrap();
        let footprint = Shape::rect(0.0, 0.0, 20.0, 10.0);
        let front = Shape::rect(0.0, 0.0, 20.0, 4.0);
        let core = Shape::rect(0.0, 4.0, 20.0, 10.0);
        let corridor = corridor_between(&front, &core, &footprint, &config.geometry).unwrap();
        assert_relative_eq!(corridor.area(), 20.0 * 0.4, epsilon = 1e-6);

        let zones = vec![
            zone("Waiting", RoomType::Waiting, ZoneKind::Public, (0.0, 0.0, 20.0, 4.0)),
            zone("Patient Ward 1", RoomType::PatientRoom, ZoneKind::Private, (0.0, 4.0, 20.0, 10.0)),
        ];
        let graph = AdjacencyGraph::build(&zones);
        let doors = resolve_doors(&zones, &[corridor], &graph, hospital, &config.geometry);
        let ward: Vec<&Door> = doors.iter().filter(|d| d.from_index == 1).collect();
        assert_eq!(ward.len(), 1);
        assert_eq!(ward[0].rule, DoorRule::Corridor);
        assert_eq!(ward[0].to_index, None);
    }
}
