// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Floorgen Layout
//!
//! Floor plan generation for four building archetypes (house, hospital,
//! company, school). A parcel polygon is reduced to a buildable footprint,
//! split into area-weighted bands and rooms, consolidated, and resolved into
//! doors, exterior windows and a vehicle access area.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use floorgen_layout::{make_parcel, Archetype, LayoutEngine, LayoutRequest, ParcelShape};
//!
//! let engine = LayoutEngine::default();
//! let parcel = make_parcel(ParcelShape::Rectangle, 24.0, 14.0);
//! let layout = engine.generate(&LayoutRequest::new(Archetype::House, parcel, 350_000.0, 42))?;
//!
//! for zone in &layout.zones {
//!     println!("{:25} {:6.1} m²", zone.name, zone.area);
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. [`footprint`]: setback inset, oriented and scaled footprint
//! 2. [`partition`]: band and room strips
//! 3. [`program`]: room lists and counts per archetype
//! 4. [`consolidate`]: merges, utility edge push, anchor centralization
//! 5. [`adjacency`]: corridors, adjacency graph and doors
//! 6. [`apertures`]: exterior windows
//! 7. [`access`]: driveway / parking

pub mod access;
pub mod adjacency;
pub mod apertures;
pub mod batch;
pub mod config;
pub mod consolidate;
pub mod engine;
pub mod error;
pub mod footprint;
pub mod parcel;
pub mod partition;
pub mod program;
pub mod room;
pub mod tier;
pub mod types;

pub use batch::{BatchRequest, Variant, DEFAULT_VARIANTS};
pub use config::{ArchetypeConfig, BandPlan, DoorTarget, EntryRule, LayoutConfig};
pub use engine::LayoutEngine;
pub use error::{Error, Result};
pub use parcel::{make_parcel, parcel_dims_from_area, ParcelShape};
pub use room::{Archetype, RoomType, ZoneKind};
pub use tier::{classify_budget, BudgetTier};
pub use types::{
    Door, DoorRule, HouseOptions, LayoutRequest, LayoutResult, Summary, Window, Zone,
};

/// Generate one layout with the built-in tables
pub fn generate_layout(request: &LayoutRequest) -> Result<LayoutResult> {
    LayoutEngine::default().generate(request)
}
