// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use floorgen_layout::{Archetype, Variant};
use serde::Serialize;

/// Generated designs for one project.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratePlansResponse {
    pub success: bool,
    pub message: String,
    /// The resolved project parameters.
    pub project: ProjectInfo,
    /// One entry per design, in design order.
    pub designs: Vec<Variant>,
    /// Generation statistics.
    pub stats: GenerationStats,
}

/// Project parameters after defaults and unit conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectInfo {
    pub project_type: Archetype,
    pub budget: f64,
    pub floors: u32,
    pub shape: String,
    pub width: f64,
    pub height: f64,
    /// Bounding-box area of the parcel in m².
    pub area_m2: f64,
}

/// Generation statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationStats {
    /// Number of designs generated.
    pub designs: usize,
    /// Seed of the first design.
    pub base_seed: u64,
    /// Total zones across all designs.
    pub total_zones: usize,
    /// Total doors across all designs.
    pub total_doors: usize,
    /// Wall-clock generation time (ms).
    pub generation_time_ms: u64,
}
