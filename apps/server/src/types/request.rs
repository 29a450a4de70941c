// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use serde::Deserialize;

/// Square metres per dunum.
pub const SQM_PER_DUNUM: f64 = 1000.0;

/// Unit of the requested parcel area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AreaUnit {
    #[default]
    SquareMetres,
    Dunum,
}

impl AreaUnit {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "m2" => Some(AreaUnit::SquareMetres),
            "dunum" => Some(AreaUnit::Dunum),
            _ => None,
        }
    }

    pub fn to_square_metres(self, area: f64) -> f64 {
        match self {
            AreaUnit::SquareMetres => area,
            AreaUnit::Dunum => area * SQM_PER_DUNUM,
        }
    }
}

/// Body of `POST /api/v1/generate-plans`.
///
/// The parcel is taken from `width`/`height` when both are present,
/// otherwise from `area` at a 1.7:1 aspect ratio, otherwise from the
/// archetype's default parcel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratePlansRequest {
    #[serde(alias = "projectType")]
    pub project_type: String,

    pub budget: f64,

    /// Accepted for compatibility; every design is single storey.
    #[serde(default)]
    pub floors: Option<u32>,

    /// Parcel shape keyword, `rectangle` when absent.
    #[serde(default)]
    pub shape: Option<String>,

    #[serde(default)]
    pub width: Option<f64>,

    #[serde(default)]
    pub height: Option<f64>,

    #[serde(default)]
    pub area: Option<f64>,

    /// `m2` or `dunum`.
    #[serde(default, alias = "areaUnit")]
    pub area_unit: Option<String>,

    #[serde(default)]
    pub bedrooms: Option<u32>,

    #[serde(default)]
    pub baths: Option<u32>,

    #[serde(default, alias = "withStudy")]
    pub with_study: Option<bool>,

    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub variants: Option<usize>,
}
