// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch generation of design variants
//!
//! Variant `i` uses seed `base + i` and shares nothing with the others, so
//! variants are generated on the rayon pool.

use crate::config::LayoutConfig;
use crate::engine::LayoutEngine;
use crate::error::Result;
use crate::parcel::{make_parcel, ParcelShape};
use crate::room::Archetype;
use crate::types::{HouseOptions, LayoutRequest, LayoutResult};
use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;

pub const DEFAULT_VARIANTS: usize = 6;

/// Parameters shared by all variants of a batch
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub archetype: Archetype,
    pub shape: ParcelShape,
    pub width: f64,
    pub height: f64,
    pub budget: f64,
    pub house: HouseOptions,
    /// Base seed; a random one is drawn when absent
    pub seed: Option<u64>,
    pub variants: usize,
}

impl BatchRequest {
    /// Archetype defaults: default parcel, default budget, six variants
    pub fn for_archetype(config: &LayoutConfig, archetype: Archetype) -> Result<Self> {
        let tables = config.archetype(archetype)?;
        Ok(Self {
            archetype,
            shape: ParcelShape::Rectangle,
            width: tables.default_parcel[0],
            height: tables.default_parcel[1],
            budget: tables.default_budget,
            house: HouseOptions::default(),
            seed: None,
            variants: DEFAULT_VARIANTS,
        })
    }
}

/// One generated design
#[derive(Debug, Clone, Serialize)]
pub struct Variant {
    /// 1-based design number
    pub index: usize,
    pub seed: u64,
    pub title: String,
    pub layout: LayoutResult,
}

impl LayoutEngine {
    /// Generate `batch.variants` layouts in parallel, in design order
    pub fn generate_variants(&self, batch: &BatchRequest) -> Result<Vec<Variant>> {
        let name = self.config().archetype(batch.archetype)?.name.clone();
        let parcel = make_parcel(batch.shape, batch.width, batch.height);
        let base_seed = batch
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen_range(1..=99_999));

        tracing::info!(
            archetype = %batch.archetype,
            shape = %batch.shape,
            variants = batch.variants,
            base_seed,
            "Generating design variants"
        );

        (0..batch.variants)
            .into_par_iter()
            .map(|i| -> Result<Variant> {
                let seed = base_seed.wrapping_add(i as u64);
                let request = LayoutRequest::new(batch.archetype, parcel.clone(), batch.budget, seed)
                    .with_house_options(batch.house);
                let layout = self.generate(&request)?;
                Ok(Variant {
                    index: i + 1,
                    seed,
                    title: variant_title(&name, batch, i + 1),
                    layout,
                })
            })
            .collect()
    }
}

/// "House • rectangle 24×14 • $350,000 • Design 1"
pub fn variant_title(name: &str, batch: &BatchRequest, index: usize) -> String {
    format!(
        "{} • {} {}×{} • ${} • Design {}",
        name,
        batch.shape,
        format_dimension(batch.width),
        format_dimension(batch.height),
        format_thousands(batch.budget),
        index
    )
}

fn format_dimension(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Whole-number amount with comma thousands separators
pub fn format_thousands(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
