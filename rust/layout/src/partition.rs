// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Area-weighted partitioning
//!
//! A region is cut into axis-aligned strips across its bounding box, one per
//! ratio, and each strip is clipped back to the region. Bands use horizontal
//! strips (cuts along y); rooms within a band use vertical strips (cuts
//! along x) sized by their target areas.

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::room::RoomType;
use crate::tier::BudgetTier;
use floorgen_geometry::{intersection, Bounds2D, Shape};
use rand::Rng;

/// Ratio floor applied to target areas in [`split_by_area`]
const MIN_TARGET_AREA: f64 = 0.01;

/// Bisection steps when locating an area quantile
const QUANTILE_STEPS: usize = 48;

/// Axis along which cut positions advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Split into horizontal bands, bottom to top
pub fn split_h(shape: &Shape, ratios: &[f64]) -> Vec<Shape> {
    split_along(shape, ratios, Axis::Y)
}

/// Split into vertical strips, left to right
pub fn split_v(shape: &Shape, ratios: &[f64]) -> Vec<Shape> {
    split_along(shape, ratios, Axis::X)
}

/// Split into vertical strips proportional to target areas
pub fn split_by_area(shape: &Shape, target_areas: &[f64]) -> Vec<Shape> {
    split_v(shape, &floored(target_areas))
}

/// Disjoint vertical strips proportional to target areas
///
/// Cuts as [`split_by_area`] does. When a strip misses the region (a band
/// running past a courtyard has a gap between its parts) the whole region is
/// re-cut at area quantiles along x, so no strip borrows the full region. A
/// strip that is still empty comes back as an empty shape.
pub fn partition_by_area(shape: &Shape, target_areas: &[f64]) -> Vec<Shape> {
    let ratios = floored(target_areas);
    let count = ratios.len();
    let strips = strips_along(shape, &ratios, Axis::X);
    if strips.iter().all(Result::is_ok) {
        return strips.into_iter().flatten().collect();
    }

    let bounds = match shape.bounds() {
        Some(b) if !shape.is_empty() => b,
        _ => return vec![Shape::empty(); count],
    };
    tracing::debug!(rooms = count, "Strip missed the region, cutting at area quantiles");

    let total: f64 = ratios.iter().sum();
    let area = shape.area();
    let mut cuts = Vec::with_capacity(count + 1);
    cuts.push(bounds.min.x);
    let mut acc = 0.0;
    for r in &ratios[..count.saturating_sub(1)] {
        acc += r / total;
        cuts.push(area_quantile(shape, &bounds, acc * area));
    }
    cuts.push(bounds.max.x);

    cuts.windows(2)
        .enumerate()
        .map(|(index, w)| {
            strip(shape, &bounds, w[0], w[1], Axis::X, index, count).unwrap_or_else(|err| {
                tracing::debug!(error = %err, "Leaving room strip empty");
                Shape::empty()
            })
        })
        .collect()
}

fn floored(target_areas: &[f64]) -> Vec<f64> {
    target_areas.iter().map(|a| a.max(MIN_TARGET_AREA)).collect()
}

/// Strip split along one axis
///
/// A strip that misses the region is replaced by the whole region, so every
/// requested band is non-empty.
pub fn split_along(shape: &Shape, ratios: &[f64], axis: Axis) -> Vec<Shape> {
    strips_along(shape, ratios, axis)
        .into_iter()
        .map(|part| {
            part.unwrap_or_else(|err| {
                tracing::debug!(error = %err, "Using the full region for an empty band");
                shape.clone()
            })
        })
        .collect()
}

fn strips_along(shape: &Shape, ratios: &[f64], axis: Axis) -> Vec<Result<Shape>> {
    let count = ratios.len();
    let bounds = match shape.bounds() {
        Some(b) if !shape.is_empty() => b,
        _ => {
            return (0..count)
                .map(|index| Err(Error::EmptyBand { index, count }))
                .collect()
        }
    };

    let cuts = cut_positions(&bounds, ratios, axis);
    cuts.windows(2)
        .enumerate()
        .map(|(index, w)| strip(shape, &bounds, w[0], w[1], axis, index, count))
        .collect()
}

/// Smallest x whose left part of `shape` reaches `target` area
fn area_quantile(shape: &Shape, bounds: &Bounds2D, target: f64) -> f64 {
    let (mut lo, mut hi) = (bounds.min.x, bounds.max.x);
    for _ in 0..QUANTILE_STEPS {
        let mid = 0.5 * (lo + hi);
        let window = Shape::rect(bounds.min.x, bounds.min.y, mid, bounds.max.y);
        if intersection(shape, &window).area() < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}

/// Cumulative cut positions; the last cut is pinned to the far bound
fn cut_positions(bounds: &Bounds2D, ratios: &[f64], axis: Axis) -> Vec<f64> {
    let (lo, hi) = match axis {
        Axis::X => (bounds.min.x, bounds.max.x),
        Axis::Y => (bounds.min.y, bounds.max.y),
    };
    let total: f64 = ratios.iter().sum();
    let total = if total > 0.0 { total } else { 1.0 };

    let mut cuts = Vec::with_capacity(ratios.len() + 1);
    cuts.push(lo);
    let mut acc = lo;
    for (i, r) in ratios.iter().enumerate() {
        if i + 1 == ratios.len() {
            cuts.push(hi);
        } else {
            acc += (hi - lo) * (r / total);
            cuts.push(acc);
        }
    }
    cuts
}

fn strip(
    shape: &Shape,
    bounds: &Bounds2D,
    from: f64,
    to: f64,
    axis: Axis,
    index: usize,
    count: usize,
) -> Result<Shape> {
    let window = match axis {
        Axis::X => Shape::rect(from, bounds.min.y, to, bounds.max.y),
        Axis::Y => Shape::rect(bounds.min.x, from, bounds.max.x, to),
    };
    let part = intersection(shape, &window);
    if part.is_empty() {
        return Err(Error::EmptyBand { index, count });
    }
    Ok(part)
}

/// Sampled target area of one room instance
///
/// `uniform(lo, hi) × tier_factor × area_factor`, where larger footprints get
/// up to 35% bigger rooms.
pub fn scaled_room_area<R: Rng + ?Sized>(
    config: &LayoutConfig,
    room: RoomType,
    footprint_area: f64,
    tier: BudgetTier,
    rng: &mut R,
) -> f64 {
    let range = config.room_size(room);
    let base = if range.max > range.min {
        rng.gen_range(range.min..range.max)
    } else {
        range.min
    };
    let tier_factor = *config.tier_factor.get(tier);
    let area_factor = 1.0 + (footprint_area / 1200.0 * 0.1).min(0.35);
    base * tier_factor * area_factor
}
