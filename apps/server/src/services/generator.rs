// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request resolution and design generation.

use crate::error::ApiError;
use crate::types::{AreaUnit, GeneratePlansRequest, GenerationStats, ProjectInfo};
use floorgen_layout::{
    parcel_dims_from_area, Archetype, BatchRequest, LayoutEngine, ParcelShape, Variant,
};

/// Validate a request and fill in archetype defaults.
///
/// All problems are collected so the client sees every one at once.
pub fn resolve_batch(
    engine: &LayoutEngine,
    request: &GeneratePlansRequest,
    max_variants: usize,
) -> Result<(BatchRequest, ProjectInfo), ApiError> {
    let mut errors = Vec::new();

    let archetype = if request.project_type.trim().is_empty() {
        errors.push("Project type is required".to_string());
        None
    } else {
        match request.project_type.parse::<Archetype>() {
            Ok(archetype) => Some(archetype),
            Err(e) => {
                errors.push(format!("Valid project type is required ({})", e));
                None
            }
        }
    };

    if !(request.budget.is_finite() && request.budget > 0.0) {
        errors.push("Valid budget is required".to_string());
    }
    if request.floors.is_some_and(|f| f < 1) {
        errors.push("Valid number of floors is required".to_string());
    }

    let unit = match request.area_unit.as_deref() {
        None => Some(AreaUnit::default()),
        Some(value) => AreaUnit::parse(value),
    };
    if unit.is_none() {
        errors.push("Valid area unit is required".to_string());
    }
    if let Some(area) = request.area {
        if !(area.is_finite() && area > 0.0) {
            errors.push("Valid area is required".to_string());
        }
    }

    match (request.width, request.height) {
        (Some(w), Some(h)) if !(w > 0.0 && h > 0.0) => {
            errors.push("Parcel width and height must be positive".to_string());
        }
        (Some(_), None) | (None, Some(_)) => {
            errors.push("Parcel width and height must be given together".to_string());
        }
        _ => {}
    }

    match request.variants {
        Some(n) if n == 0 || n > max_variants => {
            errors.push(format!("Variants must be between 1 and {}", max_variants));
        }
        _ => {}
    }

    let (Some(archetype), Some(unit), true) = (archetype, unit, errors.is_empty()) else {
        tracing::debug!(?errors, "Rejected generate-plans request");
        return Err(ApiError::Validation(errors));
    };

    let mut batch = BatchRequest::for_archetype(engine.config(), archetype)?;
    batch.budget = request.budget;
    batch.seed = request.seed;
    if let Some(n) = request.variants {
        batch.variants = n;
    }
    if let Some(shape) = &request.shape {
        batch.shape = ParcelShape::parse_or_default(shape);
    }

    if let (Some(w), Some(h)) = (request.width, request.height) {
        batch.width = w;
        batch.height = h;
    } else if let Some(area) = request.area {
        let (w, h) = parcel_dims_from_area(unit.to_square_metres(area));
        batch.width = w;
        batch.height = h;
    }

    if archetype == Archetype::House {
        if let Some(bedrooms) = request.bedrooms {
            batch.house.bedrooms = bedrooms;
        }
        if let Some(baths) = request.baths {
            batch.house.baths = baths;
        }
        if let Some(with_study) = request.with_study {
            batch.house.with_study = with_study;
        }
    }

    let floors = request.floors.unwrap_or(1);
    if floors > 1 {
        tracing::warn!(floors, "Multi-storey request; generating a single storey");
    }

    let project = ProjectInfo {
        project_type: archetype,
        budget: batch.budget,
        floors,
        shape: batch.shape.to_string(),
        width: batch.width,
        height: batch.height,
        area_m2: batch.width * batch.height,
    };

    Ok((batch, project))
}

/// Generate every design of a batch on the rayon pool.
pub fn generate_plans(
    engine: &LayoutEngine,
    batch: &BatchRequest,
) -> Result<(Vec<Variant>, GenerationStats), ApiError> {
    let start = std::time::Instant::now();

    let designs = engine.generate_variants(batch)?;

    let stats = GenerationStats {
        designs: designs.len(),
        base_seed: designs.first().map(|d| d.seed).unwrap_or_default(),
        total_zones: designs.iter().map(|d| d.layout.zones.len()).sum(),
        total_doors: designs.iter().map(|d| d.layout.doors.len()).sum(),
        generation_time_ms: start.elapsed().as_millis() as u64,
    };

    tracing::info!(
        archetype = %batch.archetype,
        designs = stats.designs,
        base_seed = stats.base_seed,
        total_zones = stats.total_zones,
        generation_time_ms = stats.generation_time_ms,
        "Design generation complete"
    );

    Ok((designs, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(project_type: &str, budget: f64) -> GeneratePlansRequest {
        GeneratePlansRequest {
            project_type: project_type.to_string(),
            budget,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_fill_parcel() {
        let engine = LayoutEngine::default();
        let (batch, project) = resolve_batch(&engine, &request("HOUSE", 350_000.0), 12).unwrap();
        assert_eq!(batch.archetype, Archetype::House);
        assert_eq!((batch.width, batch.height), (24.0, 14.0));
        assert_eq!(batch.variants, floorgen_layout::DEFAULT_VARIANTS);
        assert_eq!(project.floors, 1);
        assert_eq!(project.shape, "rectangle");
    }

    #[test]
    fn test_dunum_area_is_converted() {
        let engine = LayoutEngine::default();
        let mut req = request("school", 1_500_000.0);
        req.area = Some(3.4);
        req.area_unit = Some("dunum".into());
        let (batch, project) = resolve_batch(&engine, &req, 12).unwrap();
        assert!((project.area_m2 - 3400.0).abs() < 1e-6);
        assert!((batch.width / batch.height - 1.7).abs() < 1e-9);
    }

    #[test]
    fn test_all_validation_errors_reported() {
        let engine = LayoutEngine::default();
        let mut req = request("", -5.0);
        req.area = Some(0.0);
        req.area_unit = Some("acre".into());
        req.floors = Some(0);
        match resolve_batch(&engine, &req, 12) {
            Err(ApiError::Validation(errors)) => assert_eq!(errors.len(), 5),
            other => panic!("unexpected {:?}", other.map(|(_, p)| p)),
        }
    }

    #[test]
    fn test_variant_limit() {
        let engine = LayoutEngine::default();
        let mut req = request("COMPANY", 800_000.0);
        req.variants = Some(50);
        assert!(matches!(
            resolve_batch(&engine, &req, 12),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_house_options_only_apply_to_houses() {
        let engine = LayoutEngine::default();
        let mut req = request("HOSPITAL", 2_000_000.0);
        req.bedrooms = Some(6);
        let (batch, _) = resolve_batch(&engine, &req, 12).unwrap();
        assert_eq!(batch.house.bedrooms, 3);
    }

    #[test]
    fn test_generate_plans_is_seeded() {
        let engine = LayoutEngine::default();
        let mut req = request("HOUSE", 350_000.0);
        req.seed = Some(42);
        req.variants = Some(2);
        let (batch, _) = resolve_batch(&engine, &req, 12).unwrap();
        let (designs, stats) = generate_plans(&engine, &batch).unwrap();
        assert_eq!(designs.len(), 2);
        assert_eq!(stats.base_seed, 42);
        assert_eq!(designs[1].seed, 43);
        assert!(stats.total_zones >= designs[0].layout.zones.len());
    }
}
