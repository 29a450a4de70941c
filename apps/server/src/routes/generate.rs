// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan generation endpoint.

use crate::error::ApiError;
use crate::services::{generate_plans, resolve_batch};
use crate::types::{GeneratePlansRequest, GeneratePlansResponse};
use crate::AppState;
use axum::{extract::State, Json};

/// POST /api/v1/generate-plans - Generate design variants for a project.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GeneratePlansRequest>,
) -> Result<Json<GeneratePlansResponse>, ApiError> {
    tracing::info!(
        project_type = %request.project_type,
        budget = request.budget,
        area = ?request.area,
        area_unit = ?request.area_unit,
        "Received project configuration"
    );

    let (batch, project) = resolve_batch(&state.engine, &request, state.config.max_variants)?;

    // Generation is CPU-bound; keep it off the async workers
    let engine = state.engine.clone();
    let (designs, stats) =
        tokio::task::spawn_blocking(move || generate_plans(&engine, &batch)).await??;

    Ok(Json(GeneratePlansResponse {
        success: true,
        message: "Architectural plans generated successfully.".to_string(),
        project,
        designs,
        stats,
    }))
}
