use crate::api::models::*;
use crate::nutrition::{body_mass_index, suggest_intake};
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

/// Direct lookup of the fixed nutrition table.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Path(label): Path<String>,
) -> Result<Json<NutritionResponse>, AppError> {
    info!(label = %label, "Nutrition lookup");

    match state.nutrition.lookup(&label) {
        Some(record) => Ok(Json(NutritionResponse {
            food_name: label.to_lowercase(),
            nutrition: *record,
        })),
        None => Err(AppError::NotFound(format!(
            "No nutrition facts for {:?}",
            label
        ))),
    }
}

/// Daily intake suggestion from biometrics alone, no photo needed.
pub async fn intake_handler(
    Json(request): Json<BiometricsRequest>,
) -> Result<Json<IntakeResponse>, AppError> {
    // Validate
    request.validate().map_err(AppError::BadRequest)?;

    let biometrics = request.to_biometrics();

    Ok(Json(IntakeResponse {
        suggestion: suggest_intake(&biometrics),
        bmi: body_mass_index(biometrics.height_cm, biometrics.weight_kg),
    }))
}
