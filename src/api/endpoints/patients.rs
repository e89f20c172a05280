//! Patient directory endpoints.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{PatientListing, PatientProfile, PatientSummary};

/// `GET /patients` — demo roster for login/selection surfaces.
pub async fn list(State(ctx): State<ApiContext>) -> Json<Vec<PatientListing>> {
    Json(ctx.patients.list())
}

/// `GET /patients/:id` — full profile.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientProfile>, ApiError> {
    ctx.patients
        .lookup(&patient_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Patient ID '{patient_id}' not found.")))
}

/// `GET /patients/:id/summary` — compact card for the review queue.
pub async fn summary(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientSummary>, ApiError> {
    ctx.patients
        .summary(&patient_id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Patient ID '{patient_id}' not found.")))
}
