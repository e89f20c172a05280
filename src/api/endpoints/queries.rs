//! Query endpoints.
//!
//! - `POST /process_query` — run the pipeline for one submission
//! - `GET /pending_queries` — review queue, most urgent first
//! - `POST /update_query/:id` — doctor decision
//! - `GET /queries/by_patient/:patient_id` — a patient's history

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{QueryRecord, QueryStatus};
use crate::pipeline::PipelineState;

#[derive(Deserialize)]
pub struct PatientQueryRequest {
    pub patient_id: String,
    pub query: String,
    pub uploaded_file_name: Option<String>,
}

/// `POST /process_query` — run the full pipeline once.
///
/// The generation step may block on the local model, so the pipeline runs on
/// a blocking worker. An in-state error (unknown patient) maps to 400, the
/// same as a pre-pipeline validation failure.
pub async fn process(
    State(ctx): State<ApiContext>,
    Json(req): Json<PatientQueryRequest>,
) -> Result<Json<PipelineState>, ApiError> {
    let pipeline = Arc::clone(&ctx.pipeline);
    let state = tokio::task::spawn_blocking(move || {
        let PatientQueryRequest {
            patient_id,
            query,
            uploaded_file_name,
        } = req;
        pipeline.process(&patient_id, &query, uploaded_file_name)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("pipeline task failed: {e}")))??;

    if let Some(message) = &state.error_message {
        return Err(ApiError::BadRequest(message.clone()));
    }
    Ok(Json(state))
}

/// `GET /pending_queries` — everything awaiting doctor review, pre-sorted.
pub async fn pending(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<QueryRecord>>, ApiError> {
    let records = ctx.store.list_pending()?;
    Ok(Json(records))
}

#[derive(Deserialize)]
pub struct DoctorAction {
    pub new_status: String,
    pub doctor_response: Option<String>,
}

#[derive(Serialize)]
pub struct UpdateResponse {
    pub status: &'static str,
    pub message: String,
    pub record: QueryRecord,
}

/// `POST /update_query/:id` — apply a doctor-review decision.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(query_id): Path<String>,
    Json(action): Json<DoctorAction>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let id = Uuid::parse_str(&query_id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid query ID: {e}")))?;
    let new_status = QueryStatus::from_str(&action.new_status)
        .map_err(|_| ApiError::BadRequest(format!("Unknown status '{}'", action.new_status)))?;

    let record = ctx
        .store
        .update_status(&id, new_status, action.doctor_response.as_deref())?;

    Ok(Json(UpdateResponse {
        status: "success",
        message: "Status updated successfully.".to_string(),
        record,
    }))
}

/// `GET /queries/by_patient/:patient_id` — history for the patient portal.
pub async fn by_patient(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<QueryRecord>>, ApiError> {
    let records = ctx.store.list_by_patient(&patient_id)?;
    Ok(Json(records))
}
