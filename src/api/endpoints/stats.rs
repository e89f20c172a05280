//! Review-dashboard statistics.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct DoctorStatsResponse {
    pub today: i64,
    pub responses: i64,
    pub pending: i64,
    /// Static for the demo; a real deployment would derive this from
    /// reviewed_at − timestamp.
    pub avg_time: &'static str,
}

/// `GET /doctor_stats` — today's workload counters.
pub async fn doctor_stats(
    State(ctx): State<ApiContext>,
) -> Result<Json<DoctorStatsResponse>, ApiError> {
    let stats = ctx.store.review_stats()?;
    let pending = ctx.store.pending_count()?;
    Ok(Json(DoctorStatsResponse {
        today: stats.today,
        responses: stats.responses,
        pending,
        avg_time: "2.1 hrs",
    }))
}
