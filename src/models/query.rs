use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{QueryStatus, UrgencyLevel};

/// One submitted patient question and everything the pipeline attached to it.
/// The unit of persistence and the unit of clinician review. Records are
/// append-only; the doctor-review update is the only mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub patient_id: String,
    pub original_query: String,
    pub ai_response: Option<String>,
    pub safety_score: i32,
    pub confidence_score: i32,
    pub urgency_level: UrgencyLevel,
    pub needs_urgent_review: bool,
    pub status: QueryStatus,
    pub doctor_final_response: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Fields the pipeline hands to the store. Id, timestamp, and status are
/// assigned by the store on insert.
#[derive(Debug, Clone)]
pub struct NewQuery {
    pub patient_id: String,
    pub original_query: String,
    pub ai_response: Option<String>,
    pub safety_score: i32,
    pub confidence_score: i32,
    pub urgency_level: UrgencyLevel,
    pub needs_urgent_review: bool,
}
