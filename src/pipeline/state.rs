use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::UrgencyLevel;

/// Accumulator threaded through the pipeline steps and returned to the
/// caller verbatim. Once `error_message` is set, every later step becomes a
/// pass-through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    pub patient_id: String,
    pub original_query: String,
    pub uploaded_file_name: Option<String>,
    /// Prompt digest of the patient's profile, attached by the context step.
    pub patient_context: Option<String>,
    pub ai_response: Option<String>,
    pub safety_score: Option<i32>,
    pub confidence_score: Option<i32>,
    pub urgency_level: Option<UrgencyLevel>,
    pub needs_urgent_review: Option<bool>,
    /// Id of the persisted record, once the save step has run.
    pub query_id: Option<Uuid>,
    pub final_response_to_patient: Option<String>,
    pub error_message: Option<String>,
}

impl PipelineState {
    pub fn new(patient_id: &str, original_query: &str, uploaded_file_name: Option<String>) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            original_query: original_query.to_string(),
            uploaded_file_name,
            patient_context: None,
            ai_response: None,
            safety_score: None,
            confidence_score: None,
            urgency_level: None,
            needs_urgent_review: None,
            query_id: None,
            final_response_to_patient: None,
            error_message: None,
        }
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }
}
