//! Pipeline orchestrator.
//!
//! Linear state machine with an absorbing error state:
//! validate → fetch context → generate draft → evaluate → persist.
//! A step that finds `error_message` already set does nothing.

use std::sync::Arc;

use crate::models::{NewQuery, UrgencyLevel};
use crate::patients::{self, PatientDirectory};
use crate::store::QueryStore;

use super::evaluate;
use super::generate::DraftGenerator;
use super::state::PipelineState;
use super::PipelineError;

pub struct QueryPipeline {
    directory: Arc<PatientDirectory>,
    generator: DraftGenerator,
    store: Arc<QueryStore>,
}

impl QueryPipeline {
    pub fn new(
        directory: Arc<PatientDirectory>,
        generator: DraftGenerator,
        store: Arc<QueryStore>,
    ) -> Self {
        Self {
            directory,
            generator,
            store,
        }
    }

    /// Run the full pipeline for one submission.
    ///
    /// Validation failures and persistence failures are typed errors; an
    /// unknown patient is reported inside the returned state, mirroring the
    /// contract the review UI consumes.
    pub fn process(
        &self,
        patient_id: &str,
        query: &str,
        uploaded_file_name: Option<String>,
    ) -> Result<PipelineState, PipelineError> {
        if patient_id.trim().is_empty() {
            return Err(PipelineError::Validation("Patient id must not be empty".into()));
        }
        if query.trim().is_empty() {
            return Err(PipelineError::Validation("Query text must not be empty".into()));
        }

        let mut state = PipelineState::new(patient_id, query, uploaded_file_name);
        tracing::info!(patient_id = %state.patient_id, "Processing patient query");

        self.fetch_context(&mut state);
        self.generate_draft(&mut state);
        self.evaluate_draft(&mut state);
        self.persist(&mut state)?;

        if let Some(msg) = &state.error_message {
            tracing::warn!(patient_id = %state.patient_id, error = %msg, "Pipeline ended in error state");
        }
        Ok(state)
    }

    fn fetch_context(&self, state: &mut PipelineState) {
        match self.directory.lookup(&state.patient_id) {
            Some(profile) => {
                state.patient_context = Some(patients::render_for_prompt(profile));
            }
            None => {
                state.fail(format!("Patient ID '{}' not found.", state.patient_id));
            }
        }
    }

    fn generate_draft(&self, state: &mut PipelineState) {
        if state.has_error() {
            return;
        }
        // lookup cannot miss here; fetch_context already resolved the id.
        let Some(profile) = self.directory.lookup(&state.patient_id) else {
            return;
        };
        state.ai_response = Some(self.generator.generate(&state.original_query, profile));
    }

    fn evaluate_draft(&self, state: &mut PipelineState) {
        if state.has_error() {
            return;
        }
        let draft = match state.ai_response.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => return,
        };
        let Some(profile) = self.directory.lookup(&state.patient_id) else {
            return;
        };

        let eval = evaluate::evaluate(&state.original_query, draft, profile);
        state.safety_score = Some(eval.safety_score);
        state.confidence_score = Some(eval.confidence_score);
        state.urgency_level = Some(eval.urgency_level);
        state.needs_urgent_review = Some(eval.needs_urgent_review);
    }

    fn persist(&self, state: &mut PipelineState) -> Result<(), PipelineError> {
        if state.has_error() {
            return Ok(());
        }

        let urgency = state.urgency_level.unwrap_or(UrgencyLevel::Low);
        let record = self.store.save(NewQuery {
            patient_id: state.patient_id.clone(),
            original_query: state.original_query.clone(),
            ai_response: state.ai_response.clone(),
            safety_score: state.safety_score.unwrap_or(0),
            confidence_score: state.confidence_score.unwrap_or(0),
            urgency_level: urgency,
            needs_urgent_review: state.needs_urgent_review.unwrap_or(false),
        })?;

        state.query_id = Some(record.id);
        state.final_response_to_patient = Some(acknowledgment_for(urgency));
        Ok(())
    }
}

/// Patient-facing acknowledgment, toned by urgency tier.
fn acknowledgment_for(urgency: UrgencyLevel) -> String {
    match urgency {
        UrgencyLevel::High => {
            "Your question has been flagged for urgent review and a doctor will respond \
             as soon as possible. If your symptoms are severe or getting worse, please \
             seek emergency care now rather than waiting for a reply."
        }
        UrgencyLevel::Medium => {
            "Your question has been sent to your doctor for priority review. You can \
             expect a response within a few hours."
        }
        UrgencyLevel::Low => {
            "Your question has been sent to your doctor for review. You can expect a \
             response within 24 hours."
        }
    }
    .to_string()
}
