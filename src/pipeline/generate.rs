//! Draft response generator.
//!
//! Priority order: pre-authored scenario answers first, then the generative
//! capability, then the fixed fallback text. `generate` never fails: a
//! missing or broken model degrades to the fallback, not to an error.

use crate::models::PatientProfile;
use crate::patients;

use super::ollama::GenerationError;
use super::prompt;
use super::scenarios;

/// Seam for the generative capability so tests can substitute a mock and the
/// server can run without a local model.
pub trait DraftModel: Send + Sync {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError>;
}

pub struct DraftGenerator {
    model: Option<Box<dyn DraftModel>>,
}

impl DraftGenerator {
    pub fn new(model: Option<Box<dyn DraftModel>>) -> Self {
        Self { model }
    }

    /// Generator with no model attached; every unrecognized query gets the
    /// fallback text.
    pub fn without_model() -> Self {
        Self { model: None }
    }

    /// Produce the draft answer for a query. Scenario patterns are checked
    /// before the model is invoked.
    pub fn generate(&self, query: &str, profile: &PatientProfile) -> String {
        if let Some(scenario) = scenarios::match_scenario(query) {
            tracing::debug!(?scenario, patient_id = %profile.id, "Using pre-authored scenario answer");
            return scenarios::render(scenario, profile);
        }

        let Some(model) = self.model.as_deref() else {
            tracing::debug!("No draft model attached; using fallback response");
            return prompt::fallback_response();
        };

        let context = patients::render_for_prompt(profile);
        let body = prompt::build_draft_prompt(query, &context);
        match model.generate(prompt::DRAFT_SYSTEM_PROMPT, &body) {
            Ok(draft) if !draft.trim().is_empty() => draft,
            Ok(_) => {
                tracing::warn!(patient_id = %profile.id, "Model returned empty draft; using fallback");
                prompt::fallback_response()
            }
            Err(e) => {
                tracing::warn!(error = %e, patient_id = %profile.id, "Draft generation failed; using fallback");
                prompt::fallback_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patients::PatientDirectory;

    struct FixedModel(&'static str);

    impl DraftModel for FixedModel {
        fn generate(&self, _system: &str, _prompt: &str) -> Result<String, GenerationError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingModel;

    impl DraftModel for FailingModel {
        fn generate(&self, _system: &str, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Connection("http://localhost:11434".into()))
        }
    }

    struct PanickyModel;

    impl DraftModel for PanickyModel {
        fn generate(&self, _system: &str, _prompt: &str) -> Result<String, GenerationError> {
            panic!("model must not be called for scenario queries");
        }
    }

    fn profile() -> PatientProfile {
        PatientDirectory::seeded().lookup("P001").unwrap().clone()
    }

    #[test]
    fn scenario_match_bypasses_the_model() {
        let generator = DraftGenerator::new(Some(Box::new(PanickyModel)));
        let draft = generator.generate("My blood sugar reading is 250 mg/dL after lunch", &profile());
        assert!(draft.contains("Sarah Johnson"));
        assert!(draft.contains("recheck"));
    }

    #[test]
    fn unrecognized_query_goes_to_the_model() {
        let generator = DraftGenerator::new(Some(Box::new(FixedModel(
            "Mangoes in moderation fit most meal plans; consult your doctor for specifics.",
        ))));
        let draft = generator.generate("Can I eat mangoes?", &profile());
        assert!(draft.contains("Mangoes"));
    }

    #[test]
    fn model_failure_yields_fallback_not_error() {
        let generator = DraftGenerator::new(Some(Box::new(FailingModel)));
        let draft = generator.generate("Can I eat mangoes?", &profile());
        assert_eq!(draft, prompt::fallback_response());
    }

    #[test]
    fn empty_model_output_yields_fallback() {
        let generator = DraftGenerator::new(Some(Box::new(FixedModel("   "))));
        let draft = generator.generate("Can I eat mangoes?", &profile());
        assert_eq!(draft, prompt::fallback_response());
    }

    #[test]
    fn missing_model_yields_fallback() {
        let generator = DraftGenerator::without_model();
        let draft = generator.generate("Can I eat mangoes?", &profile());
        assert_eq!(draft, prompt::fallback_response());
    }
}
