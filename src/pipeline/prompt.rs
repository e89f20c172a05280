pub const DRAFT_SYSTEM_PROMPT: &str = r#"You are a medical AI assistant drafting an answer that a licensed doctor will review before the patient sees it.

ABSOLUTE RULES — NO EXCEPTIONS:
1. NEVER diagnose. Do not tell the patient what condition they have.
2. NEVER prescribe, stop, or adjust medication.
3. Always recommend consulting a healthcare provider for medical decisions.
4. Be empathetic and concrete; plain language, no jargon.
5. If the question describes urgent symptoms (chest pain, trouble breathing, loss of consciousness, severe pain), tell the patient to seek immediate medical attention.
6. Stay within the patient context provided; do not invent history."#;

/// Assemble the prompt body: the patient digest followed by the raw question.
pub fn build_draft_prompt(query: &str, patient_context: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(patient_context);
    prompt.push('\n');
    prompt.push_str(&format!("Patient question: {query}\n\n"));
    prompt.push_str("Provide a safe, helpful draft response:");
    prompt
}

/// Fixed text substituted whenever the generative capability fails or
/// returns nothing. Defers entirely to the human clinician.
pub fn fallback_response() -> String {
    "I'm sorry, I can't generate a detailed draft right now. Your question has been \
     passed to your doctor, who will respond personally. In the meantime, please \
     consult your doctor or speak with your healthcare provider about any medical \
     decision, and if your symptoms feel urgent, seek immediate medical attention."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_enforces_no_diagnosis_or_prescription() {
        assert!(DRAFT_SYSTEM_PROMPT.contains("NEVER diagnose"));
        assert!(DRAFT_SYSTEM_PROMPT.contains("NEVER prescribe"));
        assert!(DRAFT_SYSTEM_PROMPT.contains("consulting a healthcare provider"));
    }

    #[test]
    fn prompt_contains_context_and_query() {
        let prompt = build_draft_prompt(
            "Can I eat mangoes?",
            "Patient: Sarah Johnson (47 year old Female)",
        );
        assert!(prompt.contains("Sarah Johnson"));
        assert!(prompt.contains("Patient question: Can I eat mangoes?"));
    }

    #[test]
    fn fallback_defers_to_the_clinician() {
        let text = fallback_response();
        assert!(text.contains("consult your doctor"));
        assert!(text.contains("seek immediate medical attention"));
    }
}
