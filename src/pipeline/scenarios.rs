//! Pre-authored demo scenario answers.
//!
//! Recognized query patterns get a deterministic, clinician-vetted answer
//! tailored to the patient's profile instead of a generated draft. Matching
//! is checked BEFORE the generative capability is invoked; the ordering here
//! is the priority order.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::PatientProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// An elevated glucose reading, reported by value or described as high.
    HighGlucose,
    /// Dizziness or a low reading (possible hypoglycemia).
    LowGlucoseSymptoms,
    /// Any pregnancy-related question.
    Pregnancy,
}

/// Matches a reported glucose reading in the 200–499 mg/dL band,
/// e.g. "250 mg/dL" or "310mg/dl".
static GLUCOSE_READING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[2-4]\d{2}\s*mg/?dl\b").expect("Invalid glucose reading pattern")
});

/// Case-insensitive substring check against the query, first match wins.
pub fn match_scenario(query: &str) -> Option<Scenario> {
    let q = query.to_lowercase();

    let mentions_glucose = q.contains("blood sugar") || q.contains("glucose");
    if q.contains("250") || GLUCOSE_READING.is_match(&q) || (mentions_glucose && q.contains("high"))
    {
        return Some(Scenario::HighGlucose);
    }
    if q.contains("dizzy") || q.contains("low") {
        return Some(Scenario::LowGlucoseSymptoms);
    }
    if q.contains("pregnan") {
        return Some(Scenario::Pregnancy);
    }
    None
}

/// Render the pre-authored answer for a matched scenario, tailored to the
/// patient. The wording stays inside the drafting guardrails: no diagnosis,
/// no medication changes, always a path back to the care team.
pub fn render(scenario: Scenario, profile: &PatientProfile) -> String {
    match scenario {
        Scenario::HighGlucose => high_glucose_answer(profile),
        Scenario::LowGlucoseSymptoms => low_glucose_answer(profile),
        Scenario::Pregnancy => pregnancy_answer(profile),
    }
}

fn high_glucose_answer(profile: &PatientProfile) -> String {
    format!(
        "Thank you for sharing this reading, {}. A level in that range is above your \
         usual numbers and worth taking seriously, without panicking. Drink water, hold \
         off on additional carbohydrates, and recheck in one to two hours. Keep following \
         your current treatment plan as prescribed, and consult your doctor if readings \
         stay elevated into tomorrow. If vomiting, confusion, or rapid breathing develop, \
         seek immediate medical attention.",
        profile.name
    )
}

fn low_glucose_answer(profile: &PatientProfile) -> String {
    let mut answer = format!(
        "Dizziness can be a sign of low blood sugar, {}. If you can, check your level \
         now. If it reads low, take something with fast-acting sugar — juice or glucose \
         tablets — then recheck in 15 minutes, and sit down until the feeling passes. If \
         it does not improve after a second round, seek immediate medical attention.",
        profile.name
    );
    if profile
        .medications
        .iter()
        .any(|m| m.name.to_lowercase().contains("insulin"))
    {
        answer.push_str(
            " Since insulin is part of your plan, please consult your doctor before your \
             next dose if you are unsure what caused this.",
        );
    }
    answer.push_str(" Your doctor will review this message today.");
    answer
}

fn pregnancy_answer(profile: &PatientProfile) -> String {
    format!(
        "This is exactly the right kind of question to raise, {}. Glucose targets are \
         tighter during pregnancy, so your care team watches these numbers closely. \
         Please keep to the meal plan they set, and do not adjust any medication on your \
         own. Your doctor will review this with priority given your pregnancy. If severe \
         headaches, blurred vision, or persistent high readings appear, seek immediate \
         medical attention.",
        profile.name
    )
}
