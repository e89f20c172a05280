//! Response evaluator.
//!
//! Deterministic keyword scoring over the query and the draft, with no
//! external calls. Produces the safety score, confidence score, and urgency
//! tier a reviewing doctor sees next to every pending query.

use serde::{Deserialize, Serialize};

use crate::models::{PatientProfile, UrgencyLevel};

/// Phrases a safe draft must not contain. Each hit costs 30 points.
static UNSAFE_PHRASES: &[&str] = &[
    "you have",
    "you are diagnosed with",
    "stop taking",
    "change your dose",
    "ignore your doctor",
];

/// Phrases that defer to professional care. Each hit restores 10 points.
static SAFE_PHRASES: &[&str] = &[
    "consult your doctor",
    "speak with your healthcare provider",
    "medical attention",
    "emergency",
    "call 911",
    "seek immediate",
];

/// Query wording that lowers drafting confidence.
static URGENT_QUERY_KEYWORDS: &[&str] = &[
    "chest pain",
    "dizzy",
    "unconscious",
    "severe",
    "emergency",
];

/// High tier is checked first; any hit wins regardless of other matches.
static HIGH_URGENCY_KEYWORDS: &[&str] = &[
    "chest pain",
    "can't breathe",
    "unconscious",
    "severe pain",
    "over 400",
    "under 50",
    "vomiting",
    "confusion",
    "blurred vision",
    "emergency",
];

static MEDIUM_URGENCY_KEYWORDS: &[&str] = &[
    "dizzy",
    "nausea",
    "headache",
    "high blood sugar",
    "low blood sugar",
    "infection",
    "fever",
    "swelling",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Evaluation {
    pub safety_score: i32,
    pub confidence_score: i32,
    pub urgency_level: UrgencyLevel,
    pub needs_urgent_review: bool,
}

/// Score a draft against its query and the patient's profile.
pub fn evaluate(query: &str, draft: &str, profile: &PatientProfile) -> Evaluation {
    let urgency_level = classify_urgency(query);
    Evaluation {
        safety_score: safety_score(draft),
        confidence_score: confidence_score(query, draft, profile),
        urgency_level,
        needs_urgent_review: urgency_level != UrgencyLevel::Low,
    }
}

/// Start at 100, −30 per unsafe phrase, +10 per safe phrase, clamp to [0,100].
/// Matches are case-insensitive substrings; each phrase counts once.
pub fn safety_score(draft: &str) -> i32 {
    let text = draft.to_lowercase();
    let mut score: i32 = 100;
    score -= 30 * count_hits(&text, UNSAFE_PHRASES);
    score += 10 * count_hits(&text, SAFE_PHRASES);
    score.clamp(0, 100)
}

/// Start at 85; drop for pregnancy-sensitive and elderly/complicated
/// profiles and for urgent query wording; small bonus for a draft of
/// reasonable length. Clamp to [0,100].
pub fn confidence_score(query: &str, draft: &str, profile: &PatientProfile) -> i32 {
    let query_lower = query.to_lowercase();
    let mut score: i32 = 85;

    if profile.is_pregnancy_sensitive() {
        score -= 15;
    }
    if profile.is_elderly_complicated() {
        score -= 10;
    }
    if count_hits(&query_lower, URGENT_QUERY_KEYWORDS) > 0 {
        score -= 20;
    }
    if draft.len() > 100 && draft.len() < 500 {
        score += 5;
    }

    score.clamp(0, 100)
}

/// First matching tier wins; high is checked before medium.
pub fn classify_urgency(query: &str) -> UrgencyLevel {
    let text = query.to_lowercase();
    if HIGH_URGENCY_KEYWORDS.iter().any(|k| text.contains(k)) {
        UrgencyLevel::High
    } else if MEDIUM_URGENCY_KEYWORDS.iter().any(|k| text.contains(k)) {
        UrgencyLevel::Medium
    } else {
        UrgencyLevel::Low
    }
}

fn count_hits(text: &str, phrases: &[&str]) -> i32 {
    phrases.iter().filter(|p| text.contains(*p)).count() as i32
}
