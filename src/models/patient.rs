use serde::{Deserialize, Serialize};

/// A demo patient's medical profile. Read-only reference data; in production
/// this would come from an EHR integration rather than the seeded directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub ethnicity: String,
    pub diabetes_type: String,
    pub diagnosis_date: String,
    pub years_since_diagnosis: f32,
    pub hba1c: String,
    pub last_fasting_glucose: String,
    pub blood_pressure: String,
    pub medications: Vec<MedicationEntry>,
    pub complications: Vec<Complication>,
    pub comorbidities: Vec<String>,
    pub lifestyle_notes: Vec<String>,
    pub care_team: Vec<CareTeamContact>,
    /// Hard-coded flags the drafting and scoring steps must not miss
    /// (e.g. first-trimester pregnancy, cognitive impairment).
    pub special_considerations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationEntry {
    pub name: String,
    pub dose: String,
    pub duration: String,
}

/// One complication axis with its current finding. A finding of "None"
/// means the complication is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complication {
    pub label: String,
    pub finding: String,
}

impl Complication {
    pub fn is_present(&self) -> bool {
        self.finding != "None" && self.finding != "Normal kidney function"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareTeamContact {
    pub role: String,
    pub name: String,
}

impl PatientProfile {
    /// Cases where pregnancy changes what a safe answer looks like.
    pub fn is_pregnancy_sensitive(&self) -> bool {
        self.special_considerations
            .iter()
            .any(|c| c.to_lowercase().contains("pregnan"))
    }

    /// Elderly patients with active complications or comorbidities need
    /// conservative drafts.
    pub fn is_elderly_complicated(&self) -> bool {
        self.age >= 65
            && (self.complications.iter().any(|c| c.is_present()) || !self.comorbidities.is_empty())
    }

    pub fn active_complications(&self) -> Vec<&Complication> {
        self.complications.iter().filter(|c| c.is_present()).collect()
    }
}

/// Roster entry for patient-selection surfaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientListing {
    pub id: String,
    pub name: String,
    pub diabetes_type: String,
}

/// Compact card shown next to a query in the review queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSummary {
    pub name: String,
    pub diabetes_type: String,
    pub current_hba1c: String,
    pub years_with_diabetes: f32,
    pub key_medications: usize,
    pub has_complications: bool,
}
