//! Patient context provider.
//!
//! A seeded, read-only directory of demo patient profiles. Lookup is pure and
//! deterministic; the prompt digest is the only patient context the drafting
//! step ever sees.

use std::collections::BTreeMap;

use crate::models::{
    CareTeamContact, Complication, MedicationEntry, PatientListing, PatientProfile, PatientSummary,
};

/// In-memory patient roster. In production this would be an EHR lookup; the
/// demo ships five profiles that cover the scoring edge cases (pregnancy,
/// elderly with comorbidities, type 1, stable type 2).
pub struct PatientDirectory {
    profiles: BTreeMap<String, PatientProfile>,
}

impl PatientDirectory {
    /// Build the directory with the five demo patients.
    pub fn seeded() -> Self {
        let mut profiles = BTreeMap::new();
        for profile in demo_profiles() {
            profiles.insert(profile.id.clone(), profile);
        }
        Self { profiles }
    }

    /// Pure read. Unknown ids return None; the pipeline turns that into a
    /// terminal error.
    pub fn lookup(&self, patient_id: &str) -> Option<&PatientProfile> {
        self.profiles.get(patient_id)
    }

    /// Roster for patient-selection surfaces.
    pub fn list(&self) -> Vec<PatientListing> {
        self.profiles
            .values()
            .map(|p| PatientListing {
                id: p.id.clone(),
                name: p.name.clone(),
                diabetes_type: p.diabetes_type.clone(),
            })
            .collect()
    }

    /// Compact card for the review queue.
    pub fn summary(&self, patient_id: &str) -> Option<PatientSummary> {
        self.lookup(patient_id).map(|p| PatientSummary {
            name: p.name.clone(),
            diabetes_type: p.diabetes_type.clone(),
            current_hba1c: p.hba1c.clone(),
            years_with_diabetes: p.years_since_diagnosis,
            key_medications: p.medications.len(),
            has_complications: p.complications.iter().any(|c| c.is_present()),
        })
    }
}

/// Compact textual digest of a profile for the generation prompt: identity,
/// diabetes status, active medications, present complications, and any
/// special-consideration flags.
pub fn render_for_prompt(profile: &PatientProfile) -> String {
    let mut digest = String::new();
    digest.push_str(&format!(
        "Patient: {} ({} year old {})\n",
        profile.name, profile.age, profile.gender
    ));
    digest.push_str(&format!("Diabetes Type: {}\n", profile.diabetes_type));
    digest.push_str(&format!(
        "Years since diagnosis: {}\n",
        profile.years_since_diagnosis
    ));
    digest.push_str(&format!("Current HbA1c: {}\n", profile.hba1c));
    digest.push_str(&format!("Last Glucose: {}\n", profile.last_fasting_glucose));

    digest.push_str("\nCurrent Medications:\n");
    for med in &profile.medications {
        digest.push_str(&format!("- {}: {}\n", med.name, med.dose));
    }

    let complications: Vec<String> = profile
        .active_complications()
        .iter()
        .map(|c| format!("{}: {}", c.label, c.finding))
        .collect();
    if !complications.is_empty() {
        digest.push_str(&format!("\nKey Complications: {}\n", complications.join(", ")));
    }

    for consideration in &profile.special_considerations {
        digest.push_str(&format!("\nIMPORTANT: {consideration}\n"));
    }

    digest
}

fn med(name: &str, dose: &str, duration: &str) -> MedicationEntry {
    MedicationEntry {
        name: name.to_string(),
        dose: dose.to_string(),
        duration: duration.to_string(),
    }
}

fn complication(label: &str, finding: &str) -> Complication {
    Complication {
        label: label.to_string(),
        finding: finding.to_string(),
    }
}

fn contact(role: &str, name: &str) -> CareTeamContact {
    CareTeamContact {
        role: role.to_string(),
        name: name.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn demo_profiles() -> Vec<PatientProfile> {
    vec![
        PatientProfile {
            id: "P001".into(),
            name: "Sarah Johnson".into(),
            age: 47,
            gender: "Female".into(),
            ethnicity: "African American".into(),
            diabetes_type: "Type 2".into(),
            diagnosis_date: "2022-03-15".into(),
            years_since_diagnosis: 2.5,
            hba1c: "6.9%".into(),
            last_fasting_glucose: "130 mg/dL".into(),
            blood_pressure: "125/75 mmHg".into(),
            medications: vec![
                med("Metformin", "1000mg BID", "2.5 years"),
                med("Lisinopril", "15mg daily", "2.5 years"),
                med("Empagliflozin", "10mg daily", "2 years"),
            ],
            complications: vec![
                complication("Retinopathy", "None"),
                complication("Neuropathy", "None"),
                complication("Nephropathy", "Normal kidney function"),
            ],
            comorbidities: vec![],
            lifestyle_notes: strings(&[
                "45 minutes daily walking",
                "Low-carb, following meal plan",
                "Non-smoker",
            ]),
            care_team: vec![
                contact("Primary", "Dr. Emily Chen"),
                contact("Endocrinologist", "Dr. Michael Roberts"),
                contact("Dietitian", "Jane Smith, RD"),
            ],
            special_considerations: vec![],
        },
        PatientProfile {
            id: "P002".into(),
            name: "Michael Thompson".into(),
            age: 19,
            gender: "Male".into(),
            ethnicity: "Caucasian".into(),
            diabetes_type: "Type 1".into(),
            diagnosis_date: "2021-09-08".into(),
            years_since_diagnosis: 3.0,
            hba1c: "7.8%".into(),
            last_fasting_glucose: "155 mg/dL".into(),
            blood_pressure: "122/78 mmHg".into(),
            medications: vec![med(
                "Insulin Pump (Aspart)",
                "Basal 1.2 units/hour",
                "6 months",
            )],
            complications: vec![
                complication("Retinopathy", "None"),
                complication("Neuropathy", "None"),
                complication("Nephropathy", "Normal kidney function"),
            ],
            comorbidities: vec![],
            lifestyle_notes: strings(&[
                "College soccer team, daily training",
                "Carb counting, flexible with pump",
                "Recently started college, adjusting to new schedule",
            ]),
            care_team: vec![],
            special_considerations: vec![],
        },
        PatientProfile {
            id: "P003".into(),
            name: "Carlos Rodriguez".into(),
            age: 64,
            gender: "Male".into(),
            ethnicity: "Hispanic".into(),
            diabetes_type: "Type 2".into(),
            diagnosis_date: "2022-04-12".into(),
            years_since_diagnosis: 2.5,
            hba1c: "6.8%".into(),
            last_fasting_glucose: "132 mg/dL".into(),
            blood_pressure: "125/78 mmHg".into(),
            medications: vec![
                med("Metformin", "1000mg BID", "2.5 years"),
                med("Lisinopril", "20mg daily", "2.5 years"),
                med("Empagliflozin", "10mg daily", "2.5 years"),
                med("Semaglutide", "1mg weekly", "1.5 years"),
            ],
            complications: vec![
                complication("Retinopathy", "Mild NPDR - stable"),
                complication("Neuropathy", "None"),
                complication("Nephropathy", "Stage 2 CKD"),
            ],
            comorbidities: strings(&["CAD (prior MI 2020)", "Hypertension", "Dyslipidemia"]),
            lifestyle_notes: strings(&[
                "Daily walking 30 minutes",
                "Former smoker (quit 2014)",
            ]),
            care_team: vec![],
            special_considerations: vec![],
        },
        PatientProfile {
            id: "P004".into(),
            name: "Priya Patel".into(),
            age: 30,
            gender: "Female".into(),
            ethnicity: "South Asian".into(),
            diabetes_type: "Type 2 (post-GDM)".into(),
            diagnosis_date: "2023-08-28".into(),
            years_since_diagnosis: 1.0,
            hba1c: "6.2%".into(),
            last_fasting_glucose: "110 mg/dL".into(),
            blood_pressure: "128/78 mmHg".into(),
            medications: vec![
                med("Prenatal vitamins", "Daily", "Current"),
                med("Metformin", "Discontinued for pregnancy", "Was 1000mg BID"),
            ],
            complications: vec![
                complication("Retinopathy", "None"),
                complication("Neuropathy", "None"),
                complication("Nephropathy", "Normal kidney function"),
            ],
            comorbidities: strings(&["PCOS", "History of GDM"]),
            lifestyle_notes: strings(&[
                "Prenatal yoga 3x/week",
                "Gestational diabetes meal plan",
            ]),
            care_team: vec![],
            special_considerations: strings(&[
                "Patient is currently pregnant (first trimester)",
            ]),
        },
        PatientProfile {
            id: "P005".into(),
            name: "Eleanor Williams".into(),
            age: 72,
            gender: "Female".into(),
            ethnicity: "Caucasian".into(),
            diabetes_type: "Type 2".into(),
            diagnosis_date: "2023-01-10".into(),
            years_since_diagnosis: 1.5,
            hba1c: "8.0%".into(),
            last_fasting_glucose: "170 mg/dL".into(),
            blood_pressure: "135/78 mmHg".into(),
            medications: vec![
                med("Insulin Glargine", "18 units at bedtime", "1.5 years"),
                med("Linagliptin", "5mg daily", "6 months"),
            ],
            complications: vec![
                complication("Retinopathy", "Mild NPDR"),
                complication("Neuropathy", "Peripheral neuropathy present"),
                complication("Nephropathy", "CKD Stage 3b"),
            ],
            comorbidities: strings(&[
                "Hypertension",
                "Osteoarthritis",
                "Mild cognitive impairment",
                "CKD Stage 3b",
            ]),
            lifestyle_notes: strings(&[
                "Limited mobility, chair exercises",
                "Simplified meal plan with family help",
                "Lives alone, considering assisted living",
            ]),
            care_team: vec![],
            special_considerations: strings(&[
                "Patient has cognitive impairment and CKD Stage 3b",
                "Focus on avoiding hypoglycemia",
            ]),
        },
    ]
}
