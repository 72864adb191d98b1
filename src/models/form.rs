//! The mutable clinical payload for one patient record.
//!
//! Every field carries a serde default so a payload loaded from storage is
//! always fully populated and core logic never has to null-check nested
//! blocks. The whole struct is saved and loaded as a single unit.

use serde::{Deserialize, Serialize};

use super::patient::PatientRecord;

/// Patient-info mirror carried inside the form payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientInfo {
    pub name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub medical_record_number: String,
}

/// Vital signs as entered on the nurse section. All values are free text;
/// parsing/conversion happens in `measurements`, never here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vitals {
    pub blood_pressure: String,
    pub height: String,
    pub weight: String,
    pub heart_rate: Option<String>,
    pub temperature: Option<String>,
    pub respiratory_rate: Option<String>,
    pub oxygen_saturation: Option<String>,
}

/// The nine fixed summary-of-findings parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryFindings {
    pub glucose_metabolism: String,
    pub lipid_profile: String,
    pub inflammation: String,
    pub uric_acid: String,
    pub vitamins: String,
    pub minerals: String,
    pub sex_hormones: String,
    pub renal_liver_function: String,
    pub cancer_markers: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionRecommendation {
    pub nutritional_plan: String,
    pub protein_consumption: String,
    pub omissions: String,
    pub additional_considerations: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseRecommendation {
    pub focus_on: String,
    pub walking: String,
    pub avoid: String,
    pub tracking: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepStressRecommendation {
    pub sleep: String,
    pub stress: String,
}

/// A prescribed-medication line on the form. `medication_id` is a catalog
/// reference, not a copy; an unresolvable reference renders blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrescribedMedication {
    pub id: String,
    pub medication_id: String,
    pub dosage: String,
    pub frequency: String,
    pub notes: Option<String>,
}

/// A supplement line; same reference shape plus a source column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplementEntry {
    pub id: String,
    pub supplement_id: String,
    pub dosage: String,
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowUp {
    pub with_doctor: String,
    pub for_reason: String,
    pub date: String,
}

/// The full form payload. Created seeded from the patient record, mutated
/// through the form session, persisted as a unit on explicit save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientFormData {
    pub patient_info: PatientInfo,
    pub vitals: Vitals,
    pub summary_findings: SummaryFindings,
    pub medications: Vec<PrescribedMedication>,
    pub supplements: Vec<SupplementEntry>,
    pub exercise_recommendations: String,
    pub nurse_notes: String,
    pub doctor_notes: String,
    pub diagnosis: String,
    pub treatment_plan: String,
    pub show_insulin_resistance: bool,
    pub nutrition_recommendations: NutritionRecommendation,
    pub exercise_detail: ExerciseRecommendation,
    pub sleep_stress_recommendations: SleepStressRecommendation,
    pub follow_ups: Vec<FollowUp>,
}

impl PatientFormData {
    /// Empty payload seeded with the patient-info mirror, used when a
    /// record is first created.
    pub fn for_patient(record: &PatientRecord) -> Self {
        Self {
            patient_info: PatientInfo {
                name: record.name.clone(),
                date_of_birth: record.date_of_birth.clone(),
                gender: record.gender.clone(),
                medical_record_number: record.medical_record_number.clone(),
            },
            ..Self::default()
        }
    }
}
