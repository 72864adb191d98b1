//! Domain model — the plain data structures the workflow engine and the
//! report compositor operate on.

pub mod catalog;
pub mod enums;
pub mod form;
pub mod patient;

pub use catalog::MedicationCatalogEntry;
pub use enums::{CatalogEntryType, RecordStatus, Role};
pub use form::{
    ExerciseRecommendation, FollowUp, NutritionRecommendation, PatientFormData, PatientInfo,
    PrescribedMedication, SleepStressRecommendation, SummaryFindings, SupplementEntry, Vitals,
};
pub use patient::{PatientRecord, User};
