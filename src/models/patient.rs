use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{RecordStatus, Role};

/// A patient record as tracked by the intake workflow.
///
/// Demographics are untrusted free text entered on the form; only `status`
/// carries workflow meaning and is mutated exclusively through a save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: Uuid,
    pub name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub medical_record_number: String,
    pub status: RecordStatus,
    pub last_updated: NaiveDateTime,
}

/// A clinic staff member. Role determines section-level write access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub email: String,
}
