//! Patient-record workflow: section access control and status transitions.
//!
//! A record moves nurse-pending → doctor-pending → completed, one step per
//! save, driven by the role performing the save. Section access is a pure
//! function of (role, status); once a record is completed both clinical
//! roles keep edit rights so a finished report can be amended. There is no
//! send-back path.
//!
//! The engine reads no ambient state: every entry point takes the acting
//! role as an argument.

use chrono::{Local, Timelike};
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository::{form_data, patient};
use crate::db::DatabaseError;
use crate::models::{PatientFormData, RecordStatus, Role};

// ═══════════════════════════════════════════════════════════
// Access rules
// ═══════════════════════════════════════════════════════════

/// Which form sections the acting user may edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionAccess {
    pub nurse_section: bool,
    pub doctor_section: bool,
}

/// Section access for a (role, status) pair.
///
/// - Nurse section: nurses while the record is nurse-pending, and again
///   once completed.
/// - Doctor section: doctors while the record is doctor-pending, and again
///   once completed.
/// - Admins edit neither; catalog administration never gates form editing.
pub fn section_access(role: Role, status: RecordStatus) -> SectionAccess {
    SectionAccess {
        nurse_section: role == Role::Nurse
            && matches!(status, RecordStatus::NursePending | RecordStatus::Completed),
        doctor_section: role == Role::Doctor
            && matches!(status, RecordStatus::DoctorPending | RecordStatus::Completed),
    }
}

/// Status after a save by `role`. At most one step forward; every other
/// combination (admin saves, re-saving a completed record, saving a
/// section the role does not hold) leaves the status unchanged.
pub fn next_status_on_save(role: Role, status: RecordStatus) -> RecordStatus {
    match (role, status) {
        (Role::Nurse, RecordStatus::NursePending) => RecordStatus::DoctorPending,
        (Role::Doctor, RecordStatus::DoctorPending) => RecordStatus::Completed,
        (_, unchanged) => unchanged,
    }
}

// ═══════════════════════════════════════════════════════════
// Save orchestration
// ═══════════════════════════════════════════════════════════

/// Result of saving a form session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub status: RecordStatus,
    pub transitioned: bool,
}

/// Persist a form payload as a unit and advance the record status.
///
/// The payload is written whole (no partial persistence), the record's
/// `last_updated` is touched, and the status transition, if the rules
/// yield one, is applied exactly once.
pub fn save_form(
    conn: &Connection,
    patient_id: &Uuid,
    actor: Role,
    form: &PatientFormData,
) -> Result<SaveOutcome, DatabaseError> {
    let record = patient::get_patient(conn, patient_id)?;
    let now = Local::now().naive_local();
    let now = now.with_nanosecond(0).unwrap_or(now);

    form_data::save_form_data(conn, patient_id, form, &now)?;

    let next = next_status_on_save(actor, record.status);
    let transitioned = next != record.status;
    if transitioned {
        patient::update_status(conn, patient_id, next)?;
        tracing::info!(
            patient = %patient_id,
            from = record.status.as_str(),
            to = next.as_str(),
            "record status advanced on save"
        );
    }

    Ok(SaveOutcome {
        status: next,
        transitioned,
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
