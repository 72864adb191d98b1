//! Demo dataset for a fresh installation: a handful of patients across all
//! workflow states, the medication/supplement catalog, and the clinic
//! staff. Tests lean on this too.

use chrono::Local;
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository::{catalog, form_data, patient, user};
use crate::db::DatabaseError;
use crate::models::{
    CatalogEntryType, FollowUp, MedicationCatalogEntry, PrescribedMedication, Role,
    SupplementEntry, User,
};

/// Populate an empty database with the demo dataset. A database that
/// already holds patients is left untouched.
pub fn seed_demo_data(conn: &Connection) -> Result<(), DatabaseError> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
    if existing > 0 {
        tracing::debug!("database already populated, skipping demo seed");
        return Ok(());
    }

    let catalog_entries = seed_catalog(conn)?;
    seed_users(conn)?;
    seed_patients(conn, &catalog_entries)?;

    tracing::info!("demo dataset seeded");
    Ok(())
}

fn seed_catalog(
    conn: &Connection,
) -> Result<Vec<MedicationCatalogEntry>, DatabaseError> {
    let medications: [(&str, &str, &str, Option<&str>); 8] = [
        ("Amoxicillin", "500mg", "3 times daily", Some("Take with food")),
        ("Lisinopril", "10mg", "Once daily", Some("Take in the morning")),
        ("Metformin", "1000mg", "Twice daily", Some("Take with meals")),
        ("Atorvastatin", "20mg", "Once daily at bedtime", None),
        ("Albuterol", "2 puffs", "Every 4-6 hours as needed", None),
        ("Sertraline", "50mg", "Once daily", Some("Take in the morning")),
        ("Ibuprofen", "400mg", "Every 6 hours as needed", Some("Take with food")),
        ("Levothyroxine", "75mcg", "Once daily on empty stomach", None),
    ];
    let supplements: [(&str, &str, &str); 2] = [
        (
            "Biogena Multispektrum",
            "2 capsules once daily in the morning (am)",
            "Once daily",
        ),
        (
            "Biogena Omni Lactis",
            "2 capsules once daily with food (any time)",
            "Once daily",
        ),
    ];

    let mut entries = Vec::new();
    for (name, dosage, frequency, notes) in medications {
        entries.push(MedicationCatalogEntry {
            id: Uuid::new_v4(),
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            notes: notes.map(Into::into),
            link: None,
            entry_type: CatalogEntryType::Medication,
        });
    }
    for (name, dosage, frequency) in supplements {
        entries.push(MedicationCatalogEntry {
            id: Uuid::new_v4(),
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            notes: None,
            link: None,
            entry_type: CatalogEntryType::Supplement,
        });
    }

    for entry in &entries {
        catalog::insert_entry(conn, entry)?;
    }
    Ok(entries)
}

fn seed_users(conn: &Connection) -> Result<(), DatabaseError> {
    let staff = [
        ("Dr. Elizabeth Taylor", Role::Doctor, "elizabeth.taylor@clinic.test"),
        ("Nurse Richard Brown", Role::Nurse, "richard.brown@clinic.test"),
        ("Admin User", Role::Admin, "admin@clinic.test"),
    ];

    let mut nurse_id = None;
    for (name, role, email) in staff {
        let u = User {
            id: Uuid::new_v4(),
            name: name.into(),
            role,
            email: email.into(),
        };
        user::insert_user(conn, &u)?;
        if role == Role::Nurse {
            nurse_id = Some(u.id);
        }
    }

    // The demo signs in as the nurse, matching a fresh intake workflow.
    if let Some(id) = nurse_id {
        user::set_current_user(conn, &id)?;
    }
    Ok(())
}

fn seed_patients(
    conn: &Connection,
    catalog_entries: &[MedicationCatalogEntry],
) -> Result<(), DatabaseError> {
    use crate::models::RecordStatus::*;

    let demo = [
        ("Jane Smith", "1985-04-12", "Female", NursePending),
        ("John Doe", "1978-08-23", "Male", DoctorPending),
        ("Emily Johnson", "1992-01-30", "Female", Completed),
        ("Michael Chen", "1965-11-08", "Male", NursePending),
        ("Sarah Wilson", "1990-07-17", "Female", DoctorPending),
    ];

    let amoxicillin = catalog_entries
        .iter()
        .find(|e| e.name == "Amoxicillin")
        .map(|e| e.id.to_string())
        .unwrap_or_default();
    let multispektrum = catalog_entries
        .iter()
        .find(|e| e.name == "Biogena Multispektrum")
        .map(|e| e.id.to_string())
        .unwrap_or_default();

    for (name, dob, gender, status) in demo {
        let record = patient::create_patient(conn, name, dob, gender)?;
        patient::update_status(conn, &record.id, status)?;

        let mut form = form_data::get_form_data(conn, &record.id)?.unwrap_or_default();
        form.vitals.blood_pressure = "120/80".into();
        form.vitals.height = "5'10\"".into();
        form.vitals.weight = "170".into();
        form.medications.push(PrescribedMedication {
            id: "pm1".into(),
            medication_id: amoxicillin.clone(),
            dosage: "500mg".into(),
            frequency: "3 times daily".into(),
            notes: Some("Take with food".into()),
        });
        form.supplements.push(SupplementEntry {
            id: "ps1".into(),
            supplement_id: multispektrum.clone(),
            dosage: "2 capsules once daily in the morning (am)".into(),
            source: "Clinic".into(),
        });
        form.exercise_recommendations =
            "30 minutes of moderate activity 5 days per week".into();
        form.nurse_notes = "Patient reports occasional headaches in the morning".into();
        form.follow_ups.push(FollowUp {
            with_doctor: "Dr Nas".into(),
            for_reason: "Follow up".into(),
            date: "23/10/2025".into(),
        });

        form_data::save_form_data(conn, &record.id, &form, &Local::now().naive_local())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::models::RecordStatus;

    #[test]
    fn seeds_patients_catalog_and_users() {
        let conn = open_memory_database().unwrap();
        seed_demo_data(&conn).unwrap();

        let patients = patient::list_patients(&conn).unwrap();
        assert_eq!(patients.len(), 5);
        assert!(patients
            .iter()
            .any(|p| p.status == RecordStatus::Completed));

        let entries = catalog::list_entries(&conn).unwrap();
        assert_eq!(entries.len(), 10);
        assert_eq!(
            catalog::list_entries_by_type(&conn, CatalogEntryType::Supplement)
                .unwrap()
                .len(),
            2
        );

        let current = user::get_current_user(&conn).unwrap().unwrap();
        assert_eq!(current.role, Role::Nurse);
    }

    #[test]
    fn seeded_forms_reference_catalog_entries() {
        let conn = open_memory_database().unwrap();
        seed_demo_data(&conn).unwrap();

        let catalog_entries = catalog::list_entries(&conn).unwrap();
        let patients = patient::list_patients(&conn).unwrap();
        let form = form_data::get_form_data(&conn, &patients[0].id)
            .unwrap()
            .unwrap();

        assert_eq!(form.medications.len(), 1);
        let resolved = MedicationCatalogEntry::resolve(
            &catalog_entries,
            &form.medications[0].medication_id,
        );
        assert_eq!(resolved.unwrap().name, "Amoxicillin");
    }

    #[test]
    fn seed_is_idempotent() {
        let conn = open_memory_database().unwrap();
        seed_demo_data(&conn).unwrap();
        seed_demo_data(&conn).unwrap();

        assert_eq!(patient::list_patients(&conn).unwrap().len(), 5);
        assert_eq!(catalog::list_entries(&conn).unwrap().len(), 10);
    }
}
