use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::PatientFormData;

use super::patient;

const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Load the form payload for a patient. Missing fields in an older payload
/// come back as schema defaults; a patient with no payload row yields
/// `None`.
pub fn get_form_data(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Option<PatientFormData>, DatabaseError> {
    let payload: Option<String> = conn
        .query_row(
            "SELECT payload FROM form_data WHERE patient_id = ?1",
            params![patient_id.to_string()],
            |row| row.get(0),
        )
        .optional()?;

    match payload {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Persist the form payload as a single unit (upsert) and touch the
/// patient's last-updated timestamp.
pub fn save_form_data(
    conn: &Connection,
    patient_id: &Uuid,
    form: &PatientFormData,
    saved_at: &NaiveDateTime,
) -> Result<(), DatabaseError> {
    let json = serde_json::to_string(form)?;
    conn.execute(
        "INSERT INTO form_data (patient_id, payload, saved_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(patient_id) DO UPDATE SET payload = ?2, saved_at = ?3",
        params![
            patient_id.to_string(),
            json,
            saved_at.format(TIMESTAMP_FMT).to_string(),
        ],
    )?;
    patient::touch_last_updated(conn, patient_id, saved_at)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::patient::{create_patient, get_patient};
    use crate::db::sqlite::open_memory_database;
    use crate::models::PrescribedMedication;

    #[test]
    fn save_and_reload_round_trips() {
        let conn = open_memory_database().unwrap();
        let record = create_patient(&conn, "Sarah Wilson", "1990-07-17", "Female").unwrap();

        let mut form = get_form_data(&conn, &record.id).unwrap().unwrap();
        form.vitals.blood_pressure = "120/80".into();
        form.vitals.height = "5'10\"".into();
        form.vitals.weight = "170".into();
        form.medications.push(PrescribedMedication {
            id: "pm1".into(),
            medication_id: "m-1".into(),
            dosage: "500mg".into(),
            frequency: "3 times daily".into(),
            notes: None,
        });

        let at = record.last_updated + chrono::Duration::minutes(5);
        save_form_data(&conn, &record.id, &form, &at).unwrap();

        let reloaded = get_form_data(&conn, &record.id).unwrap().unwrap();
        assert_eq!(reloaded, form);
    }

    #[test]
    fn save_touches_patient_last_updated() {
        let conn = open_memory_database().unwrap();
        let record = create_patient(&conn, "Jane Smith", "1985-04-12", "Female").unwrap();

        let at = record.last_updated + chrono::Duration::hours(2);
        let form = get_form_data(&conn, &record.id).unwrap().unwrap();
        save_form_data(&conn, &record.id, &form, &at).unwrap();

        let fetched = get_patient(&conn, &record.id).unwrap();
        assert_eq!(fetched.last_updated, at);
    }

    #[test]
    fn missing_payload_is_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_form_data(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn legacy_payload_gains_defaults_on_load() {
        let conn = open_memory_database().unwrap();
        let record = create_patient(&conn, "John Doe", "1978-08-23", "Male").unwrap();

        // Overwrite with a payload missing whole blocks, as an older client
        // would have written.
        conn.execute(
            "UPDATE form_data SET payload = ?2 WHERE patient_id = ?1",
            params![
                record.id.to_string(),
                r#"{"patient_info":{"name":"John Doe"},"nurse_notes":"seen"}"#,
            ],
        )
        .unwrap();

        let form = get_form_data(&conn, &record.id).unwrap().unwrap();
        assert_eq!(form.nurse_notes, "seen");
        assert_eq!(form.vitals.blood_pressure, "");
        assert!(form.follow_ups.is_empty());
        assert!(!form.show_insulin_resistance);
    }

    #[test]
    fn malformed_payload_is_a_json_error() {
        let conn = open_memory_database().unwrap();
        let record = create_patient(&conn, "Emily Johnson", "1992-01-30", "Female").unwrap();
        conn.execute(
            "UPDATE form_data SET payload = 'not json' WHERE patient_id = ?1",
            params![record.id.to_string()],
        )
        .unwrap();

        let err = get_form_data(&conn, &record.id).unwrap_err();
        assert!(matches!(err, DatabaseError::Json(_)));
    }
}
