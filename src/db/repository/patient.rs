use chrono::{Local, NaiveDateTime, Timelike};
use rusqlite::{params, Connection};
use std::str::FromStr;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::measurements::generate_mrn;
use crate::models::{PatientFormData, PatientRecord, RecordStatus};

use super::form_data;

const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Create a patient record with a generated id and MRN, in nurse-pending
/// status, and seed its (empty) form payload.
pub fn create_patient(
    conn: &Connection,
    name: &str,
    date_of_birth: &str,
    gender: &str,
) -> Result<PatientRecord, DatabaseError> {
    // Stored at second precision; keep the in-memory value identical.
    let now = Local::now().naive_local();
    let now = now.with_nanosecond(0).unwrap_or(now);

    let record = PatientRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        date_of_birth: date_of_birth.to_string(),
        gender: gender.to_string(),
        medical_record_number: generate_mrn(),
        status: RecordStatus::NursePending,
        last_updated: now,
    };

    conn.execute(
        "INSERT INTO patients (id, name, date_of_birth, gender, medical_record_number, status, last_updated)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.id.to_string(),
            record.name,
            record.date_of_birth,
            record.gender,
            record.medical_record_number,
            record.status.as_str(),
            record.last_updated.format(TIMESTAMP_FMT).to_string(),
        ],
    )?;

    let form = PatientFormData::for_patient(&record);
    form_data::save_form_data(conn, &record.id, &form, &record.last_updated)?;

    tracing::info!(patient = %record.id, mrn = %record.medical_record_number, "patient created");
    Ok(record)
}

/// Fetch a single patient record.
pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<PatientRecord, DatabaseError> {
    conn.query_row(
        "SELECT id, name, date_of_birth, gender, medical_record_number, status, last_updated
         FROM patients WHERE id = ?1",
        params![id.to_string()],
        row_to_patient,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DatabaseError::NotFound {
            entity_type: "patient".into(),
            id: id.to_string(),
        },
        other => DatabaseError::from(other),
    })
}

/// List all patients, most recently updated first.
pub fn list_patients(conn: &Connection) -> Result<Vec<PatientRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, date_of_birth, gender, medical_record_number, status, last_updated
         FROM patients
         ORDER BY last_updated DESC, name ASC",
    )?;
    let rows = stmt.query_map([], row_to_patient)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Update demographics (name, date of birth, gender) on a record. Status
/// is deliberately not written here; it changes only through a save.
pub fn update_demographics(
    conn: &Connection,
    record: &PatientRecord,
) -> Result<(), DatabaseError> {
    let affected = conn.execute(
        "UPDATE patients SET name = ?2, date_of_birth = ?3, gender = ?4 WHERE id = ?1",
        params![
            record.id.to_string(),
            record.name,
            record.date_of_birth,
            record.gender,
        ],
    )?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "patient".into(),
            id: record.id.to_string(),
        });
    }
    Ok(())
}

/// Set the workflow status of a record.
pub fn update_status(
    conn: &Connection,
    id: &Uuid,
    status: RecordStatus,
) -> Result<(), DatabaseError> {
    let affected = conn.execute(
        "UPDATE patients SET status = ?2 WHERE id = ?1",
        params![id.to_string(), status.as_str()],
    )?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "patient".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Touch the last-updated timestamp.
pub fn touch_last_updated(
    conn: &Connection,
    id: &Uuid,
    at: &NaiveDateTime,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE patients SET last_updated = ?2 WHERE id = ?1",
        params![id.to_string(), at.format(TIMESTAMP_FMT).to_string()],
    )?;
    Ok(())
}

/// Delete a patient record; the form payload row goes with it.
pub fn delete_patient(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let affected = conn.execute(
        "DELETE FROM patients WHERE id = ?1",
        params![id.to_string()],
    )?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "patient".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

fn row_to_patient(row: &rusqlite::Row) -> Result<PatientRecord, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let status_str: String = row.get(5)?;
    let updated_str: String = row.get(6)?;

    Ok(PatientRecord {
        id: Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        name: row.get(1)?,
        date_of_birth: row.get(2)?,
        gender: row.get(3)?,
        medical_record_number: row.get(4)?,
        status: RecordStatus::from_str(&status_str).unwrap_or(RecordStatus::NursePending),
        last_updated: NaiveDateTime::parse_from_str(&updated_str, TIMESTAMP_FMT)
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn create_and_retrieve_patient() {
        let conn = open_memory_database().unwrap();
        let created = create_patient(&conn, "Jane Smith", "1985-04-12", "Female").unwrap();

        let fetched = get_patient(&conn, &created.id).unwrap();
        assert_eq!(fetched.name, "Jane Smith");
        assert_eq!(fetched.status, RecordStatus::NursePending);
        assert!(fetched.medical_record_number.starts_with("MRN-"));
    }

    #[test]
    fn create_seeds_form_payload() {
        let conn = open_memory_database().unwrap();
        let created = create_patient(&conn, "John Doe", "1978-08-23", "Male").unwrap();

        let form = form_data::get_form_data(&conn, &created.id).unwrap().unwrap();
        assert_eq!(form.patient_info.name, "John Doe");
        assert_eq!(form.patient_info.gender, "Male");
        assert!(form.medications.is_empty());
    }

    #[test]
    fn get_unknown_patient_is_not_found() {
        let conn = open_memory_database().unwrap();
        let err = get_patient(&conn, &Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[test]
    fn list_orders_by_last_updated_desc() {
        let conn = open_memory_database().unwrap();
        let first = create_patient(&conn, "First", "1990-01-01", "Female").unwrap();
        let second = create_patient(&conn, "Second", "1991-02-02", "Male").unwrap();

        // Bump the first patient so it becomes most recent.
        let later = first.last_updated + chrono::Duration::hours(1);
        touch_last_updated(&conn, &first.id, &later).unwrap();

        let patients = list_patients(&conn).unwrap();
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].id, first.id);
        assert_eq!(patients[1].id, second.id);
    }

    #[test]
    fn update_demographics_preserves_status() {
        let conn = open_memory_database().unwrap();
        let mut record = create_patient(&conn, "Emily Johnson", "1992-01-30", "Female").unwrap();
        update_status(&conn, &record.id, RecordStatus::Completed).unwrap();

        record.name = "Emily Johnson-Lee".into();
        update_demographics(&conn, &record).unwrap();

        let fetched = get_patient(&conn, &record.id).unwrap();
        assert_eq!(fetched.name, "Emily Johnson-Lee");
        assert_eq!(fetched.status, RecordStatus::Completed);
    }

    #[test]
    fn delete_cascades_to_form_payload() {
        let conn = open_memory_database().unwrap();
        let record = create_patient(&conn, "Michael Chen", "1965-11-08", "Male").unwrap();
        assert!(form_data::get_form_data(&conn, &record.id).unwrap().is_some());

        delete_patient(&conn, &record.id).unwrap();
        assert!(matches!(
            get_patient(&conn, &record.id),
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(form_data::get_form_data(&conn, &record.id).unwrap().is_none());
    }

    #[test]
    fn delete_nonexistent_fails() {
        let conn = open_memory_database().unwrap();
        let result = delete_patient(&conn, &Uuid::new_v4());
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }
}
