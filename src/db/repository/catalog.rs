use rusqlite::{params, Connection};
use std::str::FromStr;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{CatalogEntryType, MedicationCatalogEntry};

/// Insert a catalog entry (admin operation).
pub fn insert_entry(
    conn: &Connection,
    entry: &MedicationCatalogEntry,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO catalog_entries (id, name, dosage, frequency, notes, link, entry_type)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            entry.id.to_string(),
            entry.name,
            entry.dosage,
            entry.frequency,
            entry.notes,
            entry.link,
            entry.entry_type.as_str(),
        ],
    )?;
    Ok(())
}

/// The whole catalog, ordered by name.
pub fn list_entries(conn: &Connection) -> Result<Vec<MedicationCatalogEntry>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, dosage, frequency, notes, link, entry_type
         FROM catalog_entries
         ORDER BY name ASC",
    )?;
    let rows = stmt.query_map([], row_to_entry)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Catalog entries of one type (medication or supplement).
pub fn list_entries_by_type(
    conn: &Connection,
    entry_type: CatalogEntryType,
) -> Result<Vec<MedicationCatalogEntry>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, dosage, frequency, notes, link, entry_type
         FROM catalog_entries
         WHERE entry_type = ?1
         ORDER BY name ASC",
    )?;
    let rows = stmt.query_map(params![entry_type.as_str()], row_to_entry)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Update a catalog entry in place (admin operation).
pub fn update_entry(
    conn: &Connection,
    entry: &MedicationCatalogEntry,
) -> Result<(), DatabaseError> {
    let affected = conn.execute(
        "UPDATE catalog_entries
         SET name = ?2, dosage = ?3, frequency = ?4, notes = ?5, link = ?6, entry_type = ?7
         WHERE id = ?1",
        params![
            entry.id.to_string(),
            entry.name,
            entry.dosage,
            entry.frequency,
            entry.notes,
            entry.link,
            entry.entry_type.as_str(),
        ],
    )?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "catalog_entry".into(),
            id: entry.id.to_string(),
        });
    }
    Ok(())
}

/// Delete a catalog entry. Forms referencing it keep their dangling id and
/// render a blank name cell.
pub fn delete_entry(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let affected = conn.execute(
        "DELETE FROM catalog_entries WHERE id = ?1",
        params![id.to_string()],
    )?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "catalog_entry".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

fn row_to_entry(row: &rusqlite::Row) -> Result<MedicationCatalogEntry, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let type_str: String = row.get(6)?;

    Ok(MedicationCatalogEntry {
        id: Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        name: row.get(1)?,
        dosage: row.get(2)?,
        frequency: row.get(3)?,
        notes: row.get(4)?,
        link: row.get(5)?,
        entry_type: CatalogEntryType::from_str(&type_str)
            .unwrap_or(CatalogEntryType::Medication),
    })
}
