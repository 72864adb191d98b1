use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Role, User};

pub fn insert_user(conn: &Connection, user: &User) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO users (id, name, role, email) VALUES (?1, ?2, ?3, ?4)",
        params![
            user.id.to_string(),
            user.name,
            user.role.as_str(),
            user.email,
        ],
    )?;
    Ok(())
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name, role, email FROM users ORDER BY name ASC")?;
    let rows = stmt.query_map([], row_to_user)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// The acting user the embedding shell has signed in, if any.
///
/// Core functions never read this implicitly; the shell resolves the user
/// once and passes the role down.
pub fn get_current_user(conn: &Connection) -> Result<Option<User>, DatabaseError> {
    conn.query_row(
        "SELECT u.id, u.name, u.role, u.email
         FROM app_settings s
         JOIN users u ON u.id = s.current_user_id
         WHERE s.id = 1",
        [],
        row_to_user,
    )
    .optional()
    .map_err(DatabaseError::from)
}

pub fn set_current_user(conn: &Connection, user_id: &Uuid) -> Result<(), DatabaseError> {
    let affected = conn.execute(
        "UPDATE app_settings SET current_user_id = ?1
         WHERE id = 1 AND EXISTS (SELECT 1 FROM users WHERE id = ?1)",
        params![user_id.to_string()],
    )?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "user".into(),
            id: user_id.to_string(),
        });
    }
    Ok(())
}

fn row_to_user(row: &rusqlite::Row) -> Result<User, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let role_str: String = row.get(2)?;

    Ok(User {
        id: Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        name: row.get(1)?,
        role: Role::from_str(&role_str).unwrap_or(Role::Nurse),
        email: row.get(3)?,
    })
}
