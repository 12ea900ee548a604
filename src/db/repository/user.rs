use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{not_found, parse_uuid};
use crate::db::DatabaseError;
use crate::models::*;

const USER_COLUMNS: &str = "id, username, password_hash, role, contact, age";

struct UserRow {
    id: String,
    username: String,
    password_hash: String,
    role: String,
    contact: Option<String>,
    age: Option<String>,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        role: row.get(3)?,
        contact: row.get(4)?,
        age: row.get(5)?,
    })
}

fn user_from_row(row: UserRow) -> Result<User, DatabaseError> {
    Ok(User {
        id: parse_uuid(&row.id)?,
        username: row.username,
        password_hash: row.password_hash,
        role: Role::from_str(&row.role)?,
        contact: row.contact,
        age: row.age,
    })
}

pub fn insert_user(conn: &Connection, user: &User) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO users (id, username, password_hash, role, contact, age)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user.id.to_string(),
            user.username,
            user.password_hash,
            user.role.as_str(),
            user.contact,
            user.age,
        ],
    )?;
    Ok(())
}

pub fn get_user(conn: &Connection, id: &Uuid) -> Result<Option<User>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            params![id.to_string()],
            read_row,
        )
        .optional()?;
    row.map(user_from_row).transpose()
}

pub fn get_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
            params![username],
            read_row,
        )
        .optional()?;
    row.map(user_from_row).transpose()
}

pub fn username_exists(conn: &Connection, username: &str) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE username = ?1",
        params![username],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Users ordered by username, optionally restricted to one role.
pub fn list_users(conn: &Connection, filter: &UserFilter) -> Result<Vec<User>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {USER_COLUMNS} FROM users
         WHERE (?1 IS NULL OR role = ?1)
         ORDER BY username"
    ))?;
    let rows = stmt.query_map(params![filter.role.map(|r| r.as_str())], read_row)?;

    let mut users = Vec::new();
    for row in rows {
        users.push(user_from_row(row?)?);
    }
    Ok(users)
}

/// Overwrite the patient-editable contact details.
pub fn update_user_contact(
    conn: &Connection,
    id: &Uuid,
    contact: Option<&str>,
    age: Option<&str>,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE users SET contact = ?2, age = ?3 WHERE id = ?1",
        params![id.to_string(), contact, age],
    )?;
    if changed == 0 {
        return Err(not_found("user", id));
    }
    Ok(())
}

pub fn delete_user(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let changed = conn.execute("DELETE FROM users WHERE id = ?1", params![id.to_string()])?;
    if changed == 0 {
        return Err(not_found("user", id));
    }
    Ok(())
}
