use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{not_found, parse_uuid};
use crate::db::DatabaseError;
use crate::models::*;

const PROFILE_COLUMNS: &str = "id, user_id, name, specialization, availability";

struct DoctorProfileRow {
    id: String,
    user_id: String,
    name: String,
    specialization: String,
    availability: String,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DoctorProfileRow> {
    Ok(DoctorProfileRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        specialization: row.get(3)?,
        availability: row.get(4)?,
    })
}

fn profile_from_row(row: DoctorProfileRow) -> Result<DoctorProfile, DatabaseError> {
    Ok(DoctorProfile {
        id: parse_uuid(&row.id)?,
        user_id: parse_uuid(&row.user_id)?,
        name: row.name,
        specialization: row.specialization,
        availability: row.availability,
    })
}

pub fn insert_doctor_profile(conn: &Connection, profile: &DoctorProfile) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctor_profiles (id, user_id, name, specialization, availability)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            profile.id.to_string(),
            profile.user_id.to_string(),
            profile.name,
            profile.specialization,
            profile.availability,
        ],
    )?;
    Ok(())
}

pub fn get_doctor_profile(conn: &Connection, id: &Uuid) -> Result<Option<DoctorProfile>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {PROFILE_COLUMNS} FROM doctor_profiles WHERE id = ?1"),
            params![id.to_string()],
            read_row,
        )
        .optional()?;
    row.map(profile_from_row).transpose()
}

pub fn get_doctor_profile_by_user(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Option<DoctorProfile>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {PROFILE_COLUMNS} FROM doctor_profiles WHERE user_id = ?1"),
            params![user_id.to_string()],
            read_row,
        )
        .optional()?;
    row.map(profile_from_row).transpose()
}

/// All doctor profiles ordered by display name.
pub fn list_doctor_profiles(conn: &Connection) -> Result<Vec<DoctorProfile>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROFILE_COLUMNS} FROM doctor_profiles ORDER BY name, id"
    ))?;
    let rows = stmt.query_map([], read_row)?;

    let mut profiles = Vec::new();
    for row in rows {
        profiles.push(profile_from_row(row?)?);
    }
    Ok(profiles)
}

pub fn update_doctor_profile(
    conn: &Connection,
    id: &Uuid,
    name: &str,
    specialization: &str,
    availability: &str,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE doctor_profiles SET name = ?2, specialization = ?3, availability = ?4
         WHERE id = ?1",
        params![id.to_string(), name, specialization, availability],
    )?;
    if changed == 0 {
        return Err(not_found("doctor_profile", id));
    }
    Ok(())
}

pub fn delete_doctor_profile(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "DELETE FROM doctor_profiles WHERE id = ?1",
        params![id.to_string()],
    )?;
    if changed == 0 {
        return Err(not_found("doctor_profile", id));
    }
    Ok(())
}
