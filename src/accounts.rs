//! Account lifecycle: patient registration, credential checks, admin seeding
//! and patient self-service profile edits.

use rusqlite::Connection;
use uuid::Uuid;

use crate::crypto::{hash_password, verify_password};
use crate::db::repository;
use crate::error::DeskError;
use crate::models::{Role, User};

const MAX_USERNAME_LEN: usize = 80;
const MAX_CONTACT_LEN: usize = 30;
const MAX_AGE_LEN: usize = 5;

/// Reject empty or oversized usernames and empty passwords.
///
/// Callers pass the username already trimmed.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), DeskError> {
    if username.trim().is_empty() {
        return Err(DeskError::InvalidInput("Username is required".into()));
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(DeskError::InvalidInput("Username too long".into()));
    }
    if password.is_empty() {
        return Err(DeskError::InvalidInput("Password is required".into()));
    }
    Ok(())
}

/// Insert a new user with a freshly hashed password.
///
/// The username is stored trimmed. Fails with `DuplicateUsername` if the name
/// is taken, whether detected up front or by the UNIQUE constraint on a
/// racing insert.
pub fn create_user(
    conn: &Connection,
    username: &str,
    password: &str,
    role: Role,
    iterations: u32,
) -> Result<User, DeskError> {
    let username = username.trim();
    validate_credentials(username, password)?;
    if repository::username_exists(conn, username)? {
        return Err(DeskError::duplicate_username(username));
    }

    let user = User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        password_hash: hash_password(password, iterations),
        role,
        contact: None,
        age: None,
    };
    repository::insert_user(conn, &user).map_err(|e| {
        if e.is_unique_violation() {
            DeskError::duplicate_username(username)
        } else {
            e.into()
        }
    })?;
    Ok(user)
}

/// Self-registration. Always creates a `patient`.
pub fn register_patient(
    conn: &Connection,
    username: &str,
    password: &str,
    iterations: u32,
) -> Result<User, DeskError> {
    let user = create_user(conn, username, password, Role::Patient, iterations)?;
    tracing::info!(user_id = %user.id, "Patient registered");
    Ok(user)
}

/// Verify a username/password pair. Unknown user and wrong password both
/// yield `InvalidCredentials`.
pub fn authenticate(conn: &Connection, username: &str, password: &str) -> Result<User, DeskError> {
    let Some(user) = repository::get_user_by_username(conn, username.trim())? else {
        tracing::warn!("Login rejected: unknown username");
        return Err(DeskError::InvalidCredentials);
    };
    if !verify_password(password, &user.password_hash)? {
        tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
        return Err(DeskError::InvalidCredentials);
    }
    Ok(user)
}

/// Create the `admin` account if it does not exist yet. Returns true if created.
pub fn seed_admin(
    conn: &Connection,
    username: &str,
    password: &str,
    iterations: u32,
) -> Result<bool, DeskError> {
    if repository::username_exists(conn, username)? {
        return Ok(false);
    }
    let admin = create_user(conn, username, password, Role::Admin, iterations)?;
    tracing::info!(user_id = %admin.id, "Seeded administrator account");
    Ok(true)
}

/// Overwrite a patient's contact and age. Blank values clear the field.
pub fn update_patient_profile(
    conn: &Connection,
    user_id: &Uuid,
    contact: Option<&str>,
    age: Option<&str>,
) -> Result<User, DeskError> {
    let contact = contact.map(str::trim).filter(|s| !s.is_empty());
    let age = age.map(str::trim).filter(|s| !s.is_empty());
    if contact.is_some_and(|c| c.len() > MAX_CONTACT_LEN) {
        return Err(DeskError::InvalidInput("Contact too long".into()));
    }
    if age.is_some_and(|a| a.len() > MAX_AGE_LEN) {
        return Err(DeskError::InvalidInput("Age too long".into()));
    }

    repository::update_user_contact(conn, user_id, contact, age)?;
    repository::get_user(conn, user_id)?.ok_or_else(|| DeskError::not_found("user", user_id))
}
