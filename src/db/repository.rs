//! Row-level persistence for users, doctor profiles and appointments.
//!
//! Every function takes a borrowed `Connection` so callers decide the
//! transaction boundary.

pub mod appointment;
pub mod doctor_profile;
pub mod user;

pub use appointment::*;
pub use doctor_profile::*;
pub use user::*;

use uuid::Uuid;

use super::DatabaseError;

/// Parse a UUID column, reporting corruption as a constraint violation.
pub(crate) fn parse_uuid(raw: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(raw).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

pub(crate) fn not_found(entity_type: &str, id: &Uuid) -> DatabaseError {
    DatabaseError::NotFound {
        entity_type: entity_type.into(),
        id: id.to_string(),
    }
}
