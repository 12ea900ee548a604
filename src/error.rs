use thiserror::Error;
use uuid::Uuid;

use crate::authorization::Operation;
use crate::crypto::CryptoError;
use crate::db::DatabaseError;
use crate::models::Role;
use crate::views::View;

/// Errors surfaced by desk operations. All are recoverable at the request
/// boundary; none should take the process down.
#[derive(Error, Debug)]
pub enum DeskError {
    /// `retry` is the form the user is sent back to.
    #[error("Username already exists: {username}")]
    DuplicateUsername { username: String, retry: View },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Role {role} may not {operation}")]
    AuthorizationDenied { operation: Operation, role: Role },

    #[error("Selected slot already booked: doctor {doctor_id} on {date} at {time}")]
    SlotConflict {
        doctor_id: Uuid,
        profile_id: Option<Uuid>,
        date: String,
        time: String,
    },

    #[error("{entity} not found: {id}")]
    NotFound {
        entity: String,
        id: String,
        back: View,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(DatabaseError),

    #[error("Credential error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Session store lock poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeskError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        DeskError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
            back: View::Index,
        }
    }

    pub fn duplicate_username(username: &str) -> Self {
        DeskError::DuplicateUsername {
            username: username.to_string(),
            retry: View::Register,
        }
    }

    /// Send a duplicate-username failure back to `form` instead of registration.
    pub fn retry_on(self, form: View) -> Self {
        match self {
            DeskError::DuplicateUsername { username, .. } => DeskError::DuplicateUsername {
                username,
                retry: form,
            },
            other => other,
        }
    }

    /// Point a not-found failure at the dashboard of the caller's role.
    pub fn for_role(self, role: Role) -> Self {
        match self {
            DeskError::NotFound { entity, id, .. } => DeskError::NotFound {
                entity,
                id,
                back: role.dashboard(),
            },
            other => other,
        }
    }

    /// The view a client should be sent back to after this error.
    ///
    /// `None` for input and internal failures, which stay on the current view.
    pub fn redirect(&self) -> Option<View> {
        match self {
            DeskError::AuthenticationRequired | DeskError::InvalidCredentials => Some(View::Login),
            DeskError::AuthorizationDenied { .. } => Some(View::Index),
            DeskError::DuplicateUsername { retry, .. } => Some(*retry),
            DeskError::SlotConflict { profile_id, .. } => Some(
                profile_id.map_or(View::PatientDashboard, View::BookAppointment),
            ),
            DeskError::NotFound { back, .. } => Some(*back),
            DeskError::InvalidInput(_)
            | DeskError::Database(_)
            | DeskError::Crypto(_)
            | DeskError::LockPoisoned
            | DeskError::Io(_) => None,
        }
    }
}

impl From<DatabaseError> for DeskError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity_type, id } => DeskError::NotFound {
                entity: entity_type,
                id,
                back: View::Index,
            },
            other => DeskError::Database(other),
        }
    }
}

impl From<rusqlite::Error> for DeskError {
    fn from(err: rusqlite::Error) -> Self {
        DeskError::Database(DatabaseError::Sqlite(err))
    }
}
