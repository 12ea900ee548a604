//! Desk operations, one function per user action.
//!
//! Every function takes the shared [`CoreState`] and the caller's bearer
//! token (if any). Protected operations go through [`CoreState::guarded`],
//! so the role check happens before any data is read or written. The HTTP
//! layer is a thin adapter over these functions.

pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod doctors;
pub mod patient;

use uuid::Uuid;

use crate::authorization::Operation;
use crate::core_state::CoreState;
use crate::error::DeskError;
use crate::session::Session;

/// Health check, used by the liveness endpoint.
pub fn health_check(core: &CoreState) -> Result<&'static str, DeskError> {
    tracing::debug!("Health check called");
    core.open_db()?;
    Ok("ok")
}

/// Deny `operation` because it targets a record the session does not own.
pub(crate) fn deny_foreign(session: &Session, operation: Operation, target: &Uuid) -> DeskError {
    tracing::warn!(
        user_id = %session.user_id,
        %operation,
        %target,
        "Access to another user's record denied"
    );
    DeskError::AuthorizationDenied {
        operation,
        role: session.role,
    }
}

/// Resolve an optional subject id to the session's own id, rejecting any other.
pub(crate) fn own_id(
    session: &Session,
    operation: Operation,
    requested: Option<Uuid>,
) -> Result<Uuid, DeskError> {
    match requested {
        Some(id) if id != session.user_id => Err(deny_foreign(session, operation, &id)),
        _ => Ok(session.user_id),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::Utc;

    fn session(role: Role) -> Session {
        Session {
            user_id: Uuid::new_v4(),
            username: "someone".into(),
            role,
            started_at: Utc::now(),
        }
    }

    #[test]
    fn own_id_defaults_to_session_user() {
        let s = session(Role::Patient);
        assert_eq!(own_id(&s, Operation::BookAppointment, None).unwrap(), s.user_id);
        assert_eq!(
            own_id(&s, Operation::BookAppointment, Some(s.user_id)).unwrap(),
            s.user_id
        );
    }

    #[test]
    fn own_id_rejects_other_users() {
        let s = session(Role::Patient);
        let err = own_id(&s, Operation::UpdatePatientProfile, Some(Uuid::new_v4())).unwrap_err();
        assert!(matches!(
            err,
            DeskError::AuthorizationDenied {
                operation: Operation::UpdatePatientProfile,
                role: Role::Patient
            }
        ));
    }

    #[test]
    fn health_check_opens_database() {
        let (core, _dir) = test_support::core();
        assert_eq!(health_check(&core).unwrap(), "ok");
    }
}
