//! Registration, login and logout.

use serde::Serialize;

use crate::accounts;
use crate::authorization::Operation;
use crate::core_state::CoreState;
use crate::error::DeskError;
use crate::session::{IssuedSession, Session};

/// Returned by register and login: the new bearer token plus where the
/// client should go next.
#[derive(Debug, Clone, Serialize)]
pub struct SessionGrant {
    pub token: String,
    pub session: Session,
    pub redirect: String,
}

impl From<IssuedSession> for SessionGrant {
    fn from(issued: IssuedSession) -> Self {
        Self {
            redirect: issued.session.role.dashboard().path().into_owned(),
            token: issued.token,
            session: issued.session,
        }
    }
}

/// Self-registration as a patient. The new patient is logged in immediately.
pub fn register(core: &CoreState, username: &str, password: &str) -> Result<SessionGrant, DeskError> {
    let conn = core.open_db()?;
    let user = accounts::register_patient(&conn, username, password, core.password_iterations())?;
    Ok(core.start_session(&user)?.into())
}

pub fn login(core: &CoreState, username: &str, password: &str) -> Result<SessionGrant, DeskError> {
    let conn = core.open_db()?;
    let user = accounts::authenticate(&conn, username, password)?;
    Ok(core.start_session(&user)?.into())
}

/// End the caller's session.
pub fn logout(core: &CoreState, token: Option<&str>) -> Result<(), DeskError> {
    let user_id = core.guarded(token, Operation::Logout, |session, _| Ok(session.user_id))?;
    if let Some(token) = token {
        core.end_session(token)?;
    }
    tracing::info!(%user_id, "Session ended");
    Ok(())
}
