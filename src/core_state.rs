//! Transport-agnostic application state.
//!
//! `CoreState` is shared (behind `Arc`) by every request handler. It owns the
//! configuration and the session store, opens a database connection per
//! operation, and is the single place where the authorization policy is
//! enforced before an operation body runs.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rusqlite::Connection;
use uuid::Uuid;

use crate::authorization::{self, AccessReason, Operation};
use crate::config::DeskConfig;
use crate::db;
use crate::error::DeskError;
use crate::models::User;
use crate::session::{IssuedSession, Session, SessionStore};

pub struct CoreState {
    pub config: DeskConfig,
    sessions: RwLock<SessionStore>,
}

impl CoreState {
    pub fn new(config: DeskConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(SessionStore::new()),
        }
    }

    /// Open a database connection (migrations are applied on open).
    pub fn open_db(&self) -> Result<Connection, DeskError> {
        Ok(db::open_database(&self.config.database_path)?)
    }

    pub fn password_iterations(&self) -> u32 {
        self.config.pbkdf2_iterations
    }

    // ── Sessions ────────────────────────────────────────────

    fn read_sessions(&self) -> Result<RwLockReadGuard<'_, SessionStore>, DeskError> {
        self.sessions.read().map_err(|_| DeskError::LockPoisoned)
    }

    fn write_sessions(&self) -> Result<RwLockWriteGuard<'_, SessionStore>, DeskError> {
        self.sessions.write().map_err(|_| DeskError::LockPoisoned)
    }

    pub fn start_session(&self, user: &User) -> Result<IssuedSession, DeskError> {
        let issued = self.write_sessions()?.issue(user);
        tracing::info!(user_id = %user.id, role = %user.role, "Session started");
        Ok(issued)
    }

    /// Look up the session for a bearer token. `None` token or unknown token → `None`.
    pub fn resolve_session(&self, token: Option<&str>) -> Result<Option<Session>, DeskError> {
        let Some(token) = token else {
            return Ok(None);
        };
        Ok(self.read_sessions()?.resolve(token).cloned())
    }

    pub fn end_session(&self, token: &str) -> Result<bool, DeskError> {
        Ok(self.write_sessions()?.revoke(token))
    }

    pub fn end_sessions_for_user(&self, user_id: &Uuid) -> Result<usize, DeskError> {
        Ok(self.write_sessions()?.revoke_user(user_id))
    }

    pub fn active_sessions(&self) -> Result<usize, DeskError> {
        Ok(self.read_sessions()?.len())
    }

    // ── Guard ───────────────────────────────────────────────

    /// Resolve the caller's session and check it against `operation`'s
    /// requirement. Only on success is `body` given the session and a
    /// fresh connection. A `NotFound` from `body` lands on the caller's
    /// dashboard.
    pub fn guarded<T>(
        &self,
        token: Option<&str>,
        operation: Operation,
        body: impl FnOnce(&Session, &Connection) -> Result<T, DeskError>,
    ) -> Result<T, DeskError> {
        let session = self.resolve_session(token)?;
        let decision = authorization::check(session.as_ref(), operation);

        let session = match (decision.reason, session) {
            (_, Some(session)) if decision.allowed => session,
            (AccessReason::WrongRole { required, actual }, _) => {
                tracing::warn!(%operation, %required, %actual, "Authorization denied");
                return Err(DeskError::AuthorizationDenied {
                    operation,
                    role: actual,
                });
            }
            _ => {
                tracing::debug!(%operation, "No session for protected operation");
                return Err(DeskError::AuthenticationRequired);
            }
        };

        let conn = self.open_db()?;
        body(&session, &conn).map_err(|e| e.for_role(session.role))
    }
}
