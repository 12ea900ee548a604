//! In-memory login sessions.
//!
//! Tokens are handed to the client once; the store only ever keeps their
//! SHA-256 digest. Nothing is persisted, so a restart logs everyone out.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::{generate_token, hash_token};
use crate::models::{Role, User};

/// The authenticated identity carried into every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    pub started_at: DateTime<Utc>,
}

impl Session {
    fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            started_at: Utc::now(),
        }
    }
}

/// A freshly started session together with its bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedSession {
    pub token: String,
    pub session: Session,
}

#[derive(Default)]
pub struct SessionStore {
    sessions: HashMap<[u8; 32], Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `user` and return the token the client must present.
    pub fn issue(&mut self, user: &User) -> IssuedSession {
        let token = generate_token();
        let session = Session::for_user(user);
        self.sessions.insert(hash_token(&token), session.clone());
        IssuedSession { token, session }
    }

    pub fn resolve(&self, token: &str) -> Option<&Session> {
        self.sessions.get(&hash_token(token))
    }

    /// Invalidate one token. Returns false if it was not active.
    pub fn revoke(&mut self, token: &str) -> bool {
        self.sessions.remove(&hash_token(token)).is_some()
    }

    /// Drop every session belonging to a user (used when the account is deleted).
    pub fn revoke_user(&mut self, user_id: &Uuid) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| &s.user_id != user_id);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            username: name.into(),
            password_hash: String::new(),
            role,
            contact: None,
            age: None,
        }
    }

    #[test]
    fn issued_token_resolves_to_session() {
        let mut store = SessionStore::new();
        let alice = user("alice", Role::Patient);
        let issued = store.issue(&alice);

        let session = store.resolve(&issued.token).unwrap();
        assert_eq!(session.user_id, alice.id);
        assert_eq!(session.role, Role::Patient);
        assert_eq!(session.username, "alice");
    }

    #[test]
    fn unknown_token_does_not_resolve() {
        let store = SessionStore::new();
        assert!(store.resolve("made-up").is_none());
    }

    #[test]
    fn revoked_token_stops_resolving() {
        let mut store = SessionStore::new();
        let issued = store.issue(&user("alice", Role::Patient));

        assert!(store.revoke(&issued.token));
        assert!(store.resolve(&issued.token).is_none());
        assert!(!store.revoke(&issued.token));
    }

    #[test]
    fn store_keeps_only_token_digests() {
        let mut store = SessionStore::new();
        let issued = store.issue(&user("alice", Role::Patient));
        assert!(store.sessions.contains_key(&hash_token(&issued.token)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn revoke_user_drops_all_their_sessions() {
        let mut store = SessionStore::new();
        let doc = user("drsmith", Role::Doctor);
        let other = user("alice", Role::Patient);
        let t1 = store.issue(&doc).token;
        let t2 = store.issue(&doc).token;
        let t3 = store.issue(&other).token;

        assert_eq!(store.revoke_user(&doc.id), 2);
        assert!(store.resolve(&t1).is_none());
        assert!(store.resolve(&t2).is_none());
        assert!(store.resolve(&t3).is_some());
    }
}
