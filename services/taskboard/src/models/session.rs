//! Session model and related functionality

use chrono::NaiveDateTime;
use serde::Serialize;

use super::Role;

/// Server-side session record, keyed by the opaque cookie value
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    /// Unix timestamp (seconds) after which the session is ignored
    pub expires_at: i64,
    pub created_at: NaiveDateTime,
}

/// Authenticated identity attached to a request by the session middleware
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl From<Session> for SessionUser {
    fn from(session: Session) -> Self {
        Self {
            user_id: session.user_id,
            username: session.username,
            role: session.role,
        }
    }
}
