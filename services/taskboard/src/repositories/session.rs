//! Session repository backed by the `sessions` table

use anyhow::Result;
use chrono::Utc;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use tracing::info;
use uuid::Uuid;

use crate::models::{Role, Session, User};

/// Session repository
#[derive(Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new session for a user, valid for `ttl_seconds`
    pub async fn create(&self, user: &User, ttl_seconds: i64) -> Result<Session> {
        info!("Creating session for user: {}", user.id);

        let id = Uuid::new_v4().to_string();
        let expires_at = Utc::now().timestamp() + ttl_seconds;

        let row = sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, username, role, expires_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, user_id, username, role, expires_at, created_at
            "#,
        )
        .bind(&id)
        .bind(user.id)
        .bind(&user.username)
        .bind(user.role.as_str())
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        map_session(&row)
    }

    /// Get a session by its opaque id, ignoring expired ones
    pub async fn find_valid(&self, id: &str) -> Result<Option<Session>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, username, role, expires_at, created_at
            FROM sessions
            WHERE id = ? AND expires_at > ?
            "#,
        )
        .bind(id)
        .bind(Utc::now().timestamp())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_session).transpose()
    }

    /// Delete a session
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every expired session, returning how many were removed
    pub async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now().timestamp())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Purged {} expired sessions", result.rows_affected());
        }

        Ok(result.rows_affected())
    }
}

fn map_session(row: &SqliteRow) -> Result<Session> {
    let role: String = row.try_get("role")?;

    Ok(Session {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        role: role
            .parse::<Role>()
            .map_err(|e| anyhow::anyhow!("sessions.role: {}", e))?,
        expires_at: row.try_get("expires_at")?,
        created_at: row.try_get("created_at")?,
    })
}
