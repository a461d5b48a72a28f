//! User repository for database operations

use anyhow::Result;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use tracing::info;

use crate::{
    models::{NewUser, Role, User},
    password,
};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user, hashing the password before it is stored
    ///
    /// A duplicate username surfaces as the store's unique-constraint error.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        info!("Creating new user: {}", new_user.username);

        let password_hash = password::hash_password(&new_user.password)?;

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES (?, ?, ?)
            RETURNING id, username, password_hash, role, created_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&password_hash)
        .bind(new_user.role.as_str())
        .fetch_one(&self.pool)
        .await?;

        map_user(&row)
    }

    /// Find a user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, role, created_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_user).transpose()
    }
}

fn map_user(row: &SqliteRow) -> Result<User> {
    let role: String = row.try_get("role")?;

    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        role: role
            .parse::<Role>()
            .map_err(|e| anyhow::anyhow!("users.role: {}", e))?,
        created_at: row.try_get("created_at")?,
    })
}
