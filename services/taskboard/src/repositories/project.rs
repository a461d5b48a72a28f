//! Project repository for database operations

use anyhow::Result;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use tracing::info;

use crate::models::{NewProject, Project, TaskStatus};

/// Project repository
#[derive(Clone)]
pub struct ProjectRepository {
    pool: SqlitePool,
}

impl ProjectRepository {
    /// Create a new project repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new project
    pub async fn create(&self, new_project: &NewProject) -> Result<Project> {
        info!("Creating new project: {}", new_project.name);

        let row = sqlx::query(
            r#"
            INSERT INTO projects (name, description)
            VALUES (?, ?)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(&new_project.name)
        .bind(&new_project.description)
        .fetch_one(&self.pool)
        .await?;

        map_project(&row)
    }

    /// Find a project by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Project>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, created_at
            FROM projects
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_project).transpose()
    }

    /// Get all projects
    pub async fn list_all(&self) -> Result<Vec<Project>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, created_at
            FROM projects
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_project).collect()
    }

    /// Get the projects holding at least one task owned by the user
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Project>> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT p.id, p.name, p.description, p.created_at
            FROM projects p
            JOIN tasks t ON t.project_id = p.id
            WHERE t.user_id = ?
            ORDER BY p.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_project).collect()
    }

    /// Get the projects holding at least one task with the given status
    pub async fn list_by_task_status(&self, status: TaskStatus) -> Result<Vec<Project>> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT p.id, p.name, p.description, p.created_at
            FROM projects p
            JOIN tasks t ON t.project_id = p.id
            WHERE t.status = ?
            ORDER BY p.id
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_project).collect()
    }
}

fn map_project(row: &SqliteRow) -> Result<Project> {
    Ok(Project {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
    })
}
