//! Task repository for database operations

use anyhow::Result;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool, sqlite::SqliteRow};
use tracing::info;

use crate::models::{NewTask, Task, TaskFilter, TaskStatus, TaskUpdate};

const TASK_COLUMNS: &str = "id, project_id, user_id, title, status, created_at";

/// Task repository
#[derive(Clone)]
pub struct TaskRepository {
    pool: SqlitePool,
}

impl TaskRepository {
    /// Create a new task repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new task in the `pending` state
    pub async fn create(&self, new_task: &NewTask) -> Result<Task> {
        info!("Creating new task: {}", new_task.title);

        let row = sqlx::query(&format!(
            "INSERT INTO tasks (title, project_id, user_id) VALUES (?, ?, ?) RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(&new_task.title)
        .bind(new_task.project_id)
        .bind(new_task.user_id)
        .fetch_one(&self.pool)
        .await?;

        map_task(&row)
    }

    /// List tasks matching every predicate set on the filter
    pub async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM tasks WHERE 1 = 1",
            TASK_COLUMNS
        ));

        if let Some(project_id) = filter.project_id {
            query.push(" AND project_id = ").push_bind(project_id);
        }
        if let Some(user_id) = filter.user_id {
            query.push(" AND user_id = ").push_bind(user_id);
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        query.push(" ORDER BY id");

        let rows = query.build().fetch_all(&self.pool).await?;
        rows.iter().map(map_task).collect()
    }

    /// Find a task by ID, optionally scoped to a project
    pub async fn find(&self, id: i64, project_id: Option<i64>) -> Result<Option<Task>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM tasks WHERE id = ? AND (? IS NULL OR project_id = ?)",
            TASK_COLUMNS
        ))
        .bind(id)
        .bind(project_id)
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_task).transpose()
    }

    /// Update the title and/or status of a task
    ///
    /// Returns `false` when no task matched the id (and project scope).
    pub async fn update(
        &self,
        id: i64,
        project_id: Option<i64>,
        update: &TaskUpdate,
    ) -> Result<bool> {
        info!("Updating task {}", id);

        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = COALESCE(?, title), status = COALESCE(?, status)
            WHERE id = ? AND (? IS NULL OR project_id = ?)
            "#,
        )
        .bind(update.title.as_deref())
        .bind(update.status.map(|status| status.as_str()))
        .bind(id)
        .bind(project_id)
        .bind(project_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a task, optionally scoped to a project
    ///
    /// Returns `false` when nothing was deleted.
    pub async fn delete(&self, id: i64, project_id: Option<i64>) -> Result<bool> {
        info!("Deleting task {}", id);

        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND (? IS NULL OR project_id = ?)")
            .bind(id)
            .bind(project_id)
            .bind(project_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_task(row: &SqliteRow) -> Result<Task> {
    let status: String = row.try_get("status")?;

    Ok(Task {
        id: row.try_get("id")?,
        project_id: row.try_get("project_id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        status: status
            .parse::<TaskStatus>()
            .map_err(|e| anyhow::anyhow!("tasks.status: {}", e))?,
        created_at: row.try_get("created_at")?,
    })
}
