//! Application state shared across handlers

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::{
    config::AppConfig,
    repositories::{ProjectRepository, SessionRepository, TaskRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Arc<AppConfig>,
    pub user_repository: UserRepository,
    pub project_repository: ProjectRepository,
    pub task_repository: TaskRepository,
    pub session_repository: SessionRepository,
}

impl AppState {
    /// Wire every repository to the same pool
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        Self {
            user_repository: UserRepository::new(pool.clone()),
            project_repository: ProjectRepository::new(pool.clone()),
            task_repository: TaskRepository::new(pool.clone()),
            session_repository: SessionRepository::new(pool.clone()),
            db_pool: pool,
            config: Arc::new(config),
        }
    }
}
