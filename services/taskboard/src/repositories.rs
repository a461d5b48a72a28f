//! Repositories for database operations
//!
//! Every method runs a single parameterized statement against the shared
//! pool. A connection is checked out for the duration of that statement and
//! goes back to the pool when the future completes or is dropped.

pub mod project;
pub mod session;
pub mod task;
pub mod user;

pub use project::ProjectRepository;
pub use session::SessionRepository;
pub use task::TaskRepository;
pub use user::UserRepository;

#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    use common::database::{DatabaseConfig, init_pool, migrate};

    let pool = init_pool(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory pool");
    migrate(&pool).await.expect("schema bootstrap");
    pool
}
