//! Taskboard: a small task and project tracker
//!
//! Users register and log in, projects are created by users holding the
//! configured role, and tasks are created, edited and deleted through
//! form posts. State lives in a single SQLite file; sessions are rows in
//! the same store, referenced by an opaque cookie.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, init_pool, migrate};
//! use taskboard::{config::AppConfig, routes::create_router, state::AppState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = init_pool(&DatabaseConfig::from_env()?).await?;
//!     migrate(&pool).await?;
//!     let config = AppConfig::load()?;
//!     let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//!     axum::serve(listener, create_router(AppState::new(pool, config))).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
pub mod views;
