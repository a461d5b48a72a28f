//! Service configuration
//!
//! Built-in defaults, overridden by `TASKBOARD_*` environment variables.
//!
//! # Environment Variables
//! - `TASKBOARD_HOST`: Address to bind to (default: "0.0.0.0")
//! - `TASKBOARD_PORT`: Port to bind to (default: 3000)
//! - `TASKBOARD_SESSION_TTL_SECONDS`: Session lifetime (default: 86400)
//! - `TASKBOARD_SESSION_COOKIE`: Session cookie name (default: "session_id")
//! - `TASKBOARD_PROJECT_CREATION_ROLE`: Role required to create projects,
//!   `admin`, `member`, or `none` to disable the check (default: "admin")

use anyhow::{Result, bail};
use config::{Config, Environment};
use serde::Deserialize;

use crate::models::Role;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub session_ttl_seconds: i64,
    pub session_cookie: String,
    pub project_creation_role: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            session_ttl_seconds: 86_400,
            session_cookie: "session_id".to_string(),
            project_creation_role: "admin".to_string(),
        }
    }
}

impl AppConfig {
    /// Load the configuration from defaults and the environment
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("session_ttl_seconds", defaults.session_ttl_seconds)?
            .set_default("session_cookie", defaults.session_cookie)?
            .set_default("project_creation_role", defaults.project_creation_role)?
            .add_source(Environment::with_prefix("TASKBOARD").try_parsing(true))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.session_ttl_seconds <= 0 {
            bail!("session_ttl_seconds must be positive");
        }
        if self.session_cookie.trim().is_empty() {
            bail!("session_cookie must not be empty");
        }
        self.parse_project_creation_role()?;
        Ok(())
    }

    fn parse_project_creation_role(&self) -> Result<Option<Role>> {
        match self.project_creation_role.trim() {
            "" | "none" => Ok(None),
            role => role.parse::<Role>().map(Some).map_err(anyhow::Error::msg),
        }
    }

    /// Role a session needs to create projects; `None` means any session
    pub fn required_project_role(&self) -> Option<Role> {
        // `load` rejects unknown roles; a hand-built config falls back to admin.
        self.parse_project_creation_role().unwrap_or(Some(Role::Admin))
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
