//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if username.len() < 3 {
        return Err("Username must be at least 3 characters long".to_string());
    }

    if username.len() > 32 {
        return Err("Username must be at most 32 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_.\-]+$").expect("Failed to compile username regex")
    });

    if !regex.is_match(username) {
        return Err(
            "Username can only contain letters, numbers, dots, dashes and underscores".to_string(),
        );
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate a task title, returning it trimmed
pub fn validate_task_title(title: &str) -> Result<&str, String> {
    let title = title.trim();

    if title.is_empty() {
        return Err("Task title is required".to_string());
    }

    if title.chars().count() > 200 {
        return Err("Task title must be at most 200 characters long".to_string());
    }

    Ok(title)
}

/// Validate a project name, returning it trimmed
pub fn validate_project_name(name: &str) -> Result<&str, String> {
    let name = name.trim();

    if name.is_empty() {
        return Err("Project name is required".to_string());
    }

    if name.chars().count() > 100 {
        return Err("Project name must be at most 100 characters long".to_string());
    }

    Ok(name)
}
