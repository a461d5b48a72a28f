//! Project handlers

use axum::{
    Extension, Form, Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::tasks::parse_status;
use crate::{
    error::{AppError, AppResult},
    models::{NewProject, Project, SessionUser, Task, TaskFilter},
    state::AppState,
    validation::validate_project_name,
    views::{View, render},
};

/// Project creation form
#[derive(Debug, Deserialize)]
pub struct CreateProjectForm {
    pub name: String,
    pub description: Option<String>,
}

/// A project together with its tasks
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub tasks: Vec<Task>,
}

/// Load a project or answer 404
pub(crate) async fn require_project(state: &AppState, id: i64) -> AppResult<Project> {
    state
        .project_repository
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Project"))
}

/// Project creation view
pub async fn create_project_form() -> Json<View<()>> {
    render("create_project", ())
}

/// Create a project and show it
pub async fn create_project(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<CreateProjectForm>,
) -> AppResult<Redirect> {
    let name = validate_project_name(&form.name).map_err(AppError::Validation)?;
    let description = form
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    let project = state
        .project_repository
        .create(&NewProject {
            name: name.to_string(),
            description,
        })
        .await?;

    info!("User {} created project {}", user.username, project.id);
    Ok(Redirect::to(&format!("/projects/{}", project.id)))
}

/// All projects
pub async fn list_projects(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let projects = state.project_repository.list_all().await?;
    Ok(render("projects", projects))
}

/// One project and its tasks
pub async fn show_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let project = require_project(&state, id).await?;
    let tasks = state
        .task_repository
        .list(&TaskFilter::default().project(id))
        .await?;

    Ok(render("project", ProjectDetail { project, tasks }))
}

/// Projects in which the current user owns a task
pub async fn user_projects(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> AppResult<impl IntoResponse> {
    let projects = state
        .project_repository
        .list_for_user(user.user_id)
        .await?;
    Ok(render("user_projects", projects))
}

/// Projects holding a task with the given status
pub async fn projects_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<impl IntoResponse> {
    let status = parse_status(&status)?;
    let projects = state
        .project_repository
        .list_by_task_status(status)
        .await?;
    Ok(render("projects", projects))
}
