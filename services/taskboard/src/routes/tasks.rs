//! Task handlers, both unscoped (`/add`, `/edit/:id`, ...) and scoped to a
//! project (`/projects/:id/...`)

use axum::{
    Extension, Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::info;

use super::projects::require_project;
use crate::{
    error::{AppError, AppResult},
    models::{NewTask, SessionUser, TaskFilter, TaskStatus, TaskUpdate},
    state::AppState,
    validation::validate_task_title,
    views::render,
};

/// Form posted to `/add`
#[derive(Debug, Deserialize)]
pub struct AddTaskForm {
    pub task: Option<String>,
}

/// Form posted to `/projects/:id/add_task`
#[derive(Debug, Deserialize)]
pub struct ProjectTaskForm {
    pub title: Option<String>,
}

/// Form posted to the edit routes; blank fields are left unchanged
#[derive(Debug, Deserialize)]
pub struct EditTaskForm {
    pub title: Option<String>,
    pub status: Option<String>,
}

impl EditTaskForm {
    fn into_update(self) -> AppResult<TaskUpdate> {
        let title = match self.title.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(title) => Some(
                validate_task_title(title)
                    .map_err(AppError::Validation)?
                    .to_string(),
            ),
        };

        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(status) => Some(parse_status(status)?),
        };

        Ok(TaskUpdate { title, status })
    }
}

/// Parse a status from a form field or path segment
pub(super) fn parse_status(status: &str) -> AppResult<TaskStatus> {
    status.parse().map_err(AppError::Validation)
}

/// Insert a task unless the title is blank
async fn insert_task(
    state: &AppState,
    title: Option<&str>,
    project_id: Option<i64>,
    user: &SessionUser,
) -> AppResult<()> {
    let title = title.map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Ok(());
    }
    let title = validate_task_title(title).map_err(AppError::Validation)?;

    let task = state
        .task_repository
        .create(&NewTask {
            title: title.to_string(),
            project_id,
            user_id: Some(user.user_id),
        })
        .await?;

    info!("User {} created task {}", user.username, task.id);
    Ok(())
}

async fn apply_update(
    state: &AppState,
    id: i64,
    project_id: Option<i64>,
    form: EditTaskForm,
) -> AppResult<()> {
    let update = form.into_update()?;
    if update.is_empty() {
        // Nothing to write, but a missing task is still a 404.
        if state.task_repository.find(id, project_id).await?.is_none() {
            return Err(AppError::NotFound("Task"));
        }
        return Ok(());
    }

    if !state.task_repository.update(id, project_id, &update).await? {
        return Err(AppError::NotFound("Task"));
    }
    Ok(())
}

/// Home view: every task
pub async fn index(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tasks = state.task_repository.list(&TaskFilter::default()).await?;
    Ok(render("index", tasks))
}

pub async fn add_task(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<AddTaskForm>,
) -> AppResult<Redirect> {
    insert_task(&state, form.task.as_deref(), None, &user).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    if state.task_repository.delete(id, None).await? {
        info!("Deleted task {}", id);
    }
    Ok(Redirect::to("/"))
}

pub async fn edit_task_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let task = state
        .task_repository
        .find(id, None)
        .await?
        .ok_or(AppError::NotFound("Task"))?;
    Ok(render("edit", task))
}

pub async fn edit_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<EditTaskForm>,
) -> AppResult<Redirect> {
    apply_update(&state, id, None, form).await?;
    Ok(Redirect::to("/"))
}

pub async fn tasks_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<impl IntoResponse> {
    let status = parse_status(&status)?;
    let tasks = state
        .task_repository
        .list(&TaskFilter::default().status(status))
        .await?;
    Ok(render("tasks", tasks))
}

/// Tasks owned by the current user
pub async fn user_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> AppResult<impl IntoResponse> {
    let tasks = state
        .task_repository
        .list(&TaskFilter::default().user(user.user_id))
        .await?;
    Ok(render("user_tasks", tasks))
}

pub async fn project_tasks(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    require_project(&state, project_id).await?;
    let tasks = state
        .task_repository
        .list(&TaskFilter::default().project(project_id))
        .await?;
    Ok(render("project_tasks", tasks))
}

pub async fn project_tasks_by_status(
    State(state): State<AppState>,
    Path((project_id, status)): Path<(i64, String)>,
) -> AppResult<impl IntoResponse> {
    let status = parse_status(&status)?;
    require_project(&state, project_id).await?;
    let tasks = state
        .task_repository
        .list(&TaskFilter::default().project(project_id).status(status))
        .await?;
    Ok(render("project_tasks", tasks))
}

pub async fn add_project_task(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(project_id): Path<i64>,
    Form(form): Form<ProjectTaskForm>,
) -> AppResult<Redirect> {
    require_project(&state, project_id).await?;
    insert_task(&state, form.title.as_deref(), Some(project_id), &user).await?;
    Ok(Redirect::to(&format!("/projects/{}", project_id)))
}

pub async fn delete_project_task(
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(i64, i64)>,
) -> AppResult<Redirect> {
    require_project(&state, project_id).await?;
    if state
        .task_repository
        .delete(task_id, Some(project_id))
        .await?
    {
        info!("Deleted task {} from project {}", task_id, project_id);
    }
    Ok(Redirect::to(&format!("/projects/{}", project_id)))
}

pub async fn edit_project_task_form(
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(i64, i64)>,
) -> AppResult<impl IntoResponse> {
    require_project(&state, project_id).await?;
    let task = state
        .task_repository
        .find(task_id, Some(project_id))
        .await?
        .ok_or(AppError::NotFound("Task"))?;
    Ok(render("edit", task))
}

pub async fn edit_project_task(
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(i64, i64)>,
    Form(form): Form<EditTaskForm>,
) -> AppResult<Redirect> {
    require_project(&state, project_id).await?;
    apply_update(&state, task_id, Some(project_id), form).await?;
    Ok(Redirect::to(&format!("/projects/{}", project_id)))
}
