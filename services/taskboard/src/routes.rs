//! Taskboard routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::{
    middleware::{RequiredRole, require_role, require_session},
    state::AppState,
};

pub mod auth;
pub mod projects;
pub mod tasks;

/// Create the router for the Taskboard service
///
/// ```text
/// public:    /health, /register, /login, /logout
/// session:   everything else
/// role:      /create_project (role from configuration)
/// ```
pub fn create_router(state: AppState) -> Router {
    let role_routes = Router::new()
        .route(
            "/create_project",
            get(projects::create_project_form).post(projects::create_project),
        )
        .route_layer(middleware::from_fn_with_state(
            RequiredRole(state.config.required_project_role()),
            require_role,
        ));

    let protected_routes = Router::new()
        .route("/", get(tasks::index))
        .route("/add", post(tasks::add_task))
        .route("/delete/:id", get(tasks::delete_task))
        .route("/edit/:id", get(tasks::edit_task_form).post(tasks::edit_task))
        .route("/tasks/status/:status", get(tasks::tasks_by_status))
        .route("/user/tasks", get(tasks::user_tasks))
        .route("/user/projects", get(projects::user_projects))
        .route("/projects", get(projects::list_projects))
        .route("/projects/status/:status", get(projects::projects_by_status))
        .route("/projects/:id", get(projects::show_project))
        .route("/projects/:id/tasks", get(tasks::project_tasks))
        .route(
            "/projects/:id/tasks/status/:status",
            get(tasks::project_tasks_by_status),
        )
        .route("/projects/:id/add_task", post(tasks::add_project_task))
        .route(
            "/projects/:id/delete_task/:task_id",
            get(tasks::delete_project_task),
        )
        .route(
            "/projects/:id/edit_task/:task_id",
            get(tasks::edit_project_task_form).post(tasks::edit_project_task),
        )
        .merge(role_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match common::database::health_check(&state.db_pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": "taskboard"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "service": "taskboard"
                })),
            )
        }
    }
}
