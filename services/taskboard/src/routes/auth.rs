//! Registration, login and logout

use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult, LOGIN_PATH, is_unique_violation},
    models::{NewUser, Role},
    password,
    state::AppState,
    validation::{validate_password, validate_username},
    views::{View, render},
};

/// Registration form
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub role: Option<String>,
}

/// Login form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration view
pub async fn register_form() -> Json<View<()>> {
    render("register", ())
}

/// Create an account, then send the user to the login view
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> AppResult<Redirect> {
    let username = form.username.trim();
    validate_username(username).map_err(AppError::Validation)?;
    validate_password(&form.password).map_err(AppError::Validation)?;

    let role = match form.role.as_deref().map(str::trim) {
        None | Some("") => Role::default(),
        Some(role) => role.parse::<Role>().map_err(AppError::Validation)?,
    };

    let new_user = NewUser {
        username: username.to_string(),
        password: form.password,
        role,
    };

    match state.user_repository.create(&new_user).await {
        Ok(user) => {
            info!("Registered user {} with role {}", user.username, user.role);
            Ok(Redirect::to(LOGIN_PATH))
        }
        Err(e) if is_unique_violation(&e) => {
            warn!("Registration rejected, username taken: {}", new_user.username);
            Err(AppError::UsernameTaken)
        }
        Err(e) => Err(e.into()),
    }
}

/// Login view
pub async fn login_form() -> Json<View<()>> {
    render("login", ())
}

/// Check credentials and open a session
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<impl IntoResponse> {
    let username = form.username.trim();

    let Some(user) = state.user_repository.find_by_username(username).await? else {
        password::verify_dummy(&form.password);
        warn!("Login failed for unknown user: {}", username);
        return Err(AppError::InvalidCredentials);
    };

    let valid = password::verify_password(&form.password, &user.password_hash)
        .map_err(anyhow::Error::from)?;
    if !valid {
        warn!("Login failed for user: {}", username);
        return Err(AppError::InvalidCredentials);
    }

    state.session_repository.purge_expired().await?;
    let session = state
        .session_repository
        .create(&user, state.config.session_ttl_seconds)
        .await?;

    let cookie = Cookie::build((state.config.session_cookie.clone(), session.id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    info!("User {} logged in", user.username);
    Ok((jar.add(cookie), Redirect::to("/")))
}

/// Drop the session, whether or not there was one
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> AppResult<impl IntoResponse> {
    if let Some(cookie) = jar.get(&state.config.session_cookie) {
        if state.session_repository.delete(cookie.value()).await? {
            info!("Session closed");
        }
    }

    let removal = Cookie::build((state.config.session_cookie.clone(), "")).path("/");
    Ok((jar.remove(removal), Redirect::to(LOGIN_PATH)))
}
