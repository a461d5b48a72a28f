//! Session and role gates
//!
//! `require_session` guards every protected route; `require_role` is layered
//! on top for routes that need a particular role. Both reject by redirecting
//! to the login view, so a missing session and a missing role look alike.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use tracing::warn;

use crate::{
    error::AppError,
    models::{Role, SessionUser},
    state::AppState,
};

/// Role a route requires; `None` lets any session through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredRole(pub Option<Role>);

/// Resolve the session cookie and attach the [`SessionUser`] to the request
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session_id = jar
        .get(&state.config.session_cookie)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AppError::Unauthenticated)?;

    let session = state
        .session_repository
        .find_valid(&session_id)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    req.extensions_mut().insert(SessionUser::from(session));

    Ok(next.run(req).await)
}

/// Let the request through only when the session carries the required role
///
/// Must run inside [`require_session`].
pub async fn require_role(
    State(RequiredRole(required)): State<RequiredRole>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(required) = required else {
        return Ok(next.run(req).await);
    };

    let user = req
        .extensions()
        .get::<SessionUser>()
        .ok_or(AppError::Unauthenticated)?;

    if user.role != required {
        warn!(
            "User {} with role {} denied access to {} (requires {})",
            user.username,
            user.role,
            req.uri().path(),
            required
        );
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(req).await)
}
