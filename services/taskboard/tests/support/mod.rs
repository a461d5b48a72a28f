//! Common test utilities for router tests
//!
//! Every context gets its own in-memory database, so tests never share rows.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use common::database::{DatabaseConfig, init_pool, migrate};
use serde_json::Value;
use sqlx::SqlitePool;
use taskboard::{config::AppConfig, routes::create_router, state::AppState};
use tower::ServiceExt;

/// Test context holding the router and direct access to the store
pub struct TestContext {
    pub db: SqlitePool,
    pub app: Router,
}

impl TestContext {
    /// Fresh database with the default configuration
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let db = init_pool(&DatabaseConfig::in_memory())
            .await
            .expect("in-memory pool");
        migrate(&db).await.expect("schema bootstrap");

        let app = create_router(AppState::new(db.clone(), config));
        Self { db, app }
    }

    /// Send a GET, optionally carrying a session cookie
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Send an urlencoded form POST, optionally carrying a session cookie
    pub async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(form.to_string())).unwrap())
            .await
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Register a user and assert the redirect to the login view
    pub async fn register(&self, username: &str, password: &str, role: Option<&str>) {
        let mut form = format!("username={}&password={}", username, password);
        if let Some(role) = role {
            form.push_str(&format!("&role={}", role));
        }
        let response = self.post_form("/register", &form, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    /// Log in and return the `name=value` cookie pair to send back
    pub async fn login(&self, username: &str, password: &str) -> String {
        let form = format!("username={}&password={}", username, password);
        let response = self.post_form("/login", &form, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        session_cookie(&response).expect("login sets a session cookie")
    }

    /// Register and log in as a member
    pub async fn member_session(&self, username: &str) -> String {
        self.register(username, "password", None).await;
        self.login(username, "password").await
    }

    /// Register and log in as an admin
    pub async fn admin_session(&self, username: &str) -> String {
        self.register(username, "password", Some("admin")).await;
        self.login(username, "password").await
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.db)
            .await
            .unwrap()
    }
}

/// The `Location` header of a redirect
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// The `name=value` part of the first `Set-Cookie` header
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// Read a response body as a string
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Read a JSON view and return its `data` member
pub async fn view_data(response: Response<Body>, expected_view: &str) -> Value {
    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(value["view"], expected_view);
    value["data"].clone()
}
