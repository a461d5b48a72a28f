//! View layer boundary
//!
//! Templates live outside this service. A handler names the view it wants
//! and hands over plain rows; the pair is serialized as JSON.

use axum::Json;
use serde::Serialize;

/// A named view and the rows it renders
#[derive(Debug, Serialize)]
pub struct View<T> {
    pub view: &'static str,
    pub data: T,
}

/// Render `data` through the view called `view`
pub fn render<T: Serialize>(view: &'static str, data: T) -> Json<View<T>> {
    Json(View { view, data })
}
