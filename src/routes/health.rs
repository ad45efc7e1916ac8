//! Health check endpoint for container orchestration.
//!
//! Provides a simple liveness probe that returns 200 OK when the process is running.
//! The ALB target group and the ECS container health check both poll this path
//! before a new task set receives traffic.

use axum::Json;
use serde::Serialize;

/// Body of the health response: `{"ok":true}`
#[derive(Debug, Serialize)]
pub struct Health {
    pub ok: bool,
}

/// Health check handler.
///
/// This is a liveness probe only; it never inspects anything beyond the
/// fact that the process can answer HTTP.
pub async fn health() -> Json<Health> {
    Json(Health { ok: true })
}
