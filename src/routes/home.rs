//! Root greeting.

use axum::Json;
use serde::Serialize;

pub const GREETING: &str = "Hello from ECS blue/green demo!";

#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: &'static str,
}

/// Handler for `GET /`.
pub async fn index() -> Json<Greeting> {
    Json(Greeting { message: GREETING })
}
