//! bluegreen-demo: smoke-test target for ECS blue/green deployments.
//!
//! Serves two static JSON endpoints, `GET /health` and `GET /`, that a
//! deployment pipeline probes before shifting traffic to a new task set.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod routes;

pub use config::AppConfig;
pub use error::AppError;
pub use routes::create_router;
