//! HTTP server module.
//!
//! Plain HTTP only; TLS is terminated at the load balancer in front of the
//! ECS service. The server includes:
//! - Eager binding so port conflicts fail fast
//! - Graceful shutdown on SIGTERM/SIGINT

mod server;
mod shutdown;

pub use server::{bind_listener, serve, start_server, ServerError};
