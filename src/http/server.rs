//! HTTP server startup logic.
//!
//! Binding happens eagerly, before any signal handlers are installed, so a port
//! conflict surfaces as [`ServerError::Bind`] straight away and the process can
//! exit non-zero without ever reporting itself as listening.

use std::net::{SocketAddr, TcpListener};

use axum::Router;
use axum_server::Handle;

use crate::config::HttpServerConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bind, install shutdown signal handling, and serve until shut down.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &HttpServerConfig) -> Result<(), ServerError> {
    let listener = bind_listener(config.socket_addr())?;

    let handle = Handle::new();
    shutdown::setup_shutdown_handler(handle.clone(), config.shutdown_grace);

    serve(app, listener, handle).await
}

/// Bind a non-blocking TCP listener on `addr`.
pub fn bind_listener(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    let listener = TcpListener::bind(addr).map_err(|source| ServerError::Bind { addr, source })?;
    listener
        .set_nonblocking(true)
        .map_err(|source| ServerError::Bind { addr, source })?;
    Ok(listener)
}

/// Serve `app` on an already-bound listener until `handle` is shut down.
pub async fn serve(app: Router, listener: TcpListener, handle: Handle) -> Result<(), ServerError> {
    let local_addr = listener.local_addr()?;
    tracing::info!(addr = %local_addr, "Server listening on {}", local_addr);

    axum_server::from_tcp(listener)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_conflict_is_bind_error() {
        let first = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = first.local_addr().unwrap();

        match bind_listener(addr) {
            Err(ServerError::Bind { addr: failed, .. }) => assert_eq!(failed, addr),
            other => panic!("expected bind error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_bind_error_message_names_address() {
        let first = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = first.local_addr().unwrap();

        let err = bind_listener(addr).unwrap_err();
        assert!(err.to_string().starts_with(&format!("Failed to bind {}", addr)));
    }
}
