//! In-process server tests.
//!
//! Each test binds the real listener on an ephemeral loopback port, serves the
//! router on it, and talks to it over HTTP with reqwest.

use std::net::SocketAddr;
use std::time::Duration;

use axum_server::Handle;
use bluegreen_demo::create_router;
use bluegreen_demo::http::{bind_listener, serve, ServerError};
use tokio::task::JoinHandle;

struct TestServer {
    addr: SocketAddr,
    handle: Handle,
    task: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    fn start() -> Self {
        let listener = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = Handle::new();
        let task = tokio::spawn(serve(create_router(), listener, handle.clone()));
        Self { addr, handle, task }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn stop(self) -> Result<(), ServerError> {
        self.handle.graceful_shutdown(Some(Duration::from_secs(1)));
        tokio::time::timeout(Duration::from_secs(5), self.task)
            .await
            .expect("server did not stop within 5 seconds")
            .expect("server task panicked")
    }
}

#[tokio::test]
async fn test_health_over_http() {
    let server = TestServer::start();

    let response = reqwest::get(server.url("/health")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(response.text().await.unwrap(), r#"{"ok":true}"#);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_root_over_http() {
    let server = TestServer::start();

    let response = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "message": "Hello from ECS blue/green demo!" })
    );

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_requests_return_identical_bodies() {
    let server = TestServer::start();
    let client = reqwest::Client::new();

    let mut requests = Vec::new();
    for _ in 0..16 {
        let client = client.clone();
        let url = server.url("/health");
        requests.push(tokio::spawn(async move {
            client.get(url).send().await.unwrap().text().await.unwrap()
        }));
    }

    for request in requests {
        assert_eq!(request.await.unwrap(), r#"{"ok":true}"#);
    }

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_unknown_path_over_http() {
    let server = TestServer::start();

    let response = reqwest::get(server.url("/does/not/exist")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key("x-request-id"));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_graceful_shutdown_returns_ok() {
    let server = TestServer::start();
    let addr = server.addr;

    // Make sure the accept loop is up before shutting it down
    reqwest::get(server.url("/health")).await.unwrap();

    assert!(server.stop().await.is_ok());
    assert!(reqwest::get(format!("http://{}/health", addr)).await.is_err());
}

#[tokio::test]
async fn test_port_in_use_is_bind_error() {
    let server = TestServer::start();

    let err = bind_listener(server.addr).unwrap_err();
    assert!(matches!(err, ServerError::Bind { addr, .. } if addr == server.addr));

    server.stop().await.unwrap();
}
