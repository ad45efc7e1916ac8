//! bluegreen-demo server binary.
//!
//! Reads configuration from the environment, initializes tracing, and serves
//! the probe routes until SIGTERM/SIGINT. A bind failure is logged and returned
//! from `main`, which exits the process with a non-zero status.

use bluegreen_demo::config::AppConfig;
use bluegreen_demo::http::start_server;
use bluegreen_demo::logging::init_tracing;
use bluegreen_demo::routes::create_router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, invalid) = AppConfig::from_env();

    init_tracing(&config.logging);

    for var in &invalid {
        tracing::warn!(
            variable = var.name,
            value = %var.value,
            "Ignoring invalid environment variable, using default"
        );
    }

    tracing::info!(
        addr = %config.http.socket_addr(),
        version = env!("CARGO_PKG_VERSION"),
        "Loaded configuration"
    );

    let app = create_router();

    if let Err(e) = start_server(app, &config.http).await {
        tracing::error!(error = %e, "Server failed");
        return Err(e.into());
    }

    Ok(())
}
