//! Tracing subscriber setup.
//!
//! Logs go to stdout, where the awslogs driver ships them to CloudWatch. JSON
//! output keeps span fields (request_id, path, status) queryable there.

use tracing_subscriber::{
    filter::ParseError, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig, DEFAULT_LOG_FILTER};

/// Install the global tracing subscriber.
///
/// An unparseable filter is replaced with [`DEFAULT_LOG_FILTER`] and reported
/// once the subscriber is live.
pub fn init_tracing(config: &LoggingConfig) {
    let (filter, rejected) = match env_filter(&config.filter) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(e)),
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Text => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .init(),
    }

    if let Some(e) = rejected {
        tracing::warn!(
            filter = %config.filter,
            error = %e,
            "Invalid log filter, using default"
        );
    }
}

/// Parse a filter directive string such as `bluegreen_demo=debug,tower_http=info`.
pub fn env_filter(directives: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(directives)
}
