//! Configuration loading and constants.
//!
//! All settings come from environment variables. Loading never fails: a variable
//! that is unset falls back to its default, and one that is set but unusable also
//! falls back, with the offending value reported as an [`InvalidVar`] so it can be
//! logged once tracing is up. `AppConfig` is the root configuration struct.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Listening port
pub const ENV_PORT: &str = "PORT";

/// Bind address
pub const ENV_HOST: &str = "HOST";

/// Log output format (text or json)
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Standard tracing filter directive
pub const ENV_LOG_FILTER: &str = "RUST_LOG";

/// Connection drain period after SIGTERM/SIGINT
pub const ENV_SHUTDOWN_GRACE: &str = "SHUTDOWN_GRACE_SECS";

// =============================================================================
// Defaults
// =============================================================================

/// Port used when PORT is unset or invalid
pub const DEFAULT_PORT: u16 = 8080;

/// Listen on all interfaces so the container port mapping reaches us
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "bluegreen_demo=info,tower_http=info";

/// Matches the ECS default stopTimeout, after which the task is SIGKILLed anyway
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Probe responses must never be served from an intermediary cache
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP listener configuration
    pub http: HttpServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig {
    pub host: IpAddr,
    /// Always within 1..=65535
    pub port: u16,
    /// How long in-flight requests may run after a shutdown signal
    pub shutdown_grace: Duration,
}

impl HttpServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            shutdown_grace: Duration::from_secs(DEFAULT_SHUTDOWN_GRACE_SECS),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive string
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable (default)
    #[default]
    Text,
    /// One JSON object per line, for CloudWatch Logs Insights
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

/// An environment variable that was set but could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVar {
    pub name: &'static str,
    pub value: String,
}

impl fmt::Display for InvalidVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:?}", self.name, self.value)
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> (Self, Vec<InvalidVar>) {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Returns the resolved configuration together with every variable whose
    /// value was rejected in favour of the default.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<InvalidVar>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut invalid = Vec::new();
        let mut config = AppConfig {
            http: HttpServerConfig::default(),
            logging: LoggingConfig::default(),
        };

        if let Some(port) = read_var(&lookup, ENV_PORT, parse_port, &mut invalid) {
            config.http.port = port;
        }

        let parse_host = |v: &str| v.parse::<IpAddr>().ok();
        if let Some(host) = read_var(&lookup, ENV_HOST, parse_host, &mut invalid) {
            config.http.host = host;
        }

        let parse_secs = |v: &str| v.parse::<u64>().ok();
        if let Some(secs) = read_var(&lookup, ENV_SHUTDOWN_GRACE, parse_secs, &mut invalid) {
            config.http.shutdown_grace = Duration::from_secs(secs);
        }

        let parse_format = |v: &str| v.parse::<LogFormat>().ok();
        if let Some(format) = read_var(&lookup, ENV_LOG_FORMAT, parse_format, &mut invalid) {
            config.logging.format = format;
        }

        // The filter string is validated by tracing-subscriber itself
        if let Some(filter) = lookup(ENV_LOG_FILTER).filter(|v| !v.trim().is_empty()) {
            config.logging.filter = filter;
        }

        (config, invalid)
    }
}

/// Parse a listening port. Zero is rejected since it would mean "any port".
pub fn parse_port(value: &str) -> Option<u16> {
    value.parse::<u16>().ok().filter(|port| *port != 0)
}

/// Look up `name`, trim it, and parse it. Empty values count as unset; values
/// that fail to parse are recorded in `invalid`.
fn read_var<T, F, P>(
    lookup: &F,
    name: &'static str,
    parse: P,
    invalid: &mut Vec<InvalidVar>,
) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Option<T>,
{
    let raw = lookup(name)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = parse(trimmed);
    if parsed.is_none() {
        invalid.push(InvalidVar { name, value: raw });
    }
    parsed
}
