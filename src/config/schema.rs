//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Upstream used when no target is configured.
pub const DEFAULT_TARGET_URL: &str = "https://api.github.com/zen";

/// Identifying `User-Agent` sent on every outbound request.
pub const DEFAULT_USER_AGENT: &str = concat!("upstream-relay/", env!("CARGO_PKG_VERSION"));

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The single upstream every request is forwarded to.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream target and outbound request policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Absolute URL every request is sent to. Parsed per request; a malformed
    /// value yields 502 responses rather than a startup failure.
    pub target_url: String,

    /// Value forced into the outbound `User-Agent` header.
    pub user_agent: String,

    /// Total timeout (connect + headers + body) in seconds.
    pub timeout_secs: u64,

    /// Copy inbound end-to-end headers onto the outbound request.
    pub forward_request_headers: bool,

    /// Send the inbound body upstream instead of an empty one.
    pub forward_request_body: bool,

    /// Upper bound for a forwarded inbound body, in bytes.
    pub max_request_body_bytes: usize,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` for outbound requests.
    pub system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            forward_request_headers: false,
            forward_request_body: false,
            max_request_body_bytes: 2 * 1024 * 1024, // 2MB
            system_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
