//! Outbound HTTP client.
//!
//! One client is built at startup and shared by every request; reqwest keeps
//! its own connection pool behind an `Arc`.

use std::time::Duration;

use crate::config::UpstreamConfig;

/// Build the outbound client with a total deadline covering connect, headers and body.
pub fn build_client(config: &UpstreamConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));
    if !config.system_proxy {
        builder = builder.no_proxy();
    }
    builder.build()
}
