//! Error types for the forwarding path.

use std::error::Error as _;
use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Errors that can occur while forwarding one request.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ForwardError {
    /// The configured target is not an absolute http(s) URL.
    #[error("invalid target URL: {0}")]
    InvalidTarget(String),

    /// The outbound request could not be assembled.
    #[error("failed to create request: {0}")]
    RequestConstruction(String),

    /// The upstream could not be reached, or gave up before sending headers.
    #[error("external request failed: {reason}")]
    UpstreamUnavailable {
        reason: String,
        #[source]
        source: reqwest::Error,
    },

    /// Reading the upstream body failed after the status was committed.
    #[error("relaying response body failed: {0}")]
    RelayIo(#[source] reqwest::Error),
}

impl ForwardError {
    /// Classify a failed dispatch, naming the timeout when that was the cause.
    ///
    /// `timeout` is the client's deadline if known; without it the message
    /// does not state a duration.
    pub fn upstream(source: reqwest::Error, timeout: Option<Duration>) -> Self {
        let reason = if source.is_timeout() {
            match timeout {
                Some(t) => format!("upstream timed out after {}s", t.as_secs()),
                None => "upstream timed out".to_string(),
            }
        } else if source.is_connect() {
            format!("connection failed: {}", error_chain(&source))
        } else {
            error_chain(&source)
        };
        ForwardError::UpstreamUnavailable { reason, source }
    }
}

/// Render an error with its sources, e.g. `error sending request: tcp connect error: refused`.
fn error_chain(err: &reqwest::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_GATEWAY, format!("Proxy Error: {}", self)).into_response()
    }
}
