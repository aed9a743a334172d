//! Single-shot forwarding to the configured upstream.
//!
//! # Responsibilities
//! - Parse the target URL for every request
//! - Build the outbound request (method copied, `User-Agent` forced)
//! - Dispatch it once through the shared client
//! - Hand the upstream response to the relay
//!
//! # Design Decisions
//! - The inbound path and query are discarded; the target is used verbatim
//! - Inbound headers and body are dropped unless explicitly enabled
//! - A forwarded inbound body is buffered up to a configured limit

use std::time::Duration;

use axum::{
    body::Body,
    http::{
        header::{self, HeaderMap, HeaderValue},
        Request,
    },
    response::Response,
};
use url::Url;

use crate::config::UpstreamConfig;
use crate::forwarding::client::build_client;
use crate::forwarding::error::ForwardError;
use crate::http::request::X_REQUEST_ID;
use crate::http::response::relay;

/// Headers that describe a single connection and never cross a proxy.
const HOP_BY_HOP: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-connection",
    "transfer-encoding",
    "te",
    "trailer",
    "upgrade",
    "proxy-authorization",
    "proxy-authenticate",
];

/// Forwards requests to one upstream target.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    target: String,
    user_agent: String,
    /// Deadline the client enforces, when known. Used only to describe timeouts.
    timeout: Option<Duration>,
    forward_headers: bool,
    forward_body: bool,
    max_body_bytes: usize,
}

impl Forwarder {
    /// Create a forwarder with its own client built from `config`.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut forwarder = Self::with_client(build_client(config)?, config);
        forwarder.timeout = Some(Duration::from_secs(config.timeout_secs));
        Ok(forwarder)
    }

    /// Create a forwarder around an existing client.
    ///
    /// `config.timeout_secs` is ignored here: the client's own deadline
    /// applies, and timeout errors do not claim a duration.
    pub fn with_client(client: reqwest::Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            target: config.target_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: None,
            forward_headers: config.forward_request_headers,
            forward_body: config.forward_request_body,
            max_body_bytes: config.max_request_body_bytes,
        }
    }

    /// The raw, unparsed target URL.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Forward one inbound request and relay the upstream response.
    ///
    /// Errors are returned before any part of the response exists. Once this
    /// returns `Ok`, status and headers are fixed and only the body remains,
    /// so a later upstream fault truncates the body instead.
    pub async fn forward(&self, inbound: Request<Body>) -> Result<Response, ForwardError> {
        let target = parse_target(&self.target)?;
        tracing::debug!(target = %target, "Target parsed");

        let outbound = self.build_request(inbound, target).await?;
        tracing::debug!(method = %outbound.method(), "Outbound request built");

        let upstream = self.dispatch(outbound).await?;
        tracing::debug!(status = %upstream.status(), "Upstream responded");

        Ok(relay(upstream))
    }

    /// Assemble the outbound request for `inbound`, aimed at `target`.
    pub async fn build_request(
        &self,
        inbound: Request<Body>,
        target: Url,
    ) -> Result<reqwest::Request, ForwardError> {
        let (parts, body) = inbound.into_parts();

        let mut headers = HeaderMap::new();
        if self.forward_headers {
            copy_end_to_end(&parts.headers, &mut headers);
        }

        let user_agent = HeaderValue::from_str(&self.user_agent).map_err(|e| {
            ForwardError::RequestConstruction(format!(
                "invalid User-Agent {:?}: {}",
                self.user_agent, e
            ))
        })?;
        headers.insert(header::USER_AGENT, user_agent);

        let mut builder = self.client.request(parts.method, target).headers(headers);

        if self.forward_body {
            let bytes = axum::body::to_bytes(body, self.max_body_bytes)
                .await
                .map_err(|e| {
                    ForwardError::RequestConstruction(format!("reading inbound body: {}", e))
                })?;
            builder = builder.body(bytes);
        }

        builder
            .build()
            .map_err(|e| ForwardError::RequestConstruction(e.to_string()))
    }

    /// Send the request once. Timeouts are enforced by the client.
    pub async fn dispatch(
        &self,
        outbound: reqwest::Request,
    ) -> Result<reqwest::Response, ForwardError> {
        self.client
            .execute(outbound)
            .await
            .map_err(|e| ForwardError::upstream(e, self.timeout))
    }
}

/// Parse `raw` as an absolute http(s) URL.
pub fn parse_target(raw: &str) -> Result<Url, ForwardError> {
    let url = Url::parse(raw).map_err(|e| ForwardError::InvalidTarget(format!("{:?}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ForwardError::InvalidTarget(format!(
            "{:?}: unsupported scheme '{}'",
            raw, other
        ))),
    }
}

/// Copy inbound headers that are meaningful to the upstream.
///
/// Skips hop-by-hop headers, including any the caller listed in `Connection`,
/// and the locally generated request ID.
fn copy_end_to_end(from: &HeaderMap, to: &mut HeaderMap) {
    let connection_scoped: Vec<String> = from
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|token| token.trim().to_ascii_lowercase())
        .filter(|token| !token.is_empty())
        .collect();

    for (name, value) in from {
        if HOP_BY_HOP.contains(&name.as_str())
            || connection_scoped.iter().any(|token| token == name.as_str())
            || *name == header::HOST
            || *name == header::CONTENT_LENGTH
            || *name == header::USER_AGENT
            || *name == X_REQUEST_ID
        {
            continue;
        }
        to.append(name.clone(), value.clone());
    }
}
