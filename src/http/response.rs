//! Response relay from upstream to caller.
//!
//! # Responsibilities
//! - Merge upstream headers into the caller response, value by value
//! - Commit the upstream status code
//! - Stream the upstream body without buffering it
//!
//! # Design Decisions
//! - Headers and status are fixed before hyper writes anything
//! - Body read faults become stream errors; hyper then aborts the connection
//!   and the caller observes a truncated body
//! - Dropping the body stream releases the upstream connection

use axum::{body::Body, response::Response};
use futures_util::TryStreamExt;

use crate::forwarding::ForwardError;

/// Turn an upstream response into the response written to the caller.
pub fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let upstream_headers = upstream.headers().clone();

    let body = Body::from_stream(upstream.bytes_stream().map_err(|e| {
        tracing::warn!(error = %e, "Upstream body failed mid-stream, response truncated");
        ForwardError::RelayIo(e)
    }));

    let mut response = Response::new(body);
    let headers = response.headers_mut();
    for (name, value) in upstream_headers.iter() {
        headers.append(name.clone(), value.clone());
    }
    tracing::debug!(count = upstream_headers.len(), "Headers relayed");

    *response.status_mut() = status;
    tracing::debug!(status = %status, "Status committed");

    response
}
