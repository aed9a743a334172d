//! Fault guard around the forwarder.
//!
//! Converts the outcome of one forward into a response: explicit errors
//! become 502, panics become 500. The guard sits at the handler entry and
//! nowhere deeper.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::FutureExt;

use crate::forwarding::ForwardError;

/// Run `forward` to completion, recovering from errors and panics.
pub async fn recover<F>(forward: F) -> Response
where
    F: Future<Output = Result<Response, ForwardError>>,
{
    match AssertUnwindSafe(forward).catch_unwind().await {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "Forwarding failed");
            err.into_response()
        }
        Err(payload) => {
            let description = panic_message(payload.as_ref());
            tracing::error!(panic = %description, "Recovered from panic while forwarding");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Recovered from panic: {}", description),
            )
                .into_response()
        }
    }
}

/// Human-readable text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
