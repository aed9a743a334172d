//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, single catch-all route)
//!     → request.rs (request ID)
//!     → guard.rs (fault guard: errors → 502, panics → 500)
//!     → forwarding::Forwarder (build, dispatch)
//!     → response.rs (relay headers, status, streaming body)
//!     → Send to client
//! ```

pub mod guard;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError};
