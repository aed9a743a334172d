//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → forwarder.rs (parse target, build outbound request, dispatch)
//!     → client.rs (shared reqwest client, total timeout)
//!     → http/response.rs (relay status, headers, streaming body)
//!
//! Per-request stages:
//!     Init → TargetParsed → RequestBuilt → Dispatched
//!         → HeadersRelayed → StatusCommitted → BodyStreaming → Done
//!         | Failed (before status)   → 502 via http/guard.rs
//!         | Truncated (during body)  → connection aborted by hyper
//! ```
//!
//! # Design Decisions
//! - Exactly one attempt per request, no retries
//! - Timeouts are enforced by the client, not by a middleware layer
//! - The body is never buffered on the way back

pub mod client;
pub mod error;
pub mod forwarder;

pub use error::ForwardError;
pub use forwarder::Forwarder;
