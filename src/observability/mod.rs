//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields)
//!     → spans per request (request_id, method, uri) from http/server.rs
//!
//! Consumers:
//!     → logging.rs installs the fmt subscriber (stdout)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every event of a request via its span
//! - `RUST_LOG` overrides the configured level

pub mod logging;
