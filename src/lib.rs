//! Single-target HTTP relay library.

pub mod config;
pub mod forwarding;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::RelayConfig;
pub use forwarding::{ForwardError, Forwarder};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
