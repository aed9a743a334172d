//! Shared mock upstreams for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    response::Response,
    routing::any,
    Router,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use upstream_relay::config::RelayConfig;

/// Serve `router` on an ephemeral loopback port.
pub async fn start_upstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

/// Upstream that reports what it received in `x-seen-*` headers and echoes the body.
pub async fn start_echo_upstream() -> SocketAddr {
    start_upstream(Router::new().route("/{*path}", any(echo)).route("/", any(echo))).await
}

async fn echo(request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();

    let agents: Vec<&str> = parts
        .headers
        .get_all(header::USER_AGENT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert("x-seen-method", HeaderValue::from_str(parts.method.as_str()).unwrap());
    headers.insert("x-seen-user-agent", HeaderValue::from_str(&agents.join(", ")).unwrap());
    headers.insert("x-seen-path", HeaderValue::from_str(&parts.uri.to_string()).unwrap());
    if let Some(auth) = parts.headers.get(header::AUTHORIZATION) {
        headers.insert("x-seen-authorization", auth.clone());
    }
    if let Some(id) = parts.headers.get("x-request-id") {
        headers.insert("x-seen-request-id", id.clone());
    }
    response
}

/// Upstream that answers `body` after waiting `delay`.
pub async fn start_slow_upstream(delay: Duration, body: &'static str) -> SocketAddr {
    start_upstream(Router::new().route(
        "/{*path}",
        any(move || async move {
            tokio::time::sleep(delay).await;
            body
        }),
    ))
    .await
}

/// Raw TCP upstream that reads the request head, writes `response` verbatim and closes.
pub async fn start_raw_upstream(response: &'static [u8]) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = socket.write_all(response).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Raw TCP upstream that writes `head` (status line, headers, first chunk)
/// and then stalls with the connection open.
pub async fn start_stalling_upstream(head: &'static [u8]) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(head).await;
                tokio::time::sleep(Duration::from_secs(30)).await;
                drop(socket);
            });
        }
    });

    addr
}

/// An address nothing is listening on.
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Relay config aimed at `target`, with no proxy env handling.
pub fn relay_config(target: impl Into<String>) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.target_url = target.into();
    config.upstream.system_proxy = false;
    config
}
