//! Integration tests serving doubles over real HTTP.
//!
//! Each test binds port 0 and speaks HTTP/1.1 over a plain `TcpStream`.

#![cfg(feature = "server")]

use http_doubles::{Double, DoubleRegistry, DoubleServer, RegistryApi, ServerConfig};
use serde_json::json;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;

fn start(registry: &Arc<DoubleRegistry>) -> DoubleServer {
    DoubleServer::start(registry.clone(), &ServerConfig::default().with_port(0))
        .expect("start server")
}

fn send(addr: SocketAddr, method: &str, target: &str) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect");
    write!(
        stream,
        "{method} {target} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"
    )
    .expect("write request");

    let mut raw = String::new();
    stream.read_to_string(&mut raw).expect("read response");
    raw
}

fn status_line(raw: &str) -> &str {
    raw.lines().next().unwrap_or_default()
}

#[test]
fn test_unknown_request_gets_404() {
    let registry = Arc::new(DoubleRegistry::new());
    let server = start(&registry);

    let raw = send(server.local_addr(), "GET", "/bad-url");

    assert!(status_line(&raw).starts_with("HTTP/1.1 404"), "{raw}");
    assert_eq!(registry.last_response(), Some(json!({ "status": 404 })));
}

#[test]
fn test_registered_double_is_served() {
    let registry = Arc::new(DoubleRegistry::new());
    registry.register(
        Double::builder()
            .method("GET")
            .url("/some-example")
            .status(200)
            .content(json!({ "size": 42, "hasStuff": true }))
            .build()
            .unwrap(),
    );
    let server = start(&registry);

    let raw = send(server.local_addr(), "GET", "/some-example");

    assert!(status_line(&raw).starts_with("HTTP/1.1 200"), "{raw}");
    assert!(raw.contains(r#"{"hasStuff":true,"size":42}"#), "{raw}");
}

#[test]
fn test_redirect_and_method_dispatch() {
    let registry = Arc::new(DoubleRegistry::new());
    registry.register(
        Double::builder()
            .method("POST")
            .url("/moved")
            .status(301)
            .redirect_url("/new-home")
            .build()
            .unwrap(),
    );
    let server = start(&registry);

    let raw = send(server.local_addr(), "POST", "/moved");
    assert!(status_line(&raw).starts_with("HTTP/1.1 301"), "{raw}");
    assert!(raw.to_ascii_lowercase().contains("location: /new-home"), "{raw}");

    let raw = send(server.local_addr(), "GET", "/moved");
    assert!(status_line(&raw).starts_with("HTTP/1.1 404"), "{raw}");
}

#[test]
fn test_unregister_while_serving() {
    let registry = Arc::new(DoubleRegistry::new());
    registry.register(
        Double::builder()
            .method("GET")
            .url("/temporary")
            .status(200)
            .build()
            .unwrap(),
    );
    let server = start(&registry);

    let raw = send(server.local_addr(), "GET", "/temporary");
    assert!(status_line(&raw).starts_with("HTTP/1.1 200"), "{raw}");

    registry.unregister_by_url("/temporary");

    let raw = send(server.local_addr(), "GET", "/temporary");
    assert!(status_line(&raw).starts_with("HTTP/1.1 404"), "{raw}");
}

#[test]
fn test_close_waits_for_worker() {
    let registry = Arc::new(DoubleRegistry::new());
    let server = start(&registry);

    let raw = send(server.local_addr(), "GET", "/before-close");
    assert!(status_line(&raw).starts_with("HTTP/1.1 404"), "{raw}");

    server.close();

    // The worker is gone, so nothing resolves through the registry anymore.
    assert_eq!(Arc::strong_count(&registry), 1);
}
