//! Basic usage example for http-doubles.
//!
//! Demonstrates:
//! - Registering doubles built with the builder and loaded from JSON
//! - Resolving requests, including the 404 fallback
//! - Replacing a double and removing doubles by url
//! - Reading the diagnostic message
//!
//! Run with: `cargo run --example basic_usage`

use http_doubles::{Double, DoubleRegistry, RegistryApi};
use serde_json::json;

fn main() {
    println!("=== http-doubles: Basic Usage ===\n");

    let registry = DoubleRegistry::new();

    // -------------------------------------------------------------------------
    // 1. Register doubles
    // -------------------------------------------------------------------------
    println!("1. Registering doubles...");

    registry.register(
        Double::builder()
            .method("GET")
            .url("/some-example")
            .status(200)
            .content(json!({ "size": 42, "hasStuff": true }))
            .build()
            .expect("complete double"),
    );

    registry
        .register_json(json!({
            "request": { "method": "POST", "url": "/some-example" },
            "response": { "status": 201 }
        }))
        .expect("complete double");

    println!("   Registered: GET /some-example, POST /some-example");

    // -------------------------------------------------------------------------
    // 2. Resolve requests
    // -------------------------------------------------------------------------
    println!("\n2. Resolving requests...");

    println!("   GET  /some-example -> {}", registry.resolve("GET", "/some-example"));
    println!("   POST /some-example -> {}", registry.resolve("POST", "/some-example"));
    println!("   GET  /nope         -> {}", registry.resolve("GET", "/nope"));

    // -------------------------------------------------------------------------
    // 3. Replace a double
    // -------------------------------------------------------------------------
    println!("\n3. Replacing GET /some-example with a redirect...");

    registry.register(
        Double::builder()
            .method("GET")
            .url("/some-example")
            .status(301)
            .redirect_url("/301-example")
            .build()
            .expect("complete double"),
    );

    println!("   GET  /some-example -> {}", registry.resolve("GET", "/some-example"));
    println!("   Doubles stored: {}", registry.len());

    // -------------------------------------------------------------------------
    // 4. Rejected doubles
    // -------------------------------------------------------------------------
    println!("\n4. Registering an incomplete double...");

    if let Err(err) = registry.register_json(json!({ "request": { "method": "GET", "url": "/x" } })) {
        println!("   Rejected: {err}");
    }

    // -------------------------------------------------------------------------
    // 5. Remove by url
    // -------------------------------------------------------------------------
    println!("\n5. Removing doubles by url...");

    registry.unregister_by_url("/some-example");
    println!("   /some-example registered: {}", registry.is_registered("/some-example"));

    registry.unregister_by_url("/some-example");
    println!("   Second removal message: {:?}", registry.message());

    println!("\n=== Done ===");
}
