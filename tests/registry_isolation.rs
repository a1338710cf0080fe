//! Integration tests for registry isolation and multiple registries.
//!
//! Every `define_registry!` invocation and every `DoubleRegistry` instance owns
//! its own doubles and its own diagnostic slots.

use http_doubles::{define_registry, Double, DoubleRegistry, DoubleRequest, RegistryApi};
use serde_json::json;

fn double(method: &str, url: &str, status: u16) -> Double {
    Double::new(DoubleRequest::new(method, url), json!({ "status": status }))
}

#[test]
fn test_multiple_isolated_registries() {
    define_registry!(payments);
    define_registry!(inventory);

    payments::register(double("GET", "/status", 200));
    inventory::register(double("GET", "/status", 503));

    assert_eq!(payments::resolve("GET", "/status")["status"], 200);
    assert_eq!(inventory::resolve("GET", "/status")["status"], 503);
}

#[test]
fn test_registry_does_not_leak_between_instances() {
    define_registry!(isolated_a);
    define_registry!(isolated_b);

    isolated_a::register(double("GET", "/only-in-a", 200));

    assert!(isolated_a::is_registered("/only-in-a"));
    assert!(!isolated_b::is_registered("/only-in-a"));
    assert_eq!(isolated_b::resolve("GET", "/only-in-a"), json!({ "status": 404 }));
}

#[test]
fn test_diagnostics_are_per_registry() {
    define_registry!(noisy);
    define_registry!(quiet);

    noisy::unregister_by_url("/never-registered");

    assert_eq!(noisy::message(), "Invalid uri: Not registered");
    assert_eq!(quiet::message(), "");
    assert_eq!(quiet::last_response(), None);
}

#[test]
fn test_instances_are_isolated() {
    let first = DoubleRegistry::new();
    let second = DoubleRegistry::new();

    first.register(double("GET", "/x", 200));
    let _ = first.resolve("GET", "/x");

    assert!(second.is_empty());
    assert_eq!(second.last_response(), None);
    assert_eq!(first.last_response(), Some(json!({ "status": 200 })));
}

#[test]
fn test_clear_affects_one_registry() {
    define_registry!(cleared);
    define_registry!(untouched);

    cleared::register(double("GET", "/x", 200));
    untouched::register(double("GET", "/x", 200));

    cleared::clear();

    assert!(cleared::doubles().is_empty());
    assert_eq!(untouched::doubles().len(), 1);
}
