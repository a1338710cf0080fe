//! Serves doubles loaded from a JSON file over HTTP.
//!
//! The file holds an array of `{ "request": {...}, "response": {...} }` objects.
//! An optional second argument overrides the port (default 8001).
//!
//! Run with: `cargo run --example serve_doubles -- doubles.json 8002`

use std::sync::Arc;
use std::{env, fs, io};

use http_doubles::{Double, DoubleRegistry, DoubleServer, RegistryApi, ServerConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let path = args.next().ok_or("usage: serve_doubles <doubles.json> [port]")?;

    let mut config = ServerConfig::default();
    if let Some(port) = args.next() {
        config = config.with_port(port.parse()?);
    }

    let text = fs::read_to_string(&path)?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&text)?;

    let registry = Arc::new(DoubleRegistry::new());
    for value in values {
        let double = Double::try_from(value)?;
        println!("{} {}", double.method(), double.url());
        registry.register(double);
    }

    let server = DoubleServer::start(registry, &config)?;
    println!("Serving doubles on http://{} (press Enter to stop)", server.local_addr());

    io::stdin().read_line(&mut String::new())?;
    server.close();

    Ok(())
}
