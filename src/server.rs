//! A minimal HTTP front for a registry, built on `tiny_http`.
//!
//! The server hands the request method and the raw request-target to
//! [`RegistryApi::resolve`] and writes the returned response back. It reads
//! three fields of the response, all optional:
//!
//! - `status`: the status code (200 when absent, 500 when not a valid code)
//! - `redirectURL`: sent as `Location` when non-empty
//! - `content`: the body; strings are sent as text, anything else as JSON

use std::fmt;
use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serde_json::Value;
use tiny_http::{Header, Response, Server};

use crate::{RegistryApi, ServerConfig};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}")]
    Bind {
        addr: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("listener on {0} is not an IP socket")]
    NotIp(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A running server answering requests from a registry.
///
/// The listener stops when [`close`](DoubleServer::close) is called or the
/// value is dropped.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use http_doubles::{DoubleRegistry, DoubleServer, ServerConfig};
///
/// let registry = Arc::new(DoubleRegistry::new());
/// let server = DoubleServer::start(registry, &ServerConfig::default()).unwrap();
/// println!("serving doubles on http://{}", server.local_addr());
/// server.close();
/// ```
pub struct DoubleServer {
    server: Arc<Server>,
    addr: SocketAddr,
    closing: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl DoubleServer {
    /// Binds `config.addr()` and starts answering on a background thread.
    ///
    /// # Errors
    ///
    /// - [`ServerError::Bind`] if the address cannot be bound
    /// - [`ServerError::Io`] if the worker thread cannot be spawned
    pub fn start<R>(registry: Arc<R>, config: &ServerConfig) -> Result<Self, ServerError>
    where
        R: RegistryApi + Send + Sync + 'static,
    {
        let addr = config.addr();
        let server = Server::http(&addr).map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
        let local = server
            .server_addr()
            .to_ip()
            .ok_or_else(|| ServerError::NotIp(addr.clone()))?;

        let server = Arc::new(server);
        let closing = Arc::new(AtomicBool::new(false));

        let worker = {
            let server = server.clone();
            let closing = closing.clone();
            thread::Builder::new()
                .name("http-doubles".to_string())
                .spawn(move || serve(&server, &*registry, &closing))?
        };

        tracing::info!(addr = %local, "serving doubles");

        Ok(Self {
            server,
            addr: local,
            closing,
            worker: Some(worker),
        })
    }

    /// The bound address; useful when the configured port was `0`.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stops listening and waits for the worker thread to finish.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        self.closing.store(true, Ordering::SeqCst);
        self.server.unblock();

        if worker.join().is_err() {
            tracing::warn!(addr = %self.addr, "double server worker panicked");
        }
        tracing::info!(addr = %self.addr, "stopped serving doubles");
    }
}

impl fmt::Debug for DoubleServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoubleServer")
            .field("addr", &self.addr)
            .field("running", &self.worker.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for DoubleServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn serve(server: &Server, registry: &impl RegistryApi, closing: &AtomicBool) {
    loop {
        let request = match server.recv() {
            Ok(request) => request,
            Err(_) if closing.load(Ordering::SeqCst) => break,
            Err(err) => {
                tracing::warn!(%err, "failed to accept request");
                continue;
            }
        };

        let method = request.method().to_string();
        let response = registry.resolve(&method, request.url());

        if let Err(err) = request.respond(encode(&response)) {
            tracing::warn!(%err, %method, "failed to send response");
        }
    }
}

fn encode(response: &Value) -> Response<Cursor<Vec<u8>>> {
    let status = match response.get("status") {
        None => 200,
        Some(status) => status
            .as_u64()
            .and_then(|code| u16::try_from(code).ok())
            .filter(|code| (100..=999).contains(code))
            .unwrap_or(500),
    };

    let (body, content_type) = match response.get("content") {
        None | Some(Value::Null) => (Vec::new(), None),
        Some(Value::String(text)) => (text.clone().into_bytes(), Some("text/plain; charset=utf-8")),
        Some(content) => (content.to_string().into_bytes(), Some("application/json")),
    };

    let mut encoded = Response::from_data(body).with_status_code(status);

    if let Some(content_type) = content_type {
        add_header(&mut encoded, "Content-Type", content_type);
    }
    if let Some(location) = response
        .get("redirectURL")
        .and_then(Value::as_str)
        .filter(|location| !location.is_empty())
    {
        add_header(&mut encoded, "Location", location);
    }

    encoded
}

fn add_header(response: &mut Response<Cursor<Vec<u8>>>, name: &str, value: &str) {
    match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
        Ok(header) => response.add_header(header),
        Err(()) => tracing::warn!(name, value, "dropping invalid response header"),
    }
}
