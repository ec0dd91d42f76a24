//! HTTP server
//!
//! Runs the [`Router`] behind a tiny_http listener on a background thread.
//! Requests are handled one at a time; nothing is shared between them except
//! the read-only router.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::config::ServerSettings;
use crate::error::{Result, WebError};
use crate::routes::{HttpResponse, Router};

/// Largest request body accepted (the calculator form is a few dozen bytes)
const MAX_BODY_BYTES: u64 = 64 * 1024;

/// How often the serve loop checks for shutdown
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Handle to the running HTTP server.
pub struct ReportServer {
    shutdown: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
    addr: SocketAddr,
}

impl ReportServer {
    /// Bind the listener and start serving on a background thread.
    pub fn start(settings: &ServerSettings, router: Router) -> Result<Self> {
        let requested = settings.socket_addr()?;

        let server = tiny_http::Server::http(requested).map_err(|e| WebError::Bind {
            addr: requested.to_string(),
            message: e.to_string(),
        })?;

        // Port 0 binds an ephemeral port; report the real one
        let addr = server.server_addr().to_ip().unwrap_or(requested);
        info!(addr = %addr, "footprint server started");

        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let thread = thread::Builder::new()
            .name("footprint-http".to_string())
            .spawn(move || {
                serve_loop(server, &router, &shutdown_clone);
            })?;

        Ok(Self {
            shutdown,
            thread: Some(thread),
            addr,
        })
    }

    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for clients, e.g. `http://127.0.0.1:5000`
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Block until the serve loop exits.
    pub fn wait(mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }

    /// Shut down the server.
    pub fn shutdown(mut self) {
        self.stop();
        info!("footprint server stopped");
    }

    fn stop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ReportServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Main serve loop: accept requests and answer them in order.
fn serve_loop(server: tiny_http::Server, router: &Router, shutdown: &AtomicBool) {
    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }

        // Accept with timeout so we can check shutdown flag
        let request = match server.recv_timeout(POLL_INTERVAL) {
            Ok(Some(req)) => req,
            Ok(None) => continue,
            Err(e) => {
                if !shutdown.load(Ordering::SeqCst) {
                    error!(error = %e, "accept error");
                }
                break;
            }
        };

        handle_request(request, router);
    }
}

fn handle_request(mut request: tiny_http::Request, router: &Router) {
    let started = Instant::now();
    let method = request.method().as_str().to_string();
    let url = request.url().to_string();
    debug!(method = %method, url = %url, "request");

    let declared_too_large = request
        .body_length()
        .is_some_and(|len| len as u64 > MAX_BODY_BYTES);

    let response = if declared_too_large {
        body_too_large()
    } else {
        match read_body(request.as_reader(), MAX_BODY_BYTES) {
            Ok(Some(body)) => router.handle(&method, &url, &body),
            Ok(None) => body_too_large(),
            Err(e) => {
                warn!(error = %e, "failed to read request body");
                HttpResponse::text(400, "Unreadable request body")
            }
        }
    };

    let status = response.status;
    let bytes = response.body.len() as u64;
    if let Err(e) = request.respond(to_tiny_response(response)) {
        warn!(error = %e, "failed to send response");
    }

    info!(
        method = %method,
        url = %url,
        status,
        bytes,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "handled request"
    );
}

/// Read a request body of at most `limit` bytes
///
/// Returns `None` when the body is longer than the limit.
fn read_body(reader: impl Read, limit: u64) -> std::io::Result<Option<Vec<u8>>> {
    let mut body = Vec::new();
    reader.take(limit + 1).read_to_end(&mut body)?;
    if body.len() as u64 > limit {
        Ok(None)
    } else {
        Ok(Some(body))
    }
}

fn body_too_large() -> HttpResponse {
    warn!(limit = MAX_BODY_BYTES, "request body too large");
    HttpResponse::text(413, "Request body too large")
}

fn to_tiny_response(response: HttpResponse) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let disposition = response.content_disposition();
    let mut tiny = tiny_http::Response::from_data(response.body).with_status_code(response.status);

    if let Some(h) = header("Content-Type", response.content_type) {
        tiny.add_header(h);
    }
    if let Some(h) = disposition.as_deref().and_then(|value| header("Content-Disposition", value)) {
        tiny.add_header(h);
    }
    tiny
}

fn header(name: &str, value: &str) -> Option<tiny_http::Header> {
    tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}
