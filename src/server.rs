//! HTTP server exposing the generator and the submission form.
//!
//! A single `tiny_http` listener is shared by a fixed pool of worker threads.
//! Each worker pulls one request at a time and answers it synchronously; the
//! only blocking call inside a request is the article fetch.

use crate::extract::{HtmlParser, HttpFetcher};
use crate::handler::{ErrorResponse, HandlerResponse, VideoGenerator};
use crate::{Error, Result};
use log::{debug, error, info, warn};
use std::io::Read;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tiny_http::{Header, Method, Request, Response};

/// The submission form served at `/`.
pub const FORM_PAGE: &str = include_str!("form.html");

/// Path of the generation endpoint.
pub const GENERATE_PATH: &str = "/api/generate-video";

// How often idle workers wake up to check for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind, e.g. `127.0.0.1:3000` (port 0 picks a free port)
    pub addr: String,
    /// Number of worker threads
    pub workers: usize,
    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            workers: num_cpus::get(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Handle to a running server.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl ServerHandle {
    /// Address the listener is bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL of the server, e.g. `http://127.0.0.1:3000`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop accepting requests and wait for in-flight ones to finish.
    pub fn shutdown(self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.join();
    }

    /// Block until every worker exits.
    pub fn join(self) {
        for handle in self.workers {
            if handle.join().is_err() {
                error!("server worker panicked");
            }
        }
    }
}

/// Bind the listener and start the worker pool.
pub fn spawn<F, P>(config: ServerConfig, generator: VideoGenerator<F, P>) -> Result<ServerHandle>
where
    F: HttpFetcher + 'static,
    P: HtmlParser + 'static,
{
    if config.workers == 0 {
        return Err(Error::ConfigError("workers must be positive".into()));
    }

    let server = tiny_http::Server::http(config.addr.as_str()).map_err(|e| {
        Error::InitializationError(format!("Failed to bind {}: {}", config.addr, e))
    })?;
    let addr = server.server_addr().to_ip().ok_or_else(|| {
        Error::InitializationError(format!("{} is not an IP listener", config.addr))
    })?;

    let server = Arc::new(server);
    let generator = Arc::new(generator);
    let shutdown = Arc::new(AtomicBool::new(false));
    let max_body = config.max_body_bytes;

    let workers = (0..config.workers)
        .map(|id| {
            let server = Arc::clone(&server);
            let generator = Arc::clone(&generator);
            let shutdown = Arc::clone(&shutdown);
            std::thread::Builder::new()
                .name(format!("newsreel-worker-{}", id))
                .spawn(move || {
                    while !shutdown.load(Ordering::SeqCst) {
                        match server.recv_timeout(POLL_INTERVAL) {
                            Ok(Some(request)) => handle_request(request, &generator, max_body),
                            Ok(None) => {}
                            Err(e) => {
                                warn!("worker {} failed to receive request: {}", id, e);
                                break;
                            }
                        }
                    }
                    debug!("worker {} stopped", id);
                })
                .map_err(|e| Error::InitializationError(format!("Failed to spawn worker: {}", e)))
        })
        .collect::<Result<Vec<_>>>()?;

    info!("listening on http://{} with {} workers", addr, config.workers);

    Ok(ServerHandle {
        addr,
        shutdown,
        workers,
    })
}

/// Run the server on the current thread until every worker exits.
pub fn serve<F, P>(config: ServerConfig, generator: VideoGenerator<F, P>) -> Result<()>
where
    F: HttpFetcher + 'static,
    P: HtmlParser + 'static,
{
    spawn(config, generator)?.join();
    Ok(())
}

fn header(name: &str, value: &str) -> Option<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}

fn respond(request: Request, status: u16, content_type: &str, body: String) {
    let mut response = Response::from_data(body.into_bytes()).with_status_code(status);
    if let Some(h) = header("Content-Type", content_type) {
        response = response.with_header(h);
    }
    if let Err(e) = request.respond(response) {
        warn!("failed to send response: {}", e);
    }
}

fn respond_json(request: Request, resp: HandlerResponse) {
    respond(request, resp.status, "application/json", resp.body);
}

fn json_error(status: u16, message: &str) -> HandlerResponse {
    let body = serde_json::to_string(&ErrorResponse {
        error: message.to_string(),
    })
    .unwrap_or_else(|_| r#"{"error":"internal error"}"#.to_string());
    HandlerResponse { status, body }
}

fn read_body(request: &mut Request, max_body: usize) -> std::result::Result<Vec<u8>, HandlerResponse> {
    if request.body_length().is_some_and(|len| len > max_body) {
        return Err(json_error(413, "Request body too large"));
    }
    let mut body = Vec::new();
    Read::take(request.as_reader(), max_body as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| json_error(400, &format!("Failed to read request body: {}", e)))?;
    if body.len() > max_body {
        return Err(json_error(413, "Request body too large"));
    }
    Ok(body)
}

fn handle_request<F, P>(mut request: Request, generator: &VideoGenerator<F, P>, max_body: usize)
where
    F: HttpFetcher,
    P: HtmlParser,
{
    let method = request.method().clone();
    let path = request.url().split('?').next().unwrap_or("/").to_string();

    let status = match (&method, path.as_str()) {
        (Method::Post, GENERATE_PATH) => {
            let resp = match read_body(&mut request, max_body) {
                Ok(body) => generator.handle_json(&body),
                Err(resp) => resp,
            };
            let status = resp.status;
            respond_json(request, resp);
            status
        }
        (Method::Get, "/") => {
            respond(request, 200, "text/html; charset=utf-8", FORM_PAGE.to_string());
            200
        }
        (Method::Get, "/healthz") => {
            respond(request, 200, "application/json", r#"{"status":"ok"}"#.to_string());
            200
        }
        (_, GENERATE_PATH) | (_, "/") | (_, "/healthz") => {
            respond_json(request, json_error(405, "Method not allowed"));
            405
        }
        _ => {
            respond_json(request, json_error(404, "Not found"));
            404
        }
    };

    info!("{} {} -> {}", method, path, status);
}
