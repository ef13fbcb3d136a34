//! Fetch capability: URL -> raw response body.

use crate::error::FetchError;
#[cfg(feature = "fetch")]
use crate::{Error, Result, VideoConfig};
use std::collections::HashMap;
use std::sync::Mutex;

/// Something that can GET a URL and hand back its body as text.
///
/// Implementations must treat non-2xx responses as failures. They are shared
/// across server workers, hence `Send + Sync`.
pub trait HttpFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> std::result::Result<String, FetchError>;
}

impl<F: HttpFetcher + ?Sized> HttpFetcher for Box<F> {
    fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        (**self).fetch(url)
    }
}

impl<F: HttpFetcher + ?Sized> HttpFetcher for std::sync::Arc<F> {
    fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        (**self).fetch(url)
    }
}

/// Blocking reqwest-backed fetcher with a browser-like user agent.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::blocking::Client,
    user_agent: String,
    headers: HashMap<String, String>,
    timeout_ms: u64,
}

#[cfg(feature = "fetch")]
impl ReqwestFetcher {
    /// Build a client honouring the configured timeout, user agent and headers.
    ///
    /// The blocking client owns an internal runtime, so it must be created
    /// and dropped outside of any async context.
    pub fn new(config: &VideoConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                Error::InitializationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            headers: config.headers.clone(),
            timeout_ms: config.timeout_ms,
        })
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout_ms)
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

#[cfg(feature = "fetch")]
impl HttpFetcher for ReqwestFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, self.user_agent.clone());
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let resp = request.send().map_err(|e| self.classify(e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        resp.text().map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout_ms)
            } else {
                FetchError::Body(e.to_string())
            }
        })
    }
}

/// In-memory fetcher serving canned responses.
///
/// Unknown URLs answer 404. Every call is recorded so tests can assert that
/// a code path never reached the network.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, std::result::Result<String, FetchError>>,
    calls: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Ok(body.into()));
        self
    }

    /// Fail requests for `url` with `err`.
    pub fn with_error(mut self, url: impl Into<String>, err: FetchError) -> Self {
        self.pages.insert(url.into(), Err(err));
        self
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl HttpFetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }
        self.pages
            .get(url)
            .cloned()
            .unwrap_or(Err(FetchError::Status(404)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_fetcher_serves_and_records() {
        let fetcher = StaticFetcher::new()
            .with_page("https://news.test/a", "<p>hi</p>")
            .with_error("https://news.test/slow", FetchError::Timeout(10));

        assert_eq!(fetcher.fetch("https://news.test/a").unwrap(), "<p>hi</p>");
        assert_eq!(
            fetcher.fetch("https://news.test/slow"),
            Err(FetchError::Timeout(10))
        );
        assert_eq!(
            fetcher.fetch("https://news.test/missing"),
            Err(FetchError::Status(404))
        );
        assert_eq!(fetcher.calls().len(), 3);
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn reqwest_fetcher_reads_body_and_rejects_errors() {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr();

        std::thread::spawn(move || {
            for request in server.incoming_requests().take(2) {
                let ua = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("User-Agent"))
                    .map(|h| h.value.to_string())
                    .unwrap_or_default();
                let response = if request.url() == "/ok" {
                    tiny_http::Response::from_string(format!("<p>{}</p>", ua))
                } else {
                    tiny_http::Response::from_string("gone").with_status_code(410)
                };
                let _ = request.respond(response);
            }
        });

        let fetcher = ReqwestFetcher::new(&VideoConfig::default()).unwrap();
        let body = fetcher.fetch(&format!("http://{}/ok", addr)).unwrap();
        assert!(body.contains("Mozilla/5.0"));

        let err = fetcher.fetch(&format!("http://{}/gone", addr)).unwrap_err();
        assert_eq!(err, FetchError::Status(410));
    }
}
