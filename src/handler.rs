//! Request handling: JSON request in, encoded video document out.

use crate::extract::{ContentExtractor, HtmlParser, HttpFetcher, ScraperParser};
use crate::frames::build_frames;
use crate::rendering::{render, Document};
use crate::{Error, Result, VideoConfig};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Body of a generation request. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,
}

impl GenerateRequest {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            news_url: Some(url.into()),
            custom_text: None,
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            news_url: None,
            custom_text: Some(text.into()),
        }
    }
}

/// Successful response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub video_data: String,
}

/// Error response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Status code plus serialized JSON body, ready to put on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: String,
}

impl HandlerResponse {
    fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self { status, body },
            Err(e) => Self {
                status: 500,
                body: format!(r#"{{"error":"failed to serialize response: {}"}}"#, e),
            },
        }
    }

    pub fn from_error(err: &Error) -> Self {
        Self::json(
            err.status_code(),
            &ErrorResponse {
                error: err.to_string(),
            },
        )
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Orchestrates extraction, frame building and rendering.
///
/// Holds no per-request state, so one generator can be shared by many
/// threads at once.
pub struct VideoGenerator<F, P = ScraperParser> {
    config: VideoConfig,
    extractor: ContentExtractor<F, P>,
}

#[cfg(feature = "fetch")]
impl VideoGenerator<crate::extract::ReqwestFetcher> {
    /// Generator backed by a real HTTP client.
    pub fn from_config(config: VideoConfig) -> Result<Self> {
        config.validate()?;
        let extractor = ContentExtractor::from_config(&config)?;
        Ok(Self { config, extractor })
    }
}

impl<F: HttpFetcher> VideoGenerator<F> {
    pub fn new(fetcher: F, config: VideoConfig) -> Self {
        let extractor = ContentExtractor::new(fetcher, &config);
        Self { config, extractor }
    }
}

impl<F: HttpFetcher, P: HtmlParser> VideoGenerator<F, P> {
    pub fn with_extractor(extractor: ContentExtractor<F, P>, config: VideoConfig) -> Self {
        Self { config, extractor }
    }

    pub fn config(&self) -> &VideoConfig {
        &self.config
    }

    pub fn extractor(&self) -> &ContentExtractor<F, P> {
        &self.extractor
    }

    /// Resolve the request to its text content, fetching when a URL is given.
    pub fn content_for(&self, request: &GenerateRequest) -> Result<String> {
        if let Some(url) = non_empty(&request.news_url) {
            self.extractor.extract(url)
        } else if let Some(text) = non_empty(&request.custom_text) {
            Ok(text.to_string())
        } else {
            Err(Error::MissingInput)
        }
    }

    /// Build the video document for `request`.
    pub fn generate(&self, request: &GenerateRequest) -> Result<Document> {
        let content = self.content_for(request)?;
        let frames = build_frames(&content, &self.config);
        debug!(
            "built {} frames from {} chars of content",
            frames.len(),
            content.chars().count()
        );
        render(&frames, &self.config)
    }

    /// Handle a raw JSON request body.
    ///
    /// Returns 200 with `{"videoData": ...}`, 400 with `{"error": ...}` for
    /// missing or malformed input, and 500 with `{"error": ...}` when
    /// extraction or rendering fails.
    pub fn handle_json(&self, body: &[u8]) -> HandlerResponse {
        let request: GenerateRequest = match serde_json::from_slice(body) {
            Ok(r) => r,
            Err(e) => return HandlerResponse::from_error(&Error::InvalidRequest(e.to_string())),
        };

        match self.generate(&request) {
            Ok(doc) => HandlerResponse::json(
                200,
                &GenerateResponse {
                    video_data: doc.to_data_uri(),
                },
            ),
            Err(err) => {
                if err.status_code() >= 500 {
                    warn!("Error generating video: {}", err);
                }
                HandlerResponse::from_error(&err)
            }
        }
    }
}
