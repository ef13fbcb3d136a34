//! Newsreel
//!
//! Turns a news article URL or a piece of literal text into a self-contained,
//! animated HTML document that plays like a slideshow video. The document is
//! handed back as a `data:text/html;base64,...` URI that any browser (or an
//! `<iframe>`) can play without further network access.
//!
//! # Pipeline
//!
//! - **Content extraction** ([`extract`]): fetch a page through an
//!   [`HttpFetcher`](extract::HttpFetcher) and strip it down to title +
//!   paragraph text
//! - **Frame building** ([`frames`]): split text into timed sentence frames
//! - **Rendering** ([`rendering`]): emit CSS keyframe animations whose stops
//!   are derived from the frame durations
//! - **Request handling** ([`handler`]): JSON in, data URI out
//!
//! # Example
//!
//! ```
//! use newsreel::{frames::build_frames, rendering::render, VideoConfig};
//!
//! # fn main() -> newsreel::Result<()> {
//! let config = VideoConfig::default();
//! let frames = build_frames("Markets rallied. Analysts were surprised!", &config);
//! let document = render(&frames, &config)?;
//! assert_eq!(document.frame_count, 2);
//! assert!(document.to_data_uri().starts_with("data:text/html;base64,"));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

pub mod error;
pub use error::{Error, FetchError, Result};

pub mod text;

pub mod frames;
pub use frames::Frame;

pub mod extract;

pub mod rendering;
pub use rendering::Document;

pub mod handler;
pub use handler::{GenerateRequest, VideoGenerator};

// HTTP server exposing the generator and the submission form
pub mod server;

// Async-friendly facade (worker-thread backed)
pub mod async_api;
pub use async_api::VideoService;

/// Configuration for fetching, framing and rendering
///
/// The defaults reproduce the classic newsreel look: a desktop browser user
/// agent with a 10 second fetch timeout, up to ten 3-second sentence frames,
/// lines wrapped at 50 characters on a 1920x1080 canvas.
///
/// # Examples
///
/// ```
/// let cfg = newsreel::VideoConfig::default();
/// assert_eq!(cfg.timeout_ms, 10_000);
/// assert!(cfg.user_agent.starts_with("Mozilla/5.0"));
/// ```
#[derive(Debug, Clone)]
pub struct VideoConfig {
    /// User agent string sent with article requests
    pub user_agent: String,
    /// Timeout for article fetches in milliseconds
    pub timeout_ms: u64,
    /// Extra HTTP headers sent with article requests
    pub headers: HashMap<String, String>,
    /// Canvas dimensions of the generated document
    pub viewport: Viewport,
    /// Maximum characters per displayed line
    pub max_line_width: usize,
    /// Maximum number of frames built from one text
    pub max_frames: usize,
    /// Display time of each sentence frame, in seconds
    pub frame_duration_secs: f64,
    /// Display time of the synthesized frame used when no sentence is found
    pub fallback_duration_secs: f64,
    /// Characters kept in the synthesized fallback frame
    pub fallback_chars: usize,
    /// Characters kept from an extracted article
    pub max_content_chars: usize,
    /// Paragraphs must be strictly longer than this to be kept
    pub min_paragraph_chars: usize,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            timeout_ms: 10_000,
            headers: HashMap::new(),
            viewport: Viewport::default(),
            max_line_width: 50,
            max_frames: 10,
            frame_duration_secs: 3.0,
            fallback_duration_secs: 5.0,
            fallback_chars: 200,
            max_content_chars: 1000,
            min_paragraph_chars: 30,
        }
    }
}

impl VideoConfig {
    /// Check that every limit and duration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(Error::ConfigError("timeout_ms must be positive".into()));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(Error::ConfigError(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if self.max_line_width == 0 {
            return Err(Error::ConfigError("max_line_width must be positive".into()));
        }
        if self.max_frames == 0 {
            return Err(Error::ConfigError("max_frames must be positive".into()));
        }
        for (name, secs) in [
            ("frame_duration_secs", self.frame_duration_secs),
            ("fallback_duration_secs", self.fallback_duration_secs),
        ] {
            if !(secs.is_finite() && secs > 0.0) {
                return Err(Error::ConfigError(format!(
                    "{} must be a positive number of seconds, got {}",
                    name, secs
                )));
            }
        }
        Ok(())
    }
}

/// Canvas dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VideoConfig::default();
        assert_eq!(config.viewport.width, 1920);
        assert_eq!(config.viewport.height, 1080);
        assert_eq!(config.max_frames, 10);
        assert_eq!(config.frame_duration_secs, 3.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = VideoConfig {
            frame_duration_secs: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

        let config = VideoConfig {
            viewport: Viewport { width: 0, height: 1080 },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

        let config = VideoConfig {
            fallback_duration_secs: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
