//! Rendering: frames -> self-contained animated HTML document.
//!
//! Every frame becomes an absolutely positioned block with its own looping
//! `@keyframes` animation. All animations share the same loop length (the
//! sum of frame durations) and differ only in the window during which their
//! frame is visible, so exactly one frame shows at any time.

pub mod keyframes;
pub mod markup;
pub mod timeline;

pub use timeline::{timeline, FrameWindow};

use crate::frames::{total_duration, Frame};
use crate::{Error, Result, VideoConfig};
use base64::Engine as _;

/// A generated HTML document and its playback metadata.
#[derive(Debug, Clone)]
pub struct Document {
    pub html: String,
    pub frame_count: usize,
    /// Loop length in seconds
    pub total_duration: f64,
}

impl Document {
    /// Encode as a `data:text/html;base64,...` URI.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:text/html;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(self.html.as_bytes())
        )
    }
}

/// Render `frames` into a complete HTML document.
///
/// Fails when `frames` is empty or any duration is not a positive, finite
/// number of seconds, since the timeline would be undefined.
pub fn render(frames: &[Frame], config: &VideoConfig) -> Result<Document> {
    if frames.is_empty() {
        return Err(Error::RenderError("no frames to render".into()));
    }
    if let Some((i, f)) = frames
        .iter()
        .enumerate()
        .find(|(_, f)| !(f.duration.is_finite() && f.duration > 0.0))
    {
        return Err(Error::RenderError(format!(
            "frame {} has invalid duration {}",
            i, f.duration
        )));
    }

    let total = total_duration(frames);
    let windows = timeline(frames);

    let animations: String = windows
        .iter()
        .map(|w| keyframes::frame_animation(w, total))
        .collect();

    let frames_html: String = frames
        .iter()
        .enumerate()
        .map(|(i, f)| markup::frame_block(i, f, config.max_line_width))
        .collect();

    log::debug!(
        "rendered {} frames over a {}s loop",
        frames.len(),
        total
    );

    Ok(Document {
        html: markup::document(config.viewport, &animations, &frames_html),
        frame_count: frames.len(),
        total_duration: total,
    })
}
