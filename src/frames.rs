//! Frame building: split text into timed sentence frames.

use crate::text::{split_sentences, truncate_chars};
use crate::VideoConfig;
use serde::{Deserialize, Serialize};

/// A timed unit of displayed text.
///
/// Frames carry no identity beyond their position: order decides both the
/// playback sequence and each frame's offset on the loop timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Text shown while the frame is on screen
    pub text: String,
    /// Seconds on screen, always > 0
    pub duration: f64,
}

impl Frame {
    pub fn new(text: impl Into<String>, duration: f64) -> Self {
        Self {
            text: text.into(),
            duration,
        }
    }
}

/// Split `text` into at most `config.max_frames` sentence frames.
///
/// Each sentence is trimmed and shown for `config.frame_duration_secs`. When
/// `text` has no sentence at all (empty or whitespace-only) a single fallback
/// frame is synthesized from its first `config.fallback_chars` characters and
/// shown for `config.fallback_duration_secs`, so the result is never empty.
pub fn build_frames(text: &str, config: &VideoConfig) -> Vec<Frame> {
    let mut frames: Vec<Frame> = split_sentences(text)
        .into_iter()
        .take(config.max_frames)
        .map(|sentence| Frame::new(sentence.trim(), config.frame_duration_secs))
        .collect();

    if frames.is_empty() {
        frames.push(Frame::new(
            truncate_chars(text, config.fallback_chars),
            config.fallback_duration_secs,
        ));
    }

    frames
}

/// Sum of all frame durations, i.e. the length of one animation loop.
pub fn total_duration(frames: &[Frame]) -> f64 {
    frames.iter().map(|f| f.duration).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_one_frame_per_sentence() {
        let frames = build_frames("One. Two! Three?", &VideoConfig::default());
        let texts: Vec<_> = frames.iter().map(|f| f.text.as_str()).collect();
        let durations: Vec<_> = frames.iter().map(|f| f.duration).collect();
        assert_eq!(texts, vec!["One.", "Two!", "Three?"]);
        assert_eq!(durations, vec![3.0, 3.0, 3.0]);
    }

    #[test]
    fn empty_text_gets_fallback_frame() {
        let frames = build_frames("", &VideoConfig::default());
        assert_eq!(frames, vec![Frame::new("", 5.0)]);
    }

    #[test]
    fn whitespace_text_is_single_empty_frame() {
        let frames = build_frames("   ", &VideoConfig::default());
        assert_eq!(frames, vec![Frame::new("", 3.0)]);
    }

    #[test]
    fn truncates_to_max_frames() {
        let text: String = (1..=15).map(|i| format!("Sentence number {}. ", i)).collect();
        let frames = build_frames(&text, &VideoConfig::default());
        assert_eq!(frames.len(), 10);
        assert_eq!(frames[0].text, "Sentence number 1.");
        assert_eq!(frames[9].text, "Sentence number 10.");
    }

    #[test]
    fn unterminated_text_is_single_frame() {
        let frames = build_frames("Breaking news without a full stop", &VideoConfig::default());
        assert_eq!(frames, vec![Frame::new("Breaking news without a full stop", 3.0)]);
    }

    #[test]
    fn extraction_placeholder_is_one_regular_frame() {
        let frames = build_frames(
            crate::extract::EXTRACTION_PLACEHOLDER,
            &VideoConfig::default(),
        );
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].text, crate::extract::EXTRACTION_PLACEHOLDER);
        assert_eq!(frames[0].duration, 3.0);
    }

    #[test]
    fn respects_configured_limits() {
        let config = VideoConfig {
            max_frames: 2,
            frame_duration_secs: 1.5,
            ..Default::default()
        };
        let frames = build_frames("A. B. C.", &config);
        assert_eq!(frames.len(), 2);
        assert_eq!(total_duration(&frames), 3.0);
    }
}
