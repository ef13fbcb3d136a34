//! Per-frame timing windows on the animation loop

use crate::frames::{total_duration, Frame};

/// Where a frame sits on the loop, in percent of the total duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameWindow {
    pub index: usize,
    pub start_percent: f64,
    pub end_percent: f64,
}

impl FrameWindow {
    pub fn span(&self) -> f64 {
        self.end_percent - self.start_percent
    }
}

/// Compute the window of every frame from the cumulative durations.
///
/// Callers must ensure the total duration is positive; with a single frame
/// the window is `[0, 100]`.
pub fn timeline(frames: &[Frame]) -> Vec<FrameWindow> {
    let total = total_duration(frames);
    let mut current = 0.0;
    let mut windows = Vec::with_capacity(frames.len());

    for (index, frame) in frames.iter().enumerate() {
        let start_percent = current / total * 100.0;
        let end_percent = (current + frame.duration) / total * 100.0;
        windows.push(FrameWindow {
            index,
            start_percent,
            end_percent,
        });
        current += frame.duration;
    }

    windows
}
