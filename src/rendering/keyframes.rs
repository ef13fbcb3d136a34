//! CSS keyframe emission for frame windows

use super::timeline::FrameWindow;
use std::fmt::Write;

// Distance between a stop and its neighbour on either side of a window edge.
const EDGE_PERCENT: f64 = 0.1;

/// Emit the animation rule and `@keyframes` block for one frame.
///
/// The element is hidden and pushed down before its window, visible and
/// centred inside it, and hidden and pushed up after it.
pub fn frame_animation(window: &FrameWindow, total_duration: f64) -> String {
    let i = window.index;
    // The first frame starts at 0%; a negative stop would void the whole rule.
    let before = (window.start_percent - EDGE_PERCENT).max(0.0);
    let last_visible = window.end_percent - EDGE_PERCENT;

    let mut css = String::new();
    let _ = write!(
        css,
        r#"
      .frame-{i} {{
        animation: fadeInOut-{i} {total}s linear infinite;
      }}

      @keyframes fadeInOut-{i} {{
        0%, {before}% {{
          opacity: 0;
          transform: translateY(20px);
        }}
        {start}% {{
          opacity: 1;
          transform: translateY(0);
        }}
        {last_visible}% {{
          opacity: 1;
          transform: translateY(0);
        }}
        {end}%, 100% {{
          opacity: 0;
          transform: translateY(-20px);
        }}
      }}
"#,
        i = i,
        total = total_duration,
        before = before,
        start = window.start_percent,
        last_visible = last_visible,
        end = window.end_percent,
    );
    css
}
