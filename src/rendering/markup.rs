//! HTML markup for frames and the surrounding document

use crate::frames::Frame;
use crate::text::{escape_html, wrap_text};
use crate::Viewport;

/// One `.frame` block holding the wrapped, escaped lines of `frame`.
pub fn frame_block(index: usize, frame: &Frame, max_line_width: usize) -> String {
    let lines: String = wrap_text(&frame.text, max_line_width)
        .iter()
        .map(|line| format!(r#"<div class="line">{}</div>"#, escape_html(line)))
        .collect();

    format!(
        r#"
      <div class="frame frame-{index}">
        {lines}
      </div>
"#
    )
}

/// Wrap frame blocks and animation CSS into a standalone HTML5 document.
pub fn document(viewport: Viewport, animations: &str, frames_html: &str) -> String {
    let width = viewport.width;
    let height = viewport.height;
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>
    body {{
      margin: 0;
      padding: 0;
      width: {width}px;
      height: {height}px;
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      display: flex;
      align-items: center;
      justify-content: center;
      font-family: Arial, sans-serif;
      overflow: hidden;
    }}

    .container {{
      width: 100%;
      height: 100%;
      display: flex;
      align-items: center;
      justify-content: center;
      position: relative;
    }}

    .frame {{
      position: absolute;
      text-align: center;
      color: white;
      font-size: 72px;
      font-weight: bold;
      text-shadow: 3px 3px 6px rgba(0, 0, 0, 0.5);
      padding: 60px;
      max-width: 90%;
      opacity: 0;
    }}

    .line {{
      margin: 20px 0;
    }}
{animations}
  </style>
</head>
<body>
  <div class="container">
{frames_html}
  </div>
</body>
</html>
"#
    )
}
