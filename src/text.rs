//! Pure string helpers: line wrapping, sentence splitting and cleanup.
//!
//! Nothing in here allocates more than the result it returns or touches any
//! state; every function is safe to call from any thread.

use regex::Regex;
use std::sync::LazyLock;

// A sentence is a run of non-terminators followed by one or more terminators.
static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("sentence pattern is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Wrap `text` into lines no longer than `max_width` characters.
///
/// Words are separated by single spaces and packed greedily. A word that is
/// longer than `max_width` on its own is emitted as its own line, unmodified.
///
/// ```
/// let lines = newsreel::text::wrap_text("hello world", 50);
/// assert_eq!(lines, vec!["hello world"]);
/// ```
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate_len = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if candidate_len > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push_str(word);
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Split `text` into sentences ending in `.`, `!` or `?`.
///
/// Returned slices are untrimmed. Edge cases:
/// - empty text yields no sentences;
/// - text without any terminator, including whitespace-only text, yields the
///   whole text as one sentence;
/// - trailing text after the last terminator is dropped when at least one
///   sentence was found.
pub fn split_sentences(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }

    let sentences: Vec<&str> = SENTENCE.find_iter(text).map(|m| m.as_str()).collect();
    if sentences.is_empty() {
        vec![text]
    } else {
        sentences
    }
}

/// Collapse every run of whitespace (newlines included) into one space and
/// trim the ends. All-whitespace input becomes the empty string.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Return the prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Escape text for safe inclusion in HTML element content or attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
