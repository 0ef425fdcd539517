//! Utility functions for monospace text measurement, padding and wrapping.
//!
//! Widths are display columns, not bytes or chars: CJK and other wide
//! characters count as 2.

use console::{pad_str, Alignment};
use unicode_width::UnicodeWidthStr;

use crate::types::Align;

/// Returns the display width of a string.
///
/// # Example
///
/// ```rust
/// use plaintab::display_width;
///
/// assert_eq!(display_width("hello"), 5);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Pads a string on the left (right-aligns) to reach the target width.
///
/// Strings wider than `width` are returned unchanged.
pub fn pad_left(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Right, None).into_owned()
}

/// Pads a string on the right (left-aligns) to reach the target width.
pub fn pad_right(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Left, None).into_owned()
}

/// Pads a string on both sides (centers) to reach the target width.
///
/// When the remaining space is odd, the extra space goes on the right.
pub fn pad_center(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Center, None).into_owned()
}

/// Justify `s` within `width` columns.
pub fn justify(s: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => pad_right(s, width),
        Align::Right => pad_left(s, width),
        Align::Center => pad_center(s, width),
    }
}

/// Greedy word-wrap.
///
/// Words are packed onto a line until the next one would exceed `width`.
/// A word wider than `width` gets a line of its own and overflows it. Runs
/// of whitespace collapse to a single space. Text with no words wraps to a
/// single empty line, so every cell prints at least one line.
///
/// # Example
///
/// ```rust
/// use plaintab::wrap;
///
/// assert_eq!(wrap("hello world foo bar", 11), vec!["hello world", "foo bar"]);
/// assert_eq!(wrap("   ", 5), vec![""]);
/// ```
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = display_width(word);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split `text` on `marker` and wrap every part independently.
///
/// An absent or empty marker, or one that does not occur in the text, wraps
/// the whole text as a single part.
pub fn wrap_parts(text: &str, width: usize, marker: Option<&str>) -> Vec<String> {
    parts(text, marker)
        .flat_map(|part| wrap(part, width))
        .collect()
}

/// Width the text needs to print without wrapping: the widest part after
/// whitespace is collapsed.
pub fn content_width(text: &str, marker: Option<&str>) -> usize {
    parts(text, marker)
        .map(|part| {
            let words: Vec<&str> = part.split_whitespace().collect();
            let gaps = words.len().saturating_sub(1);
            words.iter().map(|w| display_width(w)).sum::<usize>() + gaps
        })
        .max()
        .unwrap_or(0)
}

fn parts<'a>(text: &'a str, marker: Option<&'a str>) -> Box<dyn Iterator<Item = &'a str> + 'a> {
    match marker {
        Some(m) if !m.is_empty() => Box::new(text.split(m)),
        _ => Box::new(std::iter::once(text)),
    }
}
