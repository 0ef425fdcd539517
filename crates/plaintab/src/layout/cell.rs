//! The atomic unit of printed text.

use crate::types::Align;
use crate::util::{content_width, justify, wrap_parts};

/// Display columns added per indent level.
pub const INDENT_WIDTH: usize = 2;

/// A piece of text with its presentation attributes.
///
/// The text is fixed at construction. Width, spacing and alignment are
/// presentation attributes pushed down by the owning column (see
/// [`Column::apply_policy`](super::Column::apply_policy)).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextCell {
    text: String,
    split: Option<String>,
    indent: usize,
    width: usize,
    spacing: usize,
    align: Align,
    align_pinned: bool,
}

impl Default for TextCell {
    fn default() -> Self {
        TextCell::new("")
    }
}

impl TextCell {
    /// Create a left-aligned cell of width 1 with no spacing.
    pub fn new(text: impl Into<String>) -> Self {
        TextCell {
            text: text.into(),
            split: None,
            indent: 0,
            width: 1,
            spacing: 0,
            align: Align::Left,
            align_pinned: false,
        }
    }

    /// A filler cell for a row position that has no source value.
    pub fn blank() -> Self {
        TextCell::new("")
    }

    /// Set the paragraph split marker.
    pub fn with_split(mut self, marker: Option<String>) -> Self {
        self.split = marker.filter(|m| !m.is_empty());
        self
    }

    /// Set the indent level.
    pub fn with_indent(mut self, level: usize) -> Self {
        self.indent = level;
        self
    }

    /// Pin an alignment that column policy will not override.
    pub fn with_pinned_align(mut self, align: Align) -> Self {
        self.align = align;
        self.align_pinned = true;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn spacing(&self) -> usize {
        self.spacing
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn split(&self) -> Option<&str> {
        self.split.as_deref()
    }

    pub fn set_width(&mut self, width: usize) {
        self.width = width.max(1);
    }

    pub fn set_spacing(&mut self, spacing: usize) {
        self.spacing = spacing;
    }

    /// Set the alignment unless this cell pinned its own.
    pub fn set_align(&mut self, align: Align) {
        if !self.align_pinned {
            self.align = align;
        }
    }

    pub fn set_indent(&mut self, level: usize) {
        self.indent = level;
    }

    /// Width needed to print every part on one line, indent included.
    pub fn content_width(&self) -> usize {
        let text_width = content_width(&self.text, self.split());
        if text_width == 0 {
            return 0;
        }
        self.indent * INDENT_WIDTH + text_width
    }

    /// Wrap the text at the current width, indenting every line.
    ///
    /// A column with wrapping disabled sets the width to its widest
    /// content, so this only breaks lines when an explicit maximum width
    /// caps the column below that.
    pub fn lines(&self) -> Vec<String> {
        // Leave at least one column for text however deep the indent.
        let indent = (self.indent * INDENT_WIDTH).min(self.width.saturating_sub(1));
        let prefix = " ".repeat(indent);
        wrap_parts(&self.text, self.width - indent, self.split())
            .into_iter()
            .map(|line| {
                if line.is_empty() {
                    line
                } else {
                    format!("{}{}", prefix, line)
                }
            })
            .collect()
    }

    /// Number of printed lines at the current width.
    pub fn line_count(&self) -> usize {
        self.lines().len()
    }

    /// Write line `index` of already wrapped `lines`: spacing, then the
    /// justified text. Indices past the end print blank padding of the same
    /// width so ragged cells in a row stay aligned.
    pub fn write_line(&self, lines: &[String], index: usize, out: &mut String) {
        out.push_str(&" ".repeat(self.spacing));
        let text = lines.get(index).map(String::as_str).unwrap_or("");
        out.push_str(&justify(text, self.width, self.align));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(text: &str, width: usize) -> TextCell {
        let mut cell = TextCell::new(text);
        cell.set_width(width);
        cell
    }

    #[test]
    fn lines_wrap_at_width() {
        let cell = sized("alpha beta gamma", 10);
        assert_eq!(cell.lines(), vec!["alpha beta", "gamma"]);
        assert_eq!(cell.line_count(), 2);
    }

    #[test]
    fn blank_cell_has_one_line() {
        let cell = TextCell::blank();
        assert_eq!(cell.lines(), vec![""]);
        assert_eq!(cell.content_width(), 0);
    }

    #[test]
    fn split_marker_wraps_parts_independently() {
        let cell = sized("Table 1~Demographics", 20).with_split(Some("~".into()));
        assert_eq!(cell.lines(), vec!["Table 1", "Demographics"]);
        assert_eq!(cell.content_width(), 12);
    }

    #[test]
    fn indent_applies_to_every_line() {
        let cell = sized("mean age value", 10).with_indent(1);
        assert_eq!(cell.lines(), vec!["  mean age", "  value"]);
        assert_eq!(cell.content_width(), 16);
    }

    #[test]
    fn deep_indent_keeps_one_text_column() {
        let cell = sized("a b", 3).with_indent(4);
        assert_eq!(cell.lines(), vec!["  a", "  b"]);
    }

    #[test]
    fn pinned_align_survives_policy() {
        let mut cell = TextCell::new("x").with_pinned_align(Align::Right);
        cell.set_align(Align::Center);
        assert_eq!(cell.align(), Align::Right);

        let mut free = TextCell::new("x");
        free.set_align(Align::Center);
        assert_eq!(free.align(), Align::Center);
    }

    #[test]
    fn write_line_pads_and_fills_missing_lines() {
        let mut cell = sized("12", 5);
        cell.set_spacing(2);
        cell.set_align(Align::Right);
        let lines = cell.lines();

        let mut out = String::new();
        cell.write_line(&lines, 0, &mut out);
        assert_eq!(out, "     12");

        let mut blank = String::new();
        cell.write_line(&lines, 3, &mut blank);
        assert_eq!(blank, "       ");
    }

    #[test]
    fn width_never_below_one() {
        let mut cell = TextCell::new("a");
        cell.set_width(0);
        assert_eq!(cell.width(), 1);
    }
}
