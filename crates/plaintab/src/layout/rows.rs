//! Rows, row-group labels and grouping.

use crate::types::RowKey;

use super::cell::TextCell;
use super::column::Column;

/// Index of the first label level that has to be printed for `next`, given
/// the label path printed just before it.
///
/// Zero when there is no previous path or `next` is shorter than it.
/// Otherwise the first level where the paths differ, or the shorter length
/// when one is a prefix of the other.
pub fn print_from(prev: Option<&[String]>, next: &[String]) -> usize {
    match prev {
        None => 0,
        Some(prev) if next.len() < prev.len() => 0,
        Some(prev) => prev
            .iter()
            .zip(next)
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| prev.len().min(next.len())),
    }
}

/// A hierarchical label path and the level to start printing it from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowLabel {
    labels: Vec<String>,
    print_from: usize,
}

impl RowLabel {
    pub fn new(labels: Vec<String>, print_from: usize) -> Self {
        let print_from = print_from.min(labels.len());
        RowLabel { labels, print_from }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn print_from(&self) -> usize {
        self.print_from
    }

    pub fn depth(&self) -> usize {
        self.labels.len()
    }

    /// The `(level, text)` pairs printed when starting at `from`.
    pub fn levels_from(&self, from: usize) -> impl Iterator<Item = (usize, &str)> {
        self.labels
            .iter()
            .enumerate()
            .skip(from)
            .map(|(level, text)| (level, text.as_str()))
    }
}

/// Consecutive rows sharing one label path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowGroup {
    label: RowLabel,
    rows: Vec<RowKey>,
}

impl RowGroup {
    pub fn new(label: RowLabel, rows: Vec<RowKey>) -> Self {
        RowGroup { label, rows }
    }

    pub fn label(&self) -> &RowLabel {
        &self.label
    }

    pub fn rows(&self) -> &[RowKey] {
        &self.rows
    }
}

/// Group rows (in print order) into maximal runs with identical label
/// paths, computing each group's `print_from` against the group before it.
pub fn group_rows<'a, I>(rows: I) -> Vec<RowGroup>
where
    I: IntoIterator<Item = (&'a RowKey, &'a [String])>,
{
    rows.into_iter()
        .fold(Vec::<RowGroup>::new(), |mut groups, (key, label)| {
            match groups.last_mut() {
                Some(group) if group.label.labels() == label => group.rows.push(key.clone()),
                _ => {
                    let from = print_from(groups.last().map(|g| g.label.labels()), label);
                    groups.push(RowGroup::new(
                        RowLabel::new(label.to_vec(), from),
                        vec![key.clone()],
                    ));
                }
            }
            groups
        })
}

/// One printed row: a cell per column on the page.
#[derive(Clone, Debug)]
pub struct Row {
    cells: Vec<TextCell>,
}

impl Row {
    pub fn new(cells: Vec<TextCell>) -> Self {
        Row { cells }
    }

    /// The cells of `key` across `columns`, blanks filling the gaps.
    pub fn body(key: &RowKey, columns: &[Column]) -> Self {
        Row::new(columns.iter().map(|c| c.cell(key).clone()).collect())
    }

    /// The header cells of `columns`.
    pub fn header(columns: &[Column]) -> Self {
        Row::new(columns.iter().map(|c| c.header().clone()).collect())
    }

    /// A group label line: `text` indented `level` levels in the column at
    /// `slot`, every other column blank.
    pub fn label(text: &str, level: usize, slot: usize, columns: &[Column]) -> Self {
        let cells = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let mut cell = if i == slot {
                    TextCell::new(text).with_indent(level)
                } else {
                    TextCell::blank()
                };
                cell.set_width(column.width());
                cell.set_spacing(column.spacing());
                cell
            })
            .collect();
        Row::new(cells)
    }

    pub fn cells(&self) -> &[TextCell] {
        &self.cells
    }

    /// Lines this row prints: the most any of its cells wraps to.
    pub fn line_count(&self) -> usize {
        self.cells
            .iter()
            .map(TextCell::line_count)
            .max()
            .unwrap_or(1)
    }

    /// Append the printed lines of this row to `out`, trailing blanks
    /// trimmed.
    pub fn render_into(&self, out: &mut Vec<String>) {
        let wrapped: Vec<Vec<String>> = self.cells.iter().map(TextCell::lines).collect();
        let count = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        for index in 0..count {
            let mut line = String::new();
            for (cell, lines) in self.cells.iter().zip(&wrapped) {
                cell.write_line(lines, index, &mut line);
            }
            out.push(line.trim_end().to_string());
        }
    }
}
