//! A single column: its cells, its width policy and its content statistics.

use std::collections::BTreeMap;

use crate::config::{setting, ColumnConfig};
use crate::error::{LayoutError, Result};
use crate::types::{Align, RowKey};

use super::cell::TextCell;

/// Width, wrapping, alignment and spacing rules for one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnPolicy {
    pub min_width: usize,
    /// `None` means unbounded. An explicit maximum wins over `wrap: false`:
    /// content wider than it wraps at the maximum.
    pub max_width: Option<usize>,
    /// `false` keeps the column at its widest content so nothing wraps,
    /// within `max_width`.
    pub wrap: bool,
    pub wrap_header: bool,
    pub align: Align,
    pub header_align: Align,
    pub spacing: usize,
}

impl Default for ColumnPolicy {
    fn default() -> Self {
        ColumnPolicy {
            min_width: 1,
            max_width: None,
            wrap: true,
            wrap_header: true,
            align: Align::Left,
            header_align: Align::Center,
            spacing: 0,
        }
    }
}

impl ColumnPolicy {
    /// Resolve the policy for column `key` at display `position`.
    pub fn from_config(config: &ColumnConfig, key: &str, position: usize) -> Self {
        let default = ColumnPolicy::default();
        ColumnPolicy {
            min_width: setting(&config.min_width, key, position)
                .copied()
                .unwrap_or(default.min_width)
                .max(1),
            max_width: setting(&config.max_width, key, position).copied(),
            wrap: setting(&config.wrap, key, position)
                .copied()
                .unwrap_or(default.wrap),
            wrap_header: setting(&config.wrap_header, key, position)
                .copied()
                .unwrap_or(default.wrap_header),
            align: setting(&config.align, key, position)
                .copied()
                .unwrap_or(default.align),
            header_align: setting(&config.header_align, key, position)
                .copied()
                .unwrap_or(default.header_align),
            spacing: setting(&config.spacing, key, position)
                .copied()
                .unwrap_or(default.spacing),
        }
    }

    /// Reject a policy whose minimum exceeds its maximum.
    pub fn validate(&self, key: &str) -> Result<()> {
        match self.max_width {
            Some(max) if self.min_width > max => Err(LayoutError::WidthConflict {
                column: key.to_string(),
                min: self.min_width,
                max,
            }),
            _ => Ok(()),
        }
    }
}

/// An ordered set of cells sharing one column key.
///
/// Cells are stored by row key; a lookup miss is a blank cell, never an
/// implicit insertion.
#[derive(Clone, Debug)]
pub struct Column {
    key: String,
    header: TextCell,
    cells: BTreeMap<RowKey, TextCell>,
    policy: ColumnPolicy,
    width: usize,
    blank: TextCell,
    /// Widest row-group label line this column has to hold.
    label_width: usize,
}

impl Column {
    /// Create an empty column with the default policy and no header.
    pub fn new(key: impl Into<String>) -> Self {
        let mut column = Column {
            key: key.into(),
            header: TextCell::blank(),
            cells: BTreeMap::new(),
            policy: ColumnPolicy::default(),
            width: 1,
            blank: TextCell::blank(),
            label_width: 0,
        };
        column.apply_policy();
        column
    }

    /// Set the header text.
    pub fn with_header(mut self, label: impl Into<String>, split: Option<String>) -> Self {
        self.header = TextCell::new(label).with_split(split);
        self.apply_policy();
        self
    }

    /// Replace the policy and refit the column.
    pub fn with_policy(mut self, policy: ColumnPolicy) -> Self {
        self.policy = policy;
        self.fit();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn policy(&self) -> &ColumnPolicy {
        &self.policy
    }

    pub fn header(&self) -> &TextCell {
        &self.header
    }

    /// Current print width.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn spacing(&self) -> usize {
        self.policy.spacing
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Add a cell. The first cell for a row wins; returns `false` if the row
    /// was already filled.
    ///
    /// The cell takes the column's current presentation. Widths derived
    /// from content are not refreshed here; call [`Column::fit`] once every
    /// cell is in.
    pub fn insert(&mut self, row: RowKey, mut cell: TextCell) -> bool {
        if self.cells.contains_key(&row) {
            return false;
        }
        self.push_policy(&mut cell);
        self.cells.insert(row, cell);
        true
    }

    /// The cell for `row`, or a blank filler cell carrying this column's
    /// presentation attributes.
    pub fn cell(&self, row: &RowKey) -> &TextCell {
        self.cells.get(row).unwrap_or(&self.blank)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&RowKey, &TextCell)> {
        self.cells.iter()
    }

    pub(crate) fn update_cells(&mut self, mut f: impl FnMut(&RowKey, &mut TextCell)) {
        for (row, cell) in self.cells.iter_mut() {
            f(row, cell);
        }
    }

    /// Record that a group label of `width` columns prints in this column.
    pub(crate) fn note_label_width(&mut self, width: usize) {
        self.label_width = self.label_width.max(width);
    }

    /// Size the column to its preferred width and push the policy to every
    /// cell.
    pub fn fit(&mut self) {
        self.width = self.preferred_width();
        self.apply_policy();
    }

    /// Set the print width and push it to every cell.
    pub fn set_width(&mut self, width: usize) {
        self.width = width.max(1);
        self.apply_policy();
    }

    /// Set the spacing and push it to every cell.
    pub fn set_spacing(&mut self, spacing: usize) {
        self.policy.spacing = spacing;
        self.apply_policy();
    }

    /// Set the body alignment and push it to every cell without a pinned
    /// alignment.
    pub fn set_align(&mut self, align: Align) {
        self.policy.align = align;
        self.apply_policy();
    }

    /// A copy of this column printed at `width`.
    pub fn sized(&self, width: usize) -> Column {
        let mut column = self.clone();
        column.set_width(width);
        column
    }

    /// Push the current width, spacing and alignment to the header, every
    /// cell and the blank filler. Idempotent.
    pub fn apply_policy(&mut self) {
        let mut cells = std::mem::take(&mut self.cells);
        for cell in cells.values_mut() {
            self.push_policy(cell);
        }
        self.cells = cells;

        let mut blank = std::mem::take(&mut self.blank);
        self.push_policy(&mut blank);
        self.blank = blank;

        self.header.set_width(self.width);
        self.header.set_spacing(self.policy.spacing);
        self.header.set_align(self.policy.header_align);
    }

    fn push_policy(&self, cell: &mut TextCell) {
        cell.set_width(self.width);
        cell.set_spacing(self.policy.spacing);
        cell.set_align(self.policy.align);
    }

    /// Widest cell content (indent included), group labels included.
    pub fn max_content_width(&self) -> usize {
        self.cells
            .values()
            .map(TextCell::content_width)
            .max()
            .unwrap_or(0)
            .max(self.label_width)
    }

    /// Mean cell content width, rounded up; at least 1 so every column
    /// carries some weight when space is shared out.
    pub fn avg_content_width(&self) -> usize {
        if self.cells.is_empty() {
            return 1;
        }
        let total: usize = self.cells.values().map(TextCell::content_width).sum();
        total.div_ceil(self.cells.len()).max(1)
    }

    /// Width of the header text printed without wrapping.
    pub fn header_width(&self) -> usize {
        self.header.content_width()
    }

    /// The narrowest width the column accepts under pressure: the minimum
    /// width, widened to the content when wrapping is off and to the header
    /// when header wrapping is off, capped by the maximum width.
    pub fn preferred_min_width(&self) -> usize {
        let mut floor = self.policy.min_width;
        if !self.policy.wrap {
            floor = floor.max(self.max_content_width());
        }
        if !self.policy.wrap_header {
            floor = floor.max(self.header_width());
        }
        match self.policy.max_width {
            Some(max) => floor.min(max),
            None => floor,
        }
        .max(1)
    }

    /// The width the column would take with no competition for space.
    pub fn preferred_width(&self) -> usize {
        let floor = self.preferred_min_width();
        let width = self.max_content_width().max(floor);
        match self.policy.max_width {
            Some(max) => width.min(max),
            None => width,
        }
    }
}
