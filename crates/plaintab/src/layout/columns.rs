//! The full set of columns of a table and the rows they span.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{setting, ColumnConfig, ColumnSetting};
use crate::error::{LayoutError, Result};
use crate::types::{Align, CellRecord, RowKey};

use super::cell::TextCell;
use super::column::{Column, ColumnPolicy};
use super::resolve::{layout_columns, ColumnLayout, ColumnPage, WidthSpec};
use super::rows::{group_rows, RowGroup};

/// Columns in display order, plus the row index and label paths.
///
/// Built once from cell records; width negotiation never mutates it, each
/// column page works on sized copies (see [`ColumnSet::page_columns`]).
#[derive(Clone, Debug)]
pub struct ColumnSet {
    columns: Vec<Column>,
    id_columns: Vec<String>,
    label_column: Option<String>,
    /// Every row key in print order, with its label path.
    labels: BTreeMap<RowKey, Vec<String>>,
}

impl ColumnSet {
    /// Start a builder.
    pub fn builder() -> ColumnSetBuilder {
        ColumnSetBuilder::default()
    }

    /// Build from a configuration and cell records.
    pub fn from_config<I>(config: &ColumnConfig, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = CellRecord>,
    {
        let records: Vec<CellRecord> = records.into_iter().collect();

        let mut order: Vec<String> = Vec::new();
        for key in config
            .order
            .iter()
            .chain(records.iter().map(|r| &r.column))
        {
            if !order.contains(key) {
                order.push(key.clone());
            }
        }

        for id in &config.id_columns {
            if !order.contains(id) {
                return Err(LayoutError::UnknownColumn {
                    role: "id",
                    column: id.clone(),
                });
            }
        }
        let label_column = match &config.label_column {
            Some(key) if !order.contains(key) => {
                return Err(LayoutError::UnknownColumn {
                    role: "label",
                    column: key.clone(),
                })
            }
            Some(key) => Some(key.clone()),
            None => config
                .id_columns
                .first()
                .or_else(|| order.first())
                .cloned(),
        };

        let mut columns = Vec::with_capacity(order.len());
        for (position, key) in order.iter().enumerate() {
            let policy = ColumnPolicy::from_config(config, key, position);
            policy.validate(key)?;
            let header = setting(&config.label, key, position)
                .cloned()
                .unwrap_or_default();
            columns.push(
                Column::new(key.as_str())
                    .with_policy(policy)
                    .with_header(header, config.header_split.clone()),
            );
        }

        let mut labels: BTreeMap<RowKey, Vec<String>> = BTreeMap::new();
        for record in records {
            let text = record.text();
            match labels.get(&record.row) {
                Some(existing) if *existing != record.label => debug!(
                    row = %record.row,
                    column = %record.column,
                    "conflicting label path ignored"
                ),
                Some(_) => {}
                None => {
                    labels.insert(record.row.clone(), record.label.clone());
                }
            }

            let mut cell = TextCell::new(text).with_split(record.split.clone());
            if let Some(align) = record.align {
                cell = cell.with_pinned_align(align);
            }
            let Some(column) = columns.iter_mut().find(|c| c.key() == record.column) else {
                continue;
            };
            if !column.insert(record.row.clone(), cell) {
                debug!(
                    row = %record.row,
                    column = %record.column,
                    "duplicate cell ignored"
                );
            }
        }

        if let Some(column) = label_column
            .as_deref()
            .and_then(|key| columns.iter_mut().find(|c| c.key() == key))
        {
            column.update_cells(|row, cell| {
                cell.set_indent(labels.get(row).map_or(0, Vec::len));
            });
            let widest_label = labels
                .values()
                .flat_map(|path| path.iter().enumerate())
                .map(|(level, text)| {
                    TextCell::new(text.as_str())
                        .with_indent(level)
                        .content_width()
                })
                .max()
                .unwrap_or(0);
            column.note_label_width(widest_label);
        }

        for column in &mut columns {
            column.fit();
        }

        Ok(ColumnSet {
            columns,
            id_columns: config.id_columns.clone(),
            label_column,
            labels,
        })
    }

    /// Columns in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key() == key)
    }

    pub fn id_columns(&self) -> &[String] {
        &self.id_columns
    }

    /// Column that carries row-group labels, if there are any columns.
    pub fn label_column(&self) -> Option<&str> {
        self.label_column.as_deref()
    }

    pub fn is_id(&self, key: &str) -> bool {
        self.id_columns.iter().any(|id| id == key)
    }

    pub fn row_count(&self) -> usize {
        self.labels.len()
    }

    /// Row keys in print order with their label paths.
    pub fn rows(&self) -> impl Iterator<Item = (&RowKey, &[String])> {
        self.labels.iter().map(|(key, path)| (key, path.as_slice()))
    }

    /// Label path of `row`; empty for unknown rows.
    pub fn label(&self, row: &RowKey) -> &[String] {
        self.labels.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rows grouped by label path.
    pub fn groups(&self) -> Vec<RowGroup> {
        group_rows(self.rows())
    }

    /// Negotiation inputs for every column, in display order.
    pub fn width_specs(&self) -> Vec<WidthSpec> {
        self.columns
            .iter()
            .map(|c| WidthSpec::from_column(c, self.is_id(c.key())))
            .collect()
    }

    /// Negotiate widths and split the columns into pages at `linesize`.
    pub fn layout(&self, linesize: usize) -> ColumnLayout {
        layout_columns(&self.width_specs(), linesize)
    }

    /// The columns of `page`, each a copy sized to its negotiated width.
    pub fn page_columns(&self, page: &ColumnPage) -> Vec<Column> {
        page.keys
            .iter()
            .zip(&page.widths)
            .filter_map(|(key, width)| self.column(key).map(|c| c.sized(*width)))
            .collect()
    }
}

/// Fluent construction of a [`ColumnSet`].
///
/// ```
/// use plaintab::{CellRecord, ColumnSet, RowKey};
///
/// let set = ColumnSet::builder()
///     .order(["stats", "n"])
///     .id_columns(["stats"])
///     .label(plaintab::ColumnSetting::by_key([("n", "N".to_string())]))
///     .cell(CellRecord::new("Mean", "stats", RowKey::new([1])).label(["Age"]))
///     .cell(CellRecord::new(42, "n", RowKey::new([1])).label(["Age"]))
///     .build()
///     .unwrap();
///
/// assert_eq!(set.columns().len(), 2);
/// assert_eq!(set.label_column(), Some("stats"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ColumnSetBuilder {
    config: ColumnConfig,
    records: Vec<CellRecord>,
}

impl ColumnSetBuilder {
    /// Replace the whole column configuration.
    pub fn config(mut self, config: ColumnConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cell(mut self, record: CellRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn cells<I: IntoIterator<Item = CellRecord>>(mut self, records: I) -> Self {
        self.records.extend(records);
        self
    }

    pub fn order<S: Into<String>, I: IntoIterator<Item = S>>(mut self, keys: I) -> Self {
        self.config.order = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn id_columns<S: Into<String>, I: IntoIterator<Item = S>>(mut self, keys: I) -> Self {
        self.config.id_columns = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn label_column(mut self, key: impl Into<String>) -> Self {
        self.config.label_column = Some(key.into());
        self
    }

    pub fn spacing(mut self, spacing: impl Into<ColumnSetting<usize>>) -> Self {
        self.config.spacing = Some(spacing.into());
        self
    }

    pub fn min_width(mut self, width: impl Into<ColumnSetting<usize>>) -> Self {
        self.config.min_width = Some(width.into());
        self
    }

    pub fn max_width(mut self, width: impl Into<ColumnSetting<usize>>) -> Self {
        self.config.max_width = Some(width.into());
        self
    }

    pub fn wrap(mut self, wrap: impl Into<ColumnSetting<bool>>) -> Self {
        self.config.wrap = Some(wrap.into());
        self
    }

    pub fn wrap_header(mut self, wrap: impl Into<ColumnSetting<bool>>) -> Self {
        self.config.wrap_header = Some(wrap.into());
        self
    }

    pub fn align(mut self, align: impl Into<ColumnSetting<Align>>) -> Self {
        self.config.align = Some(align.into());
        self
    }

    pub fn header_align(mut self, align: impl Into<ColumnSetting<Align>>) -> Self {
        self.config.header_align = Some(align.into());
        self
    }

    /// Header text per column.
    pub fn label(mut self, label: ColumnSetting<String>) -> Self {
        self.config.label = Some(label);
        self
    }

    pub fn header_split(mut self, marker: impl Into<String>) -> Self {
        self.config.header_split = Some(marker.into());
        self
    }

    pub fn build(self) -> Result<ColumnSet> {
        ColumnSet::from_config(&self.config, self.records)
    }
}
