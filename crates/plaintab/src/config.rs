//! Report configuration.
//!
//! Everything here is plain serde data so reports can be described in YAML
//! or JSON:
//!
//! ```yaml
//! page:
//!   linesize: 89
//!   pagesize: 45
//! columns:
//!   order: [stats, low, high]
//!   id_columns: [stats]
//!   wrap: false
//!   spacing: [0, 1, 1]
//!   align: { stats: left, low: "^", high: "^" }
//!   label: { low: "0.15 mg/kg", high: "0.25 mg/kg" }
//! table:
//!   title: "Table 14.1~Summary of Age"
//!   split: "~"
//!   footnotes:
//!     - "Source: ADSL"
//!     - ["Program: t_age.sas", ">"]
//! ```
//!
//! Per-column settings accept a single value for every column, a positional
//! list in display order (`null` leaves a position unset), or a map keyed by
//! column key. See [`ColumnSetting`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::Page;
use crate::types::{Align, CellRecord};

/// A per-column setting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSetting<T> {
    /// One value applied to every column.
    All(T),
    /// Values by display position.
    ByPosition(Vec<Option<T>>),
    /// Values by column key.
    ByKey(BTreeMap<String, T>),
}

impl<T> ColumnSetting<T> {
    /// Build a keyed setting from `(key, value)` pairs.
    pub fn by_key<K: Into<String>, I: IntoIterator<Item = (K, T)>>(entries: I) -> Self {
        ColumnSetting::ByKey(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Value for the column `key` shown at `position`, if the setting has one.
    pub fn resolve(&self, key: &str, position: usize) -> Option<&T> {
        match self {
            ColumnSetting::All(value) => Some(value),
            ColumnSetting::ByPosition(values) => values.get(position).and_then(Option::as_ref),
            ColumnSetting::ByKey(values) => values.get(key),
        }
    }
}

impl<T> From<T> for ColumnSetting<T> {
    fn from(value: T) -> Self {
        ColumnSetting::All(value)
    }
}

/// Look up an optional setting.
pub(crate) fn setting<'a, T>(
    setting: &'a Option<ColumnSetting<T>>,
    key: &str,
    position: usize,
) -> Option<&'a T> {
    setting.as_ref().and_then(|s| s.resolve(key, position))
}

/// Column-level configuration for a [`ColumnSet`](crate::ColumnSet).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Display order. Columns that have cells but are not listed follow in
    /// first-seen order.
    pub order: Vec<String>,
    /// Columns repeated at the start of every column page.
    pub id_columns: Vec<String>,
    /// Column that carries row-group labels. Defaults to the first id
    /// column, else the first displayed column.
    pub label_column: Option<String>,
    /// Blank columns printed before each column (default 0).
    pub spacing: Option<ColumnSetting<usize>>,
    /// Minimum width (default 1).
    pub min_width: Option<ColumnSetting<usize>>,
    /// Maximum width (default unbounded).
    pub max_width: Option<ColumnSetting<usize>>,
    /// Whether body text may wrap (default true).
    pub wrap: Option<ColumnSetting<bool>>,
    /// Whether header text may wrap (default true).
    pub wrap_header: Option<ColumnSetting<bool>>,
    /// Body alignment (default left).
    pub align: Option<ColumnSetting<Align>>,
    /// Header alignment (default center).
    pub header_align: Option<ColumnSetting<Align>>,
    /// Header text (default empty).
    pub label: Option<ColumnSetting<String>>,
    /// Paragraph marker for header text.
    pub header_split: Option<String>,
}

/// A footnote line: plain text, or text with an alignment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Footnote {
    Text(String),
    Pair(String, Align),
    Aligned {
        text: String,
        #[serde(default)]
        align: Align,
    },
}

impl Footnote {
    pub fn text(&self) -> &str {
        match self {
            Footnote::Text(text) | Footnote::Pair(text, _) | Footnote::Aligned { text, .. } => {
                text
            }
        }
    }

    pub fn align(&self) -> Align {
        match self {
            Footnote::Text(_) => Align::Left,
            Footnote::Pair(_, align) | Footnote::Aligned { align, .. } => *align,
        }
    }
}

impl From<&str> for Footnote {
    fn from(text: &str) -> Self {
        Footnote::Text(text.to_string())
    }
}

impl From<String> for Footnote {
    fn from(text: String) -> Self {
        Footnote::Text(text)
    }
}

impl From<(&str, Align)> for Footnote {
    fn from((text, align): (&str, Align)) -> Self {
        Footnote::Pair(text.to_string(), align)
    }
}

/// Table-level framing options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Title printed at the top of every page.
    pub title: Option<String>,
    /// Title alignment.
    pub title_align: Align,
    /// Footnotes printed at the bottom of every page.
    pub footnotes: Vec<Footnote>,
    /// Paragraph marker for the title and footnotes.
    pub split: Option<String>,
    /// Rule before the header.
    pub before_header_line: bool,
    /// Rule after the header.
    pub after_header_line: bool,
    /// Print the header row.
    pub display_header: bool,
    /// Blank line after every printed row and group label.
    pub double_spaced: bool,
    /// Character repeated across the line for rules.
    pub rule_char: char,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            title: None,
            title_align: Align::Center,
            footnotes: Vec::new(),
            split: None,
            before_header_line: true,
            after_header_line: true,
            display_header: true,
            double_spaced: false,
            rule_char: '\u{2014}',
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the title alignment.
    pub fn title_align(mut self, align: Align) -> Self {
        self.title_align = align;
        self
    }

    /// Append a footnote.
    pub fn footnote(mut self, footnote: impl Into<Footnote>) -> Self {
        self.footnotes.push(footnote.into());
        self
    }

    /// Set the paragraph marker for title and footnotes.
    pub fn split(mut self, marker: impl Into<String>) -> Self {
        self.split = Some(marker.into());
        self
    }

    pub fn before_header_line(mut self, enable: bool) -> Self {
        self.before_header_line = enable;
        self
    }

    pub fn after_header_line(mut self, enable: bool) -> Self {
        self.after_header_line = enable;
        self
    }

    pub fn display_header(mut self, enable: bool) -> Self {
        self.display_header = enable;
        self
    }

    pub fn double_spaced(mut self, enable: bool) -> Self {
        self.double_spaced = enable;
        self
    }

    pub fn rule_char(mut self, c: char) -> Self {
        self.rule_char = c;
        self
    }
}

/// Everything needed to lay out a report except the cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub page: Page,
    #[serde(default)]
    pub columns: ColumnConfig,
    #[serde(default)]
    pub table: TableOptions,
}

impl ReportConfig {
    /// Parse a YAML configuration.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file; `.json` files are read as JSON, anything
    /// else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_document(path.as_ref())
    }
}

/// Load cell records from a JSON or YAML file holding a list of records.
pub fn load_cells<P: AsRef<Path>>(path: P) -> Result<Vec<CellRecord>> {
    load_document(path.as_ref())
}

fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_yaml::from_str(&content)?)
    }
}
