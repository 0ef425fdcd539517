//! # plaintab - paginated fixed-width text reports
//!
//! `plaintab` lays out tabular data as plain monospace text for a fixed
//! page geometry: a line width in character columns and a number of lines
//! per page. Column widths are negotiated to fill the line, columns that
//! cannot share a line are split across pages with the id columns repeated,
//! and rows are grouped under hierarchical labels that are only reprinted
//! where they change.
//!
//! ## Core Concepts
//!
//! - [`CellRecord`]: one value for one column of one row, with the row's
//!   label path
//! - [`ColumnSet`]: columns in display order, built from records and a
//!   [`ColumnConfig`]
//! - [`Table`]: a column set on a [`Page`], paginated and rendered with the
//!   framing in [`TableOptions`]
//! - [`ReportConfig`]: page, columns and table options as one YAML or JSON
//!   document
//!
//! ## Quick Start
//!
//! ```rust
//! use plaintab::{CellRecord, ReportConfig, RowKey, Table};
//!
//! let config = ReportConfig::from_yaml(r#"
//! page: { linesize: 30, pagesize: 20 }
//! columns:
//!   id_columns: [stats]
//!   label: { stats: "Statistic", n: "N" }
//!   spacing: { n: 2 }
//! table:
//!   rule_char: "-"
//! "#).unwrap();
//!
//! let cells = vec![
//!     CellRecord::new("n", "stats", RowKey::new([1])).label(["Age"]),
//!     CellRecord::new(40, "n", RowKey::new([1])).label(["Age"]),
//! ];
//!
//! let table = Table::from_config(&config, cells).unwrap();
//! let text = table.render();
//! assert!(text.starts_with(&"-".repeat(30)));
//! assert!(text.contains("Age\n"));
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber. Columns
//! that overflow the line at their minimum widths and row groups taller
//! than a page are reported at `warn`; column page splits, duplicate cells
//! and ignored label paths at `debug`.

pub mod config;
mod error;
pub mod layout;
mod types;
mod util;

pub use config::{load_cells, ColumnConfig, ColumnSetting, Footnote, ReportConfig, TableOptions};
pub use error::{LayoutError, Result};
pub use layout::{
    Column, ColumnLayout, ColumnPage, ColumnPolicy, ColumnSet, ColumnSetBuilder, Page,
    PhysicalPage, PlacedGroup, RowGroup, RowLabel, Table, TextCell, FORM_FEED,
};
pub use types::{stringify, Align, CellRecord, KeyPart, RowKey};
pub use util::{
    content_width, display_width, justify, pad_center, pad_left, pad_right, wrap, wrap_parts,
};
