//! Layout engine: cells, columns, width negotiation, grouping and pages.
//!
//! Layout runs bottom-up:
//!
//! 1. [`TextCell`] wraps one value at a width.
//! 2. [`Column`] gathers the cells of one key and derives content
//!    statistics: maximum, average, preferred width and floor.
//! 3. [`ColumnSet`] holds every column in display order. Its
//!    [`layout`](ColumnSet::layout) negotiates widths and, when even the
//!    floors do not fit, splits the columns into several [`ColumnPage`]s
//!    that each repeat the id columns.
//! 4. [`group_rows`] folds the sorted rows into [`RowGroup`]s with
//!    compressed label paths.
//! 5. [`Table`] packs row groups into physical pages and renders them.
//!
//! ## Example
//!
//! ```rust
//! use plaintab::{CellRecord, ColumnSet, Page, RowKey, Table, TableOptions};
//!
//! let columns = ColumnSet::builder()
//!     .id_columns(["stats"])
//!     .spacing(plaintab::ColumnSetting::by_key([("n", 2usize)]))
//!     .cell(CellRecord::new("Mean", "stats", RowKey::new([1])).label(["Age"]))
//!     .cell(CellRecord::new(41.5, "n", RowKey::new([1])).label(["Age"]))
//!     .build()
//!     .unwrap();
//!
//! let table = Table::new(columns, Page::new(40, 20).unwrap(), TableOptions::new().title("Ages"));
//! let text = table.render();
//! assert!(text.contains("Age\n"));
//! assert!(text.contains("41.5"));
//! ```

mod cell;
mod column;
mod columns;
mod page;
mod resolve;
mod rows;
mod table;

pub use cell::{TextCell, INDENT_WIDTH};
pub use column::{Column, ColumnPolicy};
pub use columns::{ColumnSet, ColumnSetBuilder};
pub use page::Page;
pub use resolve::{layout_columns, negotiate, ColumnLayout, ColumnPage, WidthSpec};
pub use rows::{group_rows, print_from, Row, RowGroup, RowLabel};
pub use table::{PhysicalPage, PlacedGroup, Table, FORM_FEED};
