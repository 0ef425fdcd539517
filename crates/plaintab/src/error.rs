//! Error types for report layout.
//!
//! Only configuration problems are errors. Uneven rows, missing split markers
//! and columns that cannot fit the line even at their minimum width are all
//! recovered during layout (the last one is logged as a warning).

use thiserror::Error;

/// Errors that can occur while building a column set or a table.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A column's minimum width is larger than its maximum width.
    #[error("column '{column}': min width {min} exceeds max width {max}")]
    WidthConflict {
        column: String,
        min: usize,
        max: usize,
    },

    /// A configuration entry names a column that has no cells and is not in
    /// the display order.
    #[error("{role} column '{column}' is not a known column")]
    UnknownColumn { role: &'static str, column: String },

    /// Page geometry must be strictly positive.
    #[error("invalid page geometry: linesize={linesize}, pagesize={pagesize}")]
    InvalidPage { linesize: usize, pagesize: usize },

    /// Failure reading a configuration or report document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML document could not be parsed.
    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON document could not be parsed.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
