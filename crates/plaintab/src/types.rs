//! Core input types: alignment, row keys and cell records.
//!
//! Upstream collaborators (data loaders, statistics, label lookup) produce
//! [`CellRecord`]s. The layout engine never interprets a value beyond turning
//! it into text once.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text alignment within a column.
///
/// Besides the lowercase names, the format-string shorthands `<`, `>` and `^`
/// are accepted when parsing or deserializing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left-align text (pad on the right).
    #[default]
    #[serde(alias = "<")]
    Left,
    /// Right-align text (pad on the left).
    #[serde(alias = ">")]
    Right,
    /// Center text (pad on both sides).
    #[serde(alias = "^")]
    Center,
}

impl FromStr for Align {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "<" => Ok(Align::Left),
            "right" | ">" => Ok(Align::Right),
            "center" | "centre" | "^" => Ok(Align::Center),
            other => Err(format!(
                "Invalid alignment: '{}'. Expected left, right, center, <, > or ^.",
                other
            )),
        }
    }
}

/// One component of a [`RowKey`].
///
/// Numbers sort before text. Numbers compare with [`f64::total_cmp`], so the
/// order is total even for NaN.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyPart {
    Number(f64),
    Text(String),
}

impl PartialEq for KeyPart {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyPart {}

impl PartialOrd for KeyPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyPart {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyPart::Number(a), KeyPart::Number(b)) => a.total_cmp(b),
            (KeyPart::Number(_), KeyPart::Text(_)) => Ordering::Less,
            (KeyPart::Text(_), KeyPart::Number(_)) => Ordering::Greater,
            (KeyPart::Text(a), KeyPart::Text(b)) => a.cmp(b),
        }
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Number(n) => write!(f, "{}", n),
            KeyPart::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i32> for KeyPart {
    fn from(n: i32) -> Self {
        KeyPart::Number(f64::from(n))
    }
}

impl From<u32> for KeyPart {
    fn from(n: u32) -> Self {
        KeyPart::Number(f64::from(n))
    }
}

impl From<f64> for KeyPart {
    fn from(n: f64) -> Self {
        KeyPart::Number(n)
    }
}

impl From<&str> for KeyPart {
    fn from(s: &str) -> Self {
        KeyPart::Text(s.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(s: String) -> Self {
        KeyPart::Text(s)
    }
}

/// Ordered tuple identifying one logical row across all columns.
///
/// Rows are laid out in ascending key order, compared component by component.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RowKey(pub Vec<KeyPart>);

impl RowKey {
    /// Build a key from any sequence of key parts.
    pub fn new<P: Into<KeyPart>, I: IntoIterator<Item = P>>(parts: I) -> Self {
        RowKey(parts.into_iter().map(Into::into).collect())
    }

    /// Key parts, outermost first.
    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "({})", parts.join(", "))
    }
}

impl<'de> Deserialize<'de> for RowKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RowKeyRaw {
            Many(Vec<KeyPart>),
            One(KeyPart),
        }

        Ok(match RowKeyRaw::deserialize(deserializer)? {
            RowKeyRaw::Many(parts) => RowKey(parts),
            RowKeyRaw::One(part) => RowKey(vec![part]),
        })
    }
}

/// A single value destined for one column of one row.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CellRecord {
    /// Raw value; stringified once when the cell is laid out.
    #[serde(default)]
    pub value: Value,
    /// Key of the column the cell belongs to.
    pub column: String,
    /// Key of the row the cell belongs to.
    pub row: RowKey,
    /// Hierarchical row-group label, outermost first.
    #[serde(default)]
    pub label: Vec<String>,
    /// Alignment override for this cell only.
    #[serde(default)]
    pub align: Option<Align>,
    /// Marker splitting the text into independently wrapped paragraphs.
    #[serde(default)]
    pub split: Option<String>,
    /// Keep the cell's row but print nothing for it.
    #[serde(default)]
    pub no_print: bool,
}

impl CellRecord {
    /// Create a record with no label path and no overrides.
    pub fn new(value: impl Into<Value>, column: impl Into<String>, row: RowKey) -> Self {
        CellRecord {
            value: value.into(),
            column: column.into(),
            row,
            label: Vec::new(),
            align: None,
            split: None,
            no_print: false,
        }
    }

    /// Set the row-group label path.
    pub fn label<S: Into<String>, I: IntoIterator<Item = S>>(mut self, label: I) -> Self {
        self.label = label.into_iter().map(Into::into).collect();
        self
    }

    /// Override the column alignment for this cell.
    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Set the paragraph split marker.
    pub fn split(mut self, marker: impl Into<String>) -> Self {
        self.split = Some(marker.into());
        self
    }

    /// Mark the cell as not printed.
    pub fn no_print(mut self) -> Self {
        self.no_print = true;
        self
    }

    /// Text to print for this cell.
    pub fn text(&self) -> String {
        if self.no_print {
            return String::new();
        }
        stringify(&self.value)
    }
}

/// Turn a raw value into display text.
///
/// Strings are used verbatim and `null` becomes empty; everything else uses
/// its compact JSON form.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        v => v.to_string(),
    }
}
