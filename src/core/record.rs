use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockState {
    #[serde(rename = "In stock")]
    InStock,
    #[serde(rename = "Out of stock")]
    OutOfStock,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl fmt::Display for StockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StockState::InStock => "In stock",
            StockState::OutOfStock => "Out of stock",
            StockState::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Column headers of every tabular export, in [`BookRecord`] field order.
pub const COLUMNS: [&str; 8] = [
    "title",
    "category",
    "price",
    "stock",
    "available",
    "rating",
    "upc",
    "description",
];

/// One extracted catalog item. Field order is the column order of every
/// tabular export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub category: String,
    pub price: String,
    pub stock: StockState,
    pub available: u32,
    pub rating: u8,
    pub upc: String,
    pub description: String,
}

/// Records in visitation order. Append-only: records are never mutated or
/// removed once pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<BookRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns its 1-based position.
    pub fn push(&mut self, record: BookRecord) -> usize {
        self.records.push(record);
        self.records.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn as_slice(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BookRecord> {
        self.records.iter()
    }

    pub fn into_vec(self) -> Vec<BookRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a BookRecord;
    type IntoIter = std::slice::Iter<'a, BookRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
