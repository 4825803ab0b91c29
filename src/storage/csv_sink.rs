use async_trait::async_trait;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use super::base::RecordSink;
use crate::core::record::{BookRecord, COLUMNS};
use crate::ScraperResult;

/// One header row, then one row per record with columns in field order.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSink for CsvSink {
    async fn write(&self, records: &[BookRecord]) -> ScraperResult<PathBuf> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = ::csv::Writer::from_path(&self.path)?;
        if records.is_empty() {
            writer.write_record(COLUMNS)?;
        }
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        info!("Wrote {} books to {}", records.len(), self.path.display());
        Ok(self.path.clone())
    }
}

/// Reads back a file written by [`CsvSink`].
pub fn load_csv<P: AsRef<Path>>(path: P) -> ScraperResult<Vec<BookRecord>> {
    let mut reader = ::csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<BookRecord>() {
        records.push(row?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::StockState;

    fn records() -> Vec<BookRecord> {
        vec![
            BookRecord {
                title: "It's Only the Himalayas".to_string(),
                category: "Travel".to_string(),
                price: "£45.17".to_string(),
                stock: StockState::InStock,
                available: 19,
                rating: 2,
                upc: "a22124811bfa8350".to_string(),
                description: "\"Wherever you go, whatever you do\", she wrote,\nand then left.".to_string(),
            },
            BookRecord {
                title: "Out, Of Print".to_string(),
                category: "Poetry".to_string(),
                price: "£0.00".to_string(),
                stock: StockState::OutOfStock,
                available: 0,
                rating: 0,
                upc: "0000".to_string(),
                description: String::new(),
            },
            BookRecord {
                title: "Ghost".to_string(),
                category: "Poetry".to_string(),
                price: String::new(),
                stock: StockState::Unknown,
                available: 0,
                rating: 5,
                upc: "ffff".to_string(),
                description: "x".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::new(dir.path().join("out").join("books.csv"));

        let written = sink.write(&records()).await.unwrap();
        assert_eq!(load_csv(&written).unwrap(), records());
    }

    #[tokio::test]
    async fn test_header_and_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::new(dir.path().join("books.csv"));
        let path = sink.write(&records()[1..2]).await.unwrap();

        let contents = fs::read_to_string(path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("title,category,price,stock,available,rating,upc,description")
        );
        assert_eq!(
            lines.next(),
            Some("\"Out, Of Print\",Poetry,£0.00,Out of stock,0,0,0000,")
        );
    }

    #[tokio::test]
    async fn test_empty_set_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::new(dir.path().join("books.csv"));
        let path = sink.write(&[]).await.unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap().trim_end(),
            COLUMNS.join(",")
        );
        assert!(load_csv(&path).unwrap().is_empty());
    }
}
