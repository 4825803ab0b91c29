use super::{CsvSink, JsonSink, RecordSink, XlsxSink};
use crate::core::record::BookRecord;
use crate::ScraperResult;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    Xlsx { path: PathBuf },
    Csv { path: PathBuf },
    Json { path: PathBuf },
}

#[derive(Debug, Clone)]
pub enum Storage {
    Xlsx(Box<XlsxSink>),
    Csv(Box<CsvSink>),
    Json(Box<JsonSink>),
}

#[async_trait]
impl RecordSink for Storage {
    async fn write(&self, records: &[BookRecord]) -> ScraperResult<PathBuf> {
        match self {
            Storage::Xlsx(sink) => sink.write(records).await,
            Storage::Csv(sink) => sink.write(records).await,
            Storage::Json(sink) => sink.write(records).await,
        }
    }
}

pub fn create_sink(storage_type: &StorageType) -> Storage {
    match storage_type {
        StorageType::Xlsx { path } => Storage::Xlsx(Box::new(XlsxSink::new(path))),
        StorageType::Csv { path } => Storage::Csv(Box::new(CsvSink::new(path))),
        StorageType::Json { path } => Storage::Json(Box::new(JsonSink::new(path))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_factory_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let xlsx_path = dir.path().join("book.xlsx");
        let csv_path = dir.path().join("books.csv");
        let json_path = dir.path().join("books.json");

        let xlsx = create_sink(&StorageType::Xlsx {
            path: xlsx_path.clone(),
        });
        let csv = create_sink(&StorageType::Csv {
            path: csv_path.clone(),
        });
        let json = create_sink(&StorageType::Json {
            path: json_path.clone(),
        });

        assert!(matches!(xlsx, Storage::Xlsx(_)));
        assert!(matches!(csv, Storage::Csv(_)));
        assert_eq!(xlsx.write(&[]).await.unwrap(), xlsx_path);
        assert!(xlsx_path.exists());
        assert_eq!(csv.write(&[]).await.unwrap(), csv_path);
        assert_eq!(json.write(&[]).await.unwrap(), json_path);
        assert!(json_path.exists());
    }
}
