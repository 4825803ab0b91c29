use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use super::base::RecordSink;
use crate::core::record::BookRecord;
use crate::ScraperResult;

/// Writes the record set as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl RecordSink for JsonSink {
    async fn write(&self, records: &[BookRecord]) -> ScraperResult<PathBuf> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::json!({
            "generated_at": Utc::now(),
            "count": records.len(),
            "records": records,
        });

        fs::write(&self.path, serde_json::to_string_pretty(&json)?)?;

        info!("Wrote {} books to {}", records.len(), self.path.display());
        Ok(self.path.clone())
    }
}
