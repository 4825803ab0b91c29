use async_trait::async_trait;
use std::path::PathBuf;

use crate::core::record::BookRecord;
use crate::ScraperResult;

/// Persists the final record set, in order, once the crawl is done.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Returns the location written to.
    async fn write(&self, records: &[BookRecord]) -> ScraperResult<PathBuf>;
}
