pub mod core;
pub mod http;
pub mod page;
pub mod parser;
pub mod progress;
pub mod scrapers;
pub mod stats;
pub mod storage;

#[cfg(test)]
pub(crate) mod fixtures;

pub use crate::core::Crawler;
pub use crate::core::{BookRecord, CrawlConfig, ScraperError, ScraperResult, StockState};
pub use http::HttpResponse;
pub use page::{DocumentPage, Page};
pub use parser::RecordExtractor;
pub use progress::{LogProgress, ProgressObserver};
pub use scrapers::Scraper;
pub use stats::StatsTracker;
pub use storage::{create_sink, CsvSink, RecordSink, XlsxSink};
