pub mod config;
pub mod crawling;
pub mod errors;
pub mod record;

pub use config::CrawlConfig;
pub use crawling::{CrawlSummary, Crawler, TraversalState};
pub use errors::{
    ExtractionCause, ExtractionError, FieldError, PageError, PageResult, ScraperError,
    ScraperResult,
};
pub use record::{BookRecord, RecordSet, StockState};
