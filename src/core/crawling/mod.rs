mod crawler;


pub use crawler::{Category, CrawlSummary, Crawler, ItemTarget, TraversalState};
