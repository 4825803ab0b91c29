use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::progress::ProgressObserver;

#[derive(Debug, Clone, Serialize)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub records: usize,
    pub skipped_items: usize,
    pub skipped_categories: usize,
    pub records_per_category: HashMap<String, usize>,
    pub skip_reasons: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<CrawlStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(CrawlStats {
                start_time: Utc::now(),
                end_time: None,
                records: 0,
                skipped_items: 0,
                skipped_categories: 0,
                records_per_category: HashMap::new(),
                skip_reasons: Vec::new(),
            })),
        }
    }

    pub fn record_category(&self, category: &str) {
        *self
            .stats
            .write()
            .records_per_category
            .entry(category.to_string())
            .or_insert(0) += 1;
    }

    pub fn get_stats(&self) -> CrawlStats {
        self.stats.read().clone()
    }

    pub fn print_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        println!("\nCrawl Statistics:");
        println!("=================");
        println!("Duration: {} seconds", duration.num_seconds());
        println!("Books: {}", stats.records);
        println!("Skipped Books: {}", stats.skipped_items);
        println!("Skipped Categories: {}", stats.skipped_categories);

        if !stats.records_per_category.is_empty() {
            println!("\nBooks per Category:");
            let mut categories: Vec<_> = stats.records_per_category.iter().collect();
            categories.sort();
            for (category, count) in categories {
                println!("  {}: {}", category, count);
            }
        }

        if !stats.skip_reasons.is_empty() {
            println!("\nSkipped:");
            for reason in &stats.skip_reasons {
                println!("  {}", reason);
            }
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for StatsTracker {
    fn record_added(&self, index: usize, _title: &str) {
        self.stats.write().records = index;
    }

    fn item_skipped(&self, category: &str, item: &str, reason: &str) {
        let mut stats = self.stats.write();
        stats.skipped_items += 1;
        stats
            .skip_reasons
            .push(format!("{} / {}: {}", category, item, reason));
    }

    fn category_skipped(&self, category: &str, reason: &str) {
        let mut stats = self.stats.write();
        stats.skipped_categories += 1;
        stats.skip_reasons.push(format!("{}: {}", category, reason));
    }

    fn finished(&self, total: usize) {
        let mut stats = self.stats.write();
        stats.records = total;
        stats.end_time = Some(Utc::now());
    }
}
