use log::{info, warn};

const TITLE_DISPLAY_CHARS: usize = 40;

/// Side-channel notified as the crawl progresses. Observers never influence
/// control flow.
pub trait ProgressObserver: Send + Sync {
    /// `index` is the 1-based position of the record in the result set.
    fn record_added(&self, index: usize, title: &str);

    fn item_skipped(&self, _category: &str, _item: &str, _reason: &str) {}

    fn category_skipped(&self, _category: &str, _reason: &str) {}

    fn finished(&self, total: usize);
}

/// Logs progress through the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn record_added(&self, index: usize, title: &str) {
        info!("Added book #{}: {}", index, truncate_title(title));
    }

    fn item_skipped(&self, category: &str, item: &str, reason: &str) {
        warn!("Skipped '{}' in {}: {}", truncate_title(item), category, reason);
    }

    fn category_skipped(&self, category: &str, reason: &str) {
        warn!("Skipped category {}: {}", category, reason);
    }

    fn finished(&self, total: usize) {
        info!("Crawl finished with {} books", total);
    }
}

pub fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_DISPLAY_CHARS {
        return title.to_string();
    }
    let mut short: String = title.chars().take(TITLE_DISPLAY_CHARS).collect();
    short.push_str("...");
    short
}
