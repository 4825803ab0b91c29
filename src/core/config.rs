use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::storage::StorageType;

pub const DEFAULT_START_URL: &str = "https://books.toscrape.com/";
pub const DEFAULT_OUTPUT_FILE: &str = "book.xlsx";

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub start_url: Url,
    pub navigation_timeout: Duration,
    pub headers: Vec<(String, String)>,
    pub output: StorageType,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            start_url: Url::parse(DEFAULT_START_URL).expect("default start url is valid"),
            navigation_timeout: Duration::from_secs(30),
            headers: Vec::new(),
            output: StorageType::Xlsx {
                path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            },
        }
    }
}

impl CrawlConfig {
    pub fn with_start_url(mut self, start_url: Url) -> Self {
        self.start_url = start_url;
        self
    }

    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    pub fn with_headers(mut self, headers: Vec<(&str, &str)>) -> Self {
        self.headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self
    }

    pub fn with_output(mut self, output: StorageType) -> Self {
        self.output = output;
        self
    }
}
