use crate::core::errors::{PageError, PageResult};
use crate::HttpResponse;
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use url::Url;

/// Transport used by [`crate::page::DocumentPage`] to load views.
#[async_trait]
pub trait Scraper: Send + Sync {
    async fn fetch_single(&self, url: &Url) -> PageResult<HttpResponse>;

    /// Fetches `url` once. Error statuses are navigation failures; nothing
    /// is retried.
    async fn fetch(&self, url: &Url) -> PageResult<HttpResponse> {
        let start_time = Utc::now();
        info!("Fetching URL: {}", url);

        let response = self.fetch_single(url).await?;
        debug!(
            "Received response: status={}, body_length={}, elapsed={}ms",
            response.status,
            response.body.len(),
            Utc::now()
                .signed_duration_since(start_time)
                .num_milliseconds()
        );

        if !response.is_success() {
            return Err(PageError::navigation(
                url,
                format!("HTTP status {}", response.status),
            ));
        }

        Ok(response)
    }
}
