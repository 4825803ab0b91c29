use crate::core::errors::{PageError, PageResult};
use crate::http::ResponseType;
use crate::HttpResponse;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

use super::Scraper;

#[derive(Clone, Debug)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
    pub response_type: ResponseType,
}

impl MockResponse {
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: None,
            response_type: ResponseType::Html,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            delay: None,
            response_type: ResponseType::Text,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }
}

/// An in-memory site. Unknown URLs answer 404; every fetch is recorded.
#[derive(Clone, Default)]
pub struct MockScraper {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    fetched: Arc<RwLock<Vec<String>>>,
}

impl MockScraper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, body: impl Into<String>) -> PageResult<Self> {
        self.with_response(url, MockResponse::html(body))
    }

    pub fn with_response(self, url: &str, response: MockResponse) -> PageResult<Self> {
        self.set_response(url, response)?;
        Ok(self)
    }

    /// Replaces what `url` serves from now on.
    pub fn set_response(&self, url: &str, response: MockResponse) -> PageResult<()> {
        let key = Url::parse(url)
            .map_err(|e| PageError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?
            .to_string();
        self.responses.write().insert(key, response);
        Ok(())
    }

    /// URLs in the order they were fetched.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.read().clone()
    }
}

#[async_trait]
impl Scraper for MockScraper {
    async fn fetch_single(&self, url: &Url) -> PageResult<HttpResponse> {
        self.fetched.write().push(url.to_string());

        let response = self
            .responses
            .read()
            .get(url.as_str())
            .cloned()
            .unwrap_or_else(|| MockResponse::status(404));

        if let Some(delay) = response.delay {
            sleep(delay).await;
        }

        Ok(HttpResponse {
            url: url.clone(),
            status: response.status,
            body: response.body,
            response_type: response.response_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_registered_pages() {
        let scraper = MockScraper::new()
            .with_page("http://books.test/", "<html>root</html>")
            .unwrap();

        let url = Url::parse("http://books.test/").unwrap();
        let response = scraper.fetch(&url).await.unwrap();
        assert_eq!(response.body, "<html>root</html>");

        let missing = Url::parse("http://books.test/nope.html").unwrap();
        assert!(matches!(
            scraper.fetch(&missing).await,
            Err(PageError::Navigation { .. })
        ));

        assert_eq!(
            scraper.fetched(),
            vec!["http://books.test/", "http://books.test/nope.html"]
        );
    }
}
