use async_trait::async_trait;
use reqwest::{header, Client, ClientBuilder};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::Scraper;
use crate::core::errors::{PageError, PageResult};
use crate::http::ResponseType;
use crate::HttpResponse;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum HttpScraperError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] header::InvalidHeaderName),
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
}

#[derive(Clone)]
pub struct HttpScraper {
    client: Client,
    headers: header::HeaderMap,
    timeout: Option<Duration>,
}

impl HttpScraper {
    pub fn new() -> Result<Self, HttpScraperError> {
        let client = ClientBuilder::new()
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            headers: header::HeaderMap::new(),
            timeout: None,
        })
    }

    /// Bounds every request at the transport level.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, HttpScraperError> {
        self.timeout = Some(timeout);
        self.rebuild()?;
        Ok(self)
    }

    pub fn with_headers<K, V>(mut self, headers: &[(K, V)]) -> Result<Self, HttpScraperError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in headers {
            let name = header::HeaderName::from_bytes(key.as_ref().as_bytes())?;
            let value = header::HeaderValue::from_str(value.as_ref())?;
            self.headers.insert(name, value);
        }

        self.rebuild()?;
        Ok(self)
    }

    fn rebuild(&mut self) -> Result<(), HttpScraperError> {
        // default_headers runs last so a configured user-agent wins
        let mut builder = ClientBuilder::new()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(self.headers.clone());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        self.client = builder.build()?;
        Ok(())
    }

    fn detect_content_type(content_type: Option<&str>, body: &str) -> ResponseType {
        if let Some(content_type) = content_type {
            if content_type.contains("text/html") {
                ResponseType::Html
            } else if content_type.contains("application/json") {
                ResponseType::Json
            } else if content_type.contains("text/") {
                ResponseType::Text
            } else {
                ResponseType::Binary
            }
        } else if body.trim_start().starts_with("<!DOCTYPE")
            || body.trim_start().starts_with("<html")
        {
            ResponseType::Html
        } else {
            ResponseType::Text
        }
    }

    fn transport_error(&self, url: &Url, error: reqwest::Error) -> PageError {
        match self.timeout {
            Some(timeout) if error.is_timeout() => PageError::NavigationTimeout {
                url: url.to_string(),
                timeout,
            },
            _ => PageError::navigation(url, HttpScraperError::HttpError(error)),
        }
    }
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn fetch_single(&self, url: &Url) -> PageResult<HttpResponse> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status().as_u16();
        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let response_type = Self::detect_content_type(content_type.as_deref(), &body);

        Ok(HttpResponse {
            url: final_url,
            status,
            body,
            response_type,
        })
    }
}
