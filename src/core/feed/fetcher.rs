use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

use crate::core::config::ScraperConfig;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("entry has no url")]
    MissingUrl,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status code: {0}")]
    HttpStatus(u16),
    #[error("response is not html: {0}")]
    NotHtml(String),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Request(err) if err.is_timeout())
    }
}

/// The only outbound HTTP surface: feed documents and deal pages.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    page_timeout: Duration,
    feed_timeout: Duration,
}

impl Fetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self {
            client,
            page_timeout: config.page_timeout,
            feed_timeout: config.feed_timeout,
        })
    }

    pub async fn fetch_feed(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.get(url, self.feed_timeout).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Fetches a deal page and returns its body as text.
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.get(url, self.page_timeout).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        if let Some(content_type) = content_type {
            if !content_type.to_ascii_lowercase().contains("html") {
                return Err(FetchError::NotHtml(content_type));
            }
        }
        Ok(response.text().await?)
    }

    async fn get(&self, url: &str, timeout: Duration) -> Result<reqwest::Response, FetchError> {
        if url.trim().is_empty() {
            return Err(FetchError::MissingUrl);
        }
        let response = self.client.get(url).timeout(timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }
        Ok(response)
    }
}
