use std::sync::Arc;

use scraper::Html;
use tracing::debug;

use super::ScrapedDeal;
use crate::core::extract::{
    clean_snippet, collapse_whitespace, extract_price, find_content, split_features,
    CONTENT_SOURCES,
};
use crate::core::feed::{FeedEntry, FetchError, Fetcher};
use crate::core::log::{ScrapeLog, ScrapeWarning};

/// The parts of a deal that come straight from the feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    pub title: String,
    pub summary: String,
    pub url: String,
}

impl EntryFields {
    pub fn from_entry(entry: &FeedEntry) -> Self {
        Self {
            title: entry.title.as_deref().unwrap_or_default().trim().to_string(),
            summary: clean_snippet(entry.summary_text()),
            url: entry.resolved_url().trim().to_string(),
        }
    }
}

pub struct PageEnricher {
    fetcher: Fetcher,
    log: Arc<dyn ScrapeLog>,
}

impl PageEnricher {
    pub fn new(fetcher: Fetcher, log: Arc<dyn ScrapeLog>) -> Self {
        Self { fetcher, log }
    }

    /// Builds a deal from `entry`, fetching its page once. Never fails: a page
    /// that cannot be fetched degrades the deal to its feed summary.
    pub async fn enrich(&self, entry: &FeedEntry) -> ScrapedDeal {
        let fields = EntryFields::from_entry(entry);
        debug!(url = %fields.url, "fetching deal page");
        let page = self.fetcher.fetch_page(&fields.url).await;
        if let Err(err) = &page {
            self.log.warn(ScrapeWarning::PageFallback {
                url: fields.url.clone(),
                reason: err.to_string(),
            });
        }
        assemble_deal(fields, &page)
    }
}

pub fn assemble_deal(fields: EntryFields, page: &Result<String, FetchError>) -> ScrapedDeal {
    let EntryFields {
        title,
        summary,
        url,
    } = fields;

    let body = match page {
        Ok(body) => body,
        Err(_) => {
            let raw_price = extract_price(&summary);
            return ScrapedDeal {
                title,
                details: summary.clone(),
                summary,
                url,
                features: String::new(),
                raw_price,
            };
        }
    };

    let document = Html::parse_document(body);
    let content = find_content(&document, CONTENT_SOURCES).unwrap_or_else(|| summary.clone());
    let (details, features) = split_features(&collapse_whitespace(&content));
    let raw_price = extract_price(&details).or_else(|| extract_price(&summary));

    ScrapedDeal {
        title,
        summary,
        url,
        details,
        features,
        raw_price,
    }
}
