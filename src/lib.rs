pub mod core;

use std::sync::Arc;

pub use crate::core::collector::{FeedCollector, DEFAULT_FEEDS};
pub use crate::core::config::{ConfigError, ScraperConfig};
pub use crate::core::deal::{Deal, DealSelection, Opportunity, PageEnricher, ScrapedDeal};
pub use crate::core::extract::{clean_snippet, extract_price};
pub use crate::core::feed::{FeedEntry, FetchError};
pub use crate::core::log::{MemoryLog, ScrapeLog, ScrapeWarning, TracingLog};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Collects deals from the default feeds and prints them as JSON on stdout.
pub async fn run() -> Result<(), RunError> {
    let config = ScraperConfig::from_env()?;
    let collector = FeedCollector::with_default_feeds(&config, Arc::new(TracingLog))?;
    let deals = collector.collect_all().await;
    println!("{}", render_deals(&deals)?);
    Ok(())
}

fn render_deals(deals: &[ScrapedDeal]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(deals)
}
