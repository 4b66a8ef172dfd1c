use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::core::config::ScraperConfig;
use crate::core::deal::{PageEnricher, ScrapedDeal};
use crate::core::feed::{parse_feed_bytes, FeedEntry, FeedParseError, FetchError, Fetcher};
use crate::core::log::{ScrapeLog, ScrapeWarning};

/// Indian deal aggregator feeds followed by deal subreddits.
pub const DEFAULT_FEEDS: &[&str] = &[
    "https://www.desidime.com/deals.rss",
    "https://www.desidime.com/stores/amazon-india.rss",
    "https://www.desidime.com/stores/flipkart.rss",
    "https://www.desidime.com/stores/reliance-digital.rss",
    "https://www.desidime.com/stores/tata-cliq.rss",
    "https://www.desidime.com/stores/croma.rss",
    "https://www.desidime.com/stores/ajio.rss",
    "https://www.desidime.com/stores/myntra.rss",
    "https://www.desidime.com/stores/nykaa.rss",
    "https://www.reddit.com/r/indiandeals/.rss",
    "https://www.reddit.com/r/IndianGaming/.rss",
    "https://www.reddit.com/r/buildapcsalesindia/.rss",
];

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] FeedParseError),
}

pub struct FeedCollector {
    feeds: Vec<String>,
    fetcher: Fetcher,
    enricher: PageEnricher,
    entries_per_feed: usize,
    entry_delay: Duration,
    log: Arc<dyn ScrapeLog>,
}

impl FeedCollector {
    pub fn new(
        feeds: Vec<String>,
        config: &ScraperConfig,
        log: Arc<dyn ScrapeLog>,
    ) -> Result<Self, reqwest::Error> {
        let fetcher = Fetcher::new(config)?;
        Ok(Self {
            feeds,
            enricher: PageEnricher::new(fetcher.clone(), log.clone()),
            fetcher,
            entries_per_feed: config.entries_per_feed,
            entry_delay: config.entry_delay,
            log,
        })
    }

    pub fn with_default_feeds(
        config: &ScraperConfig,
        log: Arc<dyn ScrapeLog>,
    ) -> Result<Self, reqwest::Error> {
        let feeds = DEFAULT_FEEDS.iter().map(ToString::to_string).collect();
        Self::new(feeds, config, log)
    }

    /// Collects deals from every feed, in feed-then-entry order. Feeds that
    /// fail are logged and contribute nothing.
    pub async fn collect_all(&self) -> Vec<ScrapedDeal> {
        let mut deals = Vec::new();
        let mut first_entry = true;

        for feed_url in &self.feeds {
            let entries = match self.load_feed(feed_url).await {
                Ok(entries) => entries,
                Err(err) => {
                    self.log.warn(ScrapeWarning::FeedSkipped {
                        feed_url: feed_url.clone(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };
            debug!(feed_url = %feed_url, entries = entries.len(), "feed parsed");

            for entry in entries.iter().take(self.entries_per_feed) {
                if !first_entry && !self.entry_delay.is_zero() {
                    tokio::time::sleep(self.entry_delay).await;
                }
                first_entry = false;

                deals.push(self.enricher.enrich(entry).await);
            }
        }

        info!(feeds = self.feeds.len(), deals = deals.len(), "collection finished");
        deals
    }

    async fn load_feed(&self, feed_url: &str) -> Result<Vec<FeedEntry>, FeedError> {
        let raw = self.fetcher.fetch_feed(feed_url).await?;
        Ok(parse_feed_bytes(&raw)?.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log::MemoryLog;
    use crate::core::test_support::spawn_test_server;
    use axum::http::header;
    use axum::routing::get;
    use axum::Router;
    use std::time::Instant;

    fn quiet_config() -> ScraperConfig {
        ScraperConfig {
            entry_delay: Duration::ZERO,
            page_timeout: Duration::from_millis(500),
            feed_timeout: Duration::from_millis(500),
            ..ScraperConfig::default()
        }
    }

    fn rss_with_items(base: &str, count: usize) -> String {
        let items: String = (1..=count)
            .map(|n| {
                format!(
                    "<item><title>Deal {n}</title><link>{base}/deals/{n}</link>\
                     <description>Deal {n} for Rs. {n}00</description></item>"
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Many</title>{items}</channel></rss>"#
        )
    }

    fn site(base: &str) -> Router {
        let deals_feed =
            include_str!("../../../fixtures/feeds/deals.rss.xml").replace("http://deals.test", base);
        let many_feed = rss_with_items(base, 12);
        let blank_feed = format!(
            r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Blank</title>
               <item><description></description></item>
               <item><title>Real deal</title><link>{base}/deals/1</link></item>
               </channel></rss>"#
        );

        Router::new()
            .route("/broken.rss", get(|| async { "this is not a feed" }))
            .route(
                "/deals.rss",
                get(move || async move { ([(header::CONTENT_TYPE, "application/rss+xml")], deals_feed) }),
            )
            .route("/many.rss", get(move || async move { many_feed }))
            .route("/blank.rss", get(move || async move { blank_feed }))
            .route(
                "/deals/airdopes",
                get(|| async {
                    (
                        [(header::CONTENT_TYPE, "text/html")],
                        include_str!("../../../fixtures/pages/deal-desc.html"),
                    )
                }),
            )
            .route(
                "/deals/{slug}",
                get(|| async { ([(header::CONTENT_TYPE, "text/html")], "<html><body></body></html>") }),
            )
    }

    #[tokio::test]
    async fn broken_feed_is_skipped_and_good_feed_kept_in_order() {
        let (base, server_task) = spawn_test_server(site).await;
        let log = Arc::new(MemoryLog::default());
        let feeds = vec![format!("{base}/broken.rss"), format!("{base}/deals.rss")];
        let collector =
            FeedCollector::new(feeds, &quiet_config(), log.clone()).expect("collector should build");

        let deals = collector.collect_all().await;

        let titles: Vec<&str> = deals.iter().map(|deal| deal.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "boAt Airdopes 141 at ₹999",
                "Prestige induction cooktop",
                "Kindle Paperwhite price drop"
            ]
        );
        assert_eq!(deals[0].raw_price, Some(999.0));
        assert_eq!(deals[0].features, "42 hours playback ENx noise cancellation");
        assert_eq!(deals[1].summary, "Induction cooktop at Rs. 1,899");
        assert_eq!(deals[1].details, "Induction cooktop at Rs. 1,899");
        assert_eq!(deals[1].raw_price, Some(1899.0));
        assert_eq!(deals[2].raw_price, Some(12999.0));

        let warnings = log.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            ScrapeWarning::FeedSkipped { feed_url, .. } if feed_url.ends_with("/broken.rss")
        ));

        server_task.abort();
    }

    #[tokio::test]
    async fn unreachable_feed_is_skipped() {
        let (base, server_task) = spawn_test_server(site).await;
        let log = Arc::new(MemoryLog::default());
        let feeds = vec![format!("{base}/missing.rss")];
        let collector =
            FeedCollector::new(feeds, &quiet_config(), log.clone()).expect("collector should build");

        assert!(collector.collect_all().await.is_empty());
        assert!(matches!(
            &log.warnings()[0],
            ScrapeWarning::FeedSkipped { reason, .. } if reason == "unexpected status code: 404"
        ));

        server_task.abort();
    }

    #[tokio::test]
    async fn takes_only_the_head_of_each_feed() {
        let (base, server_task) = spawn_test_server(site).await;
        let log = Arc::new(MemoryLog::default());
        let collector = FeedCollector::new(vec![format!("{base}/many.rss")], &quiet_config(), log)
            .expect("collector should build");

        let deals = collector.collect_all().await;

        assert_eq!(deals.len(), 10);
        assert_eq!(deals[0].title, "Deal 1");
        assert_eq!(deals[9].title, "Deal 10");
        assert_eq!(deals[9].raw_price, Some(1000.0));

        server_task.abort();
    }

    #[tokio::test]
    async fn empty_entry_still_yields_a_summary_only_deal() {
        let (base, server_task) = spawn_test_server(site).await;
        let log = Arc::new(MemoryLog::default());
        let collector =
            FeedCollector::new(vec![format!("{base}/blank.rss")], &quiet_config(), log.clone())
                .expect("collector should build");

        let deals = collector.collect_all().await;

        assert_eq!(deals.len(), 2);
        assert_eq!(deals[0].title, "");
        assert_eq!(deals[0].url, "");
        assert_eq!(deals[0].details, deals[0].summary);
        assert_eq!(deals[0].features, "");
        assert_eq!(deals[0].raw_price, None);
        assert_eq!(deals[1].title, "Real deal");
        assert_eq!(
            log.warnings(),
            vec![ScrapeWarning::PageFallback {
                url: String::new(),
                reason: "entry has no url".to_string(),
            }]
        );

        server_task.abort();
    }

    #[tokio::test]
    async fn delay_separates_consecutive_entries_across_feeds() {
        let (base, server_task) = spawn_test_server(site).await;
        let config = ScraperConfig {
            entries_per_feed: 2,
            entry_delay: Duration::from_millis(50),
            ..quiet_config()
        };
        let feeds = vec![format!("{base}/many.rss"), format!("{base}/many.rss")];
        let collector = FeedCollector::new(feeds, &config, Arc::new(MemoryLog::default()))
            .expect("collector should build");

        let started = Instant::now();
        let deals = collector.collect_all().await;

        assert_eq!(deals.len(), 4);
        assert!(started.elapsed() >= Duration::from_millis(150));

        server_task.abort();
    }

    #[test]
    fn default_feed_list_is_fixed() {
        assert_eq!(DEFAULT_FEEDS.len(), 12);
        assert!(DEFAULT_FEEDS.iter().all(|url| url.starts_with("https://")));
    }
}
