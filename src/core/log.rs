use std::fmt;
use std::sync::Mutex;

/// A failure the collection recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeWarning {
    FeedSkipped { feed_url: String, reason: String },
    PageFallback { url: String, reason: String },
}

impl fmt::Display for ScrapeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeWarning::FeedSkipped { feed_url, reason } => {
                write!(f, "failed to parse feed {feed_url}: {reason}")
            }
            ScrapeWarning::PageFallback { url, reason } => {
                write!(f, "failed to scrape {url}: {reason}")
            }
        }
    }
}

pub trait ScrapeLog: Send + Sync {
    fn warn(&self, warning: ScrapeWarning);
}

/// Forwards warnings to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingLog;

impl ScrapeLog for TracingLog {
    fn warn(&self, warning: ScrapeWarning) {
        match &warning {
            ScrapeWarning::FeedSkipped { feed_url, reason } => {
                tracing::warn!(feed_url = %feed_url, reason = %reason, "feed skipped");
            }
            ScrapeWarning::PageFallback { url, reason } => {
                tracing::warn!(url = %url, reason = %reason, "page fetch failed, using feed summary");
            }
        }
    }
}

/// Keeps warnings in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemoryLog {
    warnings: Mutex<Vec<ScrapeWarning>>,
}

impl MemoryLog {
    pub fn warnings(&self) -> Vec<ScrapeWarning> {
        self.warnings
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl ScrapeLog for MemoryLog {
    fn warn(&self, warning: ScrapeWarning) {
        if let Ok(mut guard) = self.warnings.lock() {
            guard.push(warning);
        }
    }
}
