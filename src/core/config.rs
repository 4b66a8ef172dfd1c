use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120 Safari/537.36";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    /// Entries taken from the head of each feed.
    pub entries_per_feed: usize,
    /// Pause between consecutive entries, across feeds.
    pub entry_delay: Duration,
    pub page_timeout: Duration,
    pub feed_timeout: Duration,
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            entries_per_feed: 10,
            entry_delay: Duration::from_millis(400),
            page_timeout: Duration::from_secs(10),
            feed_timeout: Duration::from_secs(20),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScraperConfig {
    /// Reads overrides from the process environment, after loading `.env.local`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::from_filename(".env.local");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = read(&lookup, "DEAL_SCRAPER_ENTRIES_PER_FEED")? {
            config.entries_per_feed = value;
        }
        if let Some(millis) = read(&lookup, "DEAL_SCRAPER_ENTRY_DELAY_MS")? {
            config.entry_delay = Duration::from_millis(millis);
        }
        if let Some(secs) = read(&lookup, "DEAL_SCRAPER_PAGE_TIMEOUT_SECS")? {
            config.page_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = read(&lookup, "DEAL_SCRAPER_FEED_TIMEOUT_SECS")? {
            config.feed_timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = lookup("DEAL_SCRAPER_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            config.user_agent = agent.trim().to_string();
        }
        validate_config(&config)?;
        Ok(config)
    }
}

pub fn validate_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.page_timeout.is_zero() {
        return Err(ConfigError::Invalid {
            key: "DEAL_SCRAPER_PAGE_TIMEOUT_SECS",
            value: "0".to_string(),
        });
    }
    if config.feed_timeout.is_zero() {
        return Err(ConfigError::Invalid {
            key: "DEAL_SCRAPER_FEED_TIMEOUT_SECS",
            value: "0".to_string(),
        });
    }
    Ok(())
}

fn read<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Invalid { key, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_keeps_defaults() {
        let config = ScraperConfig::from_lookup(|_| None).expect("defaults are valid");
        assert_eq!(config, ScraperConfig::default());
        assert_eq!(config.entries_per_feed, 10);
        assert_eq!(config.entry_delay, Duration::from_millis(400));
        assert_eq!(config.page_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_are_applied() {
        let config = ScraperConfig::from_lookup(lookup_from(&[
            ("DEAL_SCRAPER_ENTRIES_PER_FEED", "3"),
            ("DEAL_SCRAPER_ENTRY_DELAY_MS", " 0 "),
            ("DEAL_SCRAPER_PAGE_TIMEOUT_SECS", "5"),
            ("DEAL_SCRAPER_USER_AGENT", "deal-bot/1.0"),
            ("DEAL_SCRAPER_FEED_TIMEOUT_SECS", ""),
        ]))
        .expect("overrides should parse");

        assert_eq!(config.entries_per_feed, 3);
        assert_eq!(config.entry_delay, Duration::ZERO);
        assert_eq!(config.page_timeout, Duration::from_secs(5));
        assert_eq!(config.feed_timeout, Duration::from_secs(20));
        assert_eq!(config.user_agent, "deal-bot/1.0");
    }

    #[test]
    fn unparsable_or_zero_values_are_rejected() {
        let err = ScraperConfig::from_lookup(lookup_from(&[("DEAL_SCRAPER_ENTRIES_PER_FEED", "ten")]))
            .expect_err("non-numeric value must fail");
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "DEAL_SCRAPER_ENTRIES_PER_FEED",
                value: "ten".to_string()
            }
        );

        assert!(ScraperConfig::from_lookup(lookup_from(&[("DEAL_SCRAPER_PAGE_TIMEOUT_SECS", "0")])).is_err());
    }
}
