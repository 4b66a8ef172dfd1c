use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeedFormat {
    XmlFeed,
    JsonFeed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryLink {
    pub href: String,
    pub rel: Option<String>,
}

/// One item of a syndication feed, as loosely as the feed delivered it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub links: Vec<EntryLink>,
    /// Permalink used when `links` is empty.
    pub link: Option<String>,
}

impl FeedEntry {
    /// Summary text, falling through to the description when the summary is blank.
    pub fn summary_text(&self) -> &str {
        self.summary
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .or(self.description.as_deref())
            .unwrap_or_default()
    }

    pub fn resolved_url(&self) -> &str {
        match self.links.first() {
            Some(link) => &link.href,
            None => self.link.as_deref().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedFeed {
    pub format: FeedFormat,
    pub title: String,
    pub entries: Vec<FeedEntry>,
}
