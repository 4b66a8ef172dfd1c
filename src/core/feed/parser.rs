use feed_rs::model::Entry;
use serde::Deserialize;

use super::types::{EntryLink, FeedEntry, FeedFormat, ParsedFeed};

#[derive(Debug, thiserror::Error)]
pub enum FeedParseError {
    #[error("feed payload is empty")]
    EmptyPayload,
    #[error("xml feed parse error: {0}")]
    Xml(#[from] feed_rs::parser::ParseFeedError),
    #[error("json feed parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct JsonFeed {
    title: Option<String>,
    #[serde(default)]
    items: Vec<JsonFeedItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonFeedItem {
    id: Option<String>,
    title: Option<String>,
    url: Option<String>,
    external_url: Option<String>,
    summary: Option<String>,
    content_text: Option<String>,
    content_html: Option<String>,
}

/// Parses an RSS, Atom or JSON Feed payload.
pub fn parse_feed_bytes(raw: &[u8]) -> Result<ParsedFeed, FeedParseError> {
    let trimmed = raw.trim_ascii_start();
    if trimmed.is_empty() {
        return Err(FeedParseError::EmptyPayload);
    }
    if trimmed[0] == b'{' {
        return parse_json_feed(trimmed);
    }
    parse_xml_feed(trimmed)
}

fn parse_xml_feed(raw: &[u8]) -> Result<ParsedFeed, FeedParseError> {
    let feed = feed_rs::parser::parse(raw)?;
    let title = feed
        .title
        .as_ref()
        .map(|text| text.content.clone())
        .unwrap_or_else(|| "Untitled Feed".to_string());
    let entries = feed.entries.iter().map(entry_from_xml).collect();

    Ok(ParsedFeed {
        format: FeedFormat::XmlFeed,
        title,
        entries,
    })
}

fn parse_json_feed(raw: &[u8]) -> Result<ParsedFeed, FeedParseError> {
    let feed: JsonFeed = serde_json::from_slice(raw)?;
    let title = feed.title.unwrap_or_else(|| "Untitled Feed".to_string());
    let entries = feed
        .items
        .into_iter()
        .map(|item| {
            let links = item
                .url
                .or(item.external_url)
                .map(|href| vec![EntryLink { href, rel: None }])
                .unwrap_or_default();
            FeedEntry {
                title: item.title,
                summary: item.summary,
                description: item.content_html.or(item.content_text),
                links,
                link: item.id.filter(|id| is_http_url(id)),
            }
        })
        .collect();

    Ok(ParsedFeed {
        format: FeedFormat::JsonFeed,
        title,
        entries,
    })
}

fn entry_from_xml(entry: &Entry) -> FeedEntry {
    let title = entry.title.as_ref().map(|text| text.content.clone());
    let summary = entry.summary.as_ref().map(|text| text.content.clone());
    let description = entry
        .content
        .as_ref()
        .and_then(|content| content.body.clone());
    let links = entry
        .links
        .iter()
        .filter(|link| !link.href.trim().is_empty())
        .map(|link| EntryLink {
            href: link.href.clone(),
            rel: link.rel.clone(),
        })
        .collect();
    // RSS guids marked as permalinks come through as the entry id.
    let link = Some(entry.id.trim())
        .filter(|id| is_http_url(id))
        .map(ToString::to_string);

    FeedEntry {
        title,
        summary,
        description,
        links,
        link,
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
