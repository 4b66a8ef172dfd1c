use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static FEATURES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bFeatures\b").expect("features pattern must compile"));

/// One step of the content-region search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// Text of the first element matching the selector.
    Region(&'static str),
    /// `content` attribute of the first matching `<meta>` tag.
    Meta(&'static str),
}

/// Deal-site, article and blog containers first, then page meta descriptions.
pub const CONTENT_SOURCES: &[ContentSource] = &[
    ContentSource::Region("div.deal-desc"),
    ContentSource::Region("div.content-section"),
    ContentSource::Region("div.description"),
    ContentSource::Region("div#content"),
    ContentSource::Region("article"),
    ContentSource::Region("div.post-content"),
    ContentSource::Region("div.entry-content"),
    ContentSource::Meta(r#"meta[name="description"]"#),
    ContentSource::Meta(r#"meta[property="og:description"]"#),
];

impl ContentSource {
    pub fn extract(&self, document: &Html) -> Option<String> {
        match *self {
            ContentSource::Region(selector) => {
                first_match(document, selector).map(|node| spaced_text(&node))
            }
            ContentSource::Meta(selector) => first_match(document, selector).map(|node| {
                node.value()
                    .attr("content")
                    .unwrap_or_default()
                    .to_string()
            }),
        }
    }
}

fn first_match<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    let found = document.select(&selector).next();
    found
}

/// Elements whose text is never rendered to the reader.
const HIDDEN_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Text nodes under `node`, leaving out scripts, styles and templates.
pub(crate) fn visible_text<'a>(node: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    node.descendants().filter_map(move |child| {
        let text = child.value().as_text()?;
        let hidden = child
            .ancestors()
            .take_while(|ancestor| ancestor.id() != node.id())
            .any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|element| HIDDEN_TEXT_TAGS.contains(&element.name()))
            });
        (!hidden).then_some(&**text)
    })
}

fn spaced_text(node: &ElementRef<'_>) -> String {
    visible_text(*node)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tries the sources in order and returns the first hit.
pub fn find_content(document: &Html, sources: &[ContentSource]) -> Option<String> {
    sources.iter().find_map(|source| source.extract(document))
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits normalized content at the first whole-word "Features" into
/// `(details, features)`. Without one, all of it is details.
pub fn split_features(content: &str) -> (String, String) {
    match FEATURES_RE.find(content) {
        Some(found) => (
            content[..found.start()].trim().to_string(),
            content[found.end()..].trim().to_string(),
        ),
        None => (content.trim().to_string(), String::new()),
    }
}
