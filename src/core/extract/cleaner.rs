use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::content::visible_text;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<]+?>").expect("tag pattern must compile"));

/// Flattens a feed summary to one line of text.
///
/// When the snippet carries a `div.snippet.summary` wrapper only its text is kept;
/// any other snippet is returned as-is apart from newline flattening.
pub fn clean_snippet(html_snippet: &str) -> String {
    let result = snippet_summary_text(html_snippet).unwrap_or_else(|| html_snippet.to_string());
    result.replace('\n', " ")
}

fn snippet_summary_text(html_snippet: &str) -> Option<String> {
    let selector = Selector::parse("div.snippet.summary").ok()?;
    let fragment = Html::parse_fragment(html_snippet);
    let node = fragment.select(&selector).next()?;
    let text = visible_text(node)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    // Feeds sometimes escape their markup twice.
    let reparsed = Html::parse_fragment(&text);
    let plain = reparsed.root_element().text().collect::<String>();
    Some(TAG_RE.replace_all(&plain, "").trim().to_string())
}
