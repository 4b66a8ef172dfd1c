use std::sync::LazyLock;

use regex::Regex;

/// Rupee sign, then "Rs"/"Rs.", then "INR". Earlier patterns win regardless of position.
static PRICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"(?i)₹\s*([\d,]+)", r"(?i)Rs\.?\s*([\d,]+)", r"(?i)INR\s*([\d,]+)"]
        .into_iter()
        .map(|pattern| Regex::new(pattern).expect("price pattern must compile"))
        .collect()
});

/// Returns the first Indian-rupee amount found in `text`.
///
/// `None` means no price was found, which callers keep distinct from a price of zero.
pub fn extract_price(text: &str) -> Option<f64> {
    PRICE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures_iter(text)
            .find_map(|caps| parse_amount(caps.get(1)?.as_str()))
    })
}

fn parse_amount(digits: &str) -> Option<f64> {
    let cleaned: String = digits.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}
