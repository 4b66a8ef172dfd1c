pub mod enricher;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use enricher::{assemble_deal, EntryFields, PageEnricher};

/// A feed entry enriched from its source page.
///
/// `details` and `features` are always populated, falling back to the feed
/// summary when the page could not be used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrapedDeal {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub details: String,
    pub features: String,
    pub raw_price: Option<f64>,
}

impl ScrapedDeal {
    pub fn describe(&self) -> String {
        let price = self
            .raw_price
            .map(|price| price.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        format!(
            "Title: {}\nRaw Price: {}\nDetails: {}\nFeatures: {}\nURL: {}",
            self.title, price, self.details, self.features, self.url
        )
    }
}

impl fmt::Display for ScrapedDeal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.title)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deal {
    pub product_description: String,
    pub price: f64,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DealSelection {
    pub deals: Vec<Deal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Opportunity {
    pub deal: Deal,
    pub estimate: f64,
    pub discount: f64,
}
