pub mod cleaner;
pub mod content;
pub mod price;

pub use cleaner::clean_snippet;
pub use content::{collapse_whitespace, find_content, split_features, ContentSource, CONTENT_SOURCES};
pub use price::extract_price;
