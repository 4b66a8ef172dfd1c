pub mod fetcher;
pub mod parser;
pub mod types;

pub use fetcher::{FetchError, Fetcher};
pub use parser::{parse_feed_bytes, FeedParseError};
pub use types::{EntryLink, FeedEntry, FeedFormat, ParsedFeed};
