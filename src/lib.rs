pub mod config;
pub mod delivery;
pub mod fetcher;
pub mod filter;
pub mod formatter;
pub mod parser;
pub mod relay;
pub mod source;
pub mod summarizer;
pub mod types;
pub mod watermark;

pub use config::Config;
pub use delivery::{Deliver, WebhookDeliverer};
pub use fetcher::{FetchConfig, Fetcher};
pub use parser::FeedParser;
pub use relay::{Relay, RelayOutcome};
pub use source::{FeedSource, RssFeedSource};
pub use summarizer::{Summarize, VertexSummarizer};
pub use types::*;
pub use watermark::WatermarkStore;
