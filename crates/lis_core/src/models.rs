use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural classification of a feed item, first matching signature wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostType {
    Image,
    Video,
    #[serde(rename = "External Video")]
    ExternalVideo,
    Article,
    #[serde(rename = "Shared Post")]
    SharedPost,
    Text,
}

impl Default for PostType {
    fn default() -> Self {
        Self::Text
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PostType::Image => "Image",
            PostType::Video => "Video",
            PostType::ExternalVideo => "External Video",
            PostType::Article => "Article",
            PostType::SharedPost => "Shared Post",
            PostType::Text => "Text",
        };
        f.write_str(s)
    }
}

/// One scraped feed item. Constructed once per fragment at scrape time and
/// immutable thereafter; a fragment without body text never becomes a record.
///
/// Engagement counts are kept as the raw leading tokens the page showed
/// ("120", "1,403", "2K") rather than parsed integers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub text: String,
    pub post_type: PostType,
    pub likes: String,
    pub comments: String,
    pub shares: String,
    /// Posting time formatted `DD-MM-YYYY HH:MM`; `None` when the date
    /// fragment was missing or unusable.
    pub date: Option<String>,
    pub is_repost: bool,
}
