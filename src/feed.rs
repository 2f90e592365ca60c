//! Feed and article data model, plus the JSON feed-dump store.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reading a feed dump.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read feed dump")]
    Io(#[from] std::io::Error),
    #[error("failed to parse feed dump")]
    Parse(#[from] serde_json::Error),
}

/// A subscribed feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub id: u64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single article within a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub feed_id: u64,
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
    /// Raw article markup; `None` when the feed supplied no body.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_starred: bool,
}

/// Source of raw article bodies, keyed by article id.
pub trait ContentSource {
    /// Raw markup for `id`, or `None` when the article is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing store cannot be read.
    fn article_content(&self, id: u64) -> Result<Option<String>, StoreError>;
}

/// In-memory snapshot of feeds and articles, loaded from a JSON dump.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedDump {
    #[serde(default)]
    pub feeds: Vec<Feed>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl FeedDump {
    /// Load a dump from a JSON file.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] when the file cannot be read,
    /// [`StoreError::Parse`] when it is not a valid dump.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn article(&self, id: u64) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    pub fn feed(&self, id: u64) -> Option<&Feed> {
        self.feeds.iter().find(|f| f.id == id)
    }
}

impl ContentSource for FeedDump {
    fn article_content(&self, id: u64) -> Result<Option<String>, StoreError> {
        Ok(self.article(id).and_then(|a| a.content.clone()))
    }
}
