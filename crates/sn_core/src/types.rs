use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub published_at: NaiveDate,
    pub title: String,
    pub url: String,
}

impl Article {
    pub fn new(published_at: NaiveDate, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            published_at,
            title: title.into(),
            url: url.into(),
        }
    }

    /// Deduplication identity: two articles are the same story when both
    /// title and url match, regardless of publish date.
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.title, &self.url)
    }
}
