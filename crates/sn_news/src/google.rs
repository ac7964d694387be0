use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use rss::{Channel, Item};
use tracing::debug;
use url::Url;

use sn_core::{Article, Error, NewsSource, Result};

/// Article source backed by the Google News RSS search feed.
#[derive(Debug, Clone)]
pub struct GoogleNewsSource {
    client: Client,
    base_url: String,
}

impl GoogleNewsSource {
    const BASE_URL: &'static str = "https://news.google.com/rss/search";

    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: Self::BASE_URL.to_string(),
        }
    }
}

impl Default for GoogleNewsSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsSource for GoogleNewsSource {
    fn source(&self) -> &str {
        "Google News"
    }

    async fn fetch_articles(
        &self,
        company_name: &str,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Article>> {
        let query = format!("\"{}\" OR {} stock", company_name, ticker);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query.as_str()),
                ("hl", "en-US"),
                ("gl", "US"),
                ("ceid", "US:en"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        let channel =
            Channel::read_from(&bytes[..]).map_err(|e| Error::Feed(e.to_string()))?;
        Ok(collect_articles(&channel, start, end))
    }
}

/// Walk the feed in document order, keeping items inside `[start, end]` and
/// dropping repeats of the same `(title, url)` pair. The dedup set lives
/// here, scoped to one fetch.
fn collect_articles(channel: &Channel, start: NaiveDate, end: NaiveDate) -> Vec<Article> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut articles = Vec::new();

    for item in channel.items() {
        let article = match parse_item(item) {
            Some(article) => article,
            None => {
                debug!(title = ?item.title(), "skipping malformed feed item");
                continue;
            }
        };
        if article.published_at < start || article.published_at > end {
            continue;
        }
        if seen.insert((article.title.clone(), article.url.clone())) {
            articles.push(article);
        }
    }

    articles
}

fn parse_item(item: &Item) -> Option<Article> {
    let title = item.title()?.trim().to_string();
    let link = item.link()?.trim().to_string();
    Url::parse(&link).ok()?;
    let published = DateTime::parse_from_rfc2822(item.pub_date()?)
        .ok()?
        .date_naive();
    Some(Article::new(published, title, link))
}
