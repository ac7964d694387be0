use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns the name of the news source
    fn source(&self) -> &str;

    /// Fetch articles mentioning the company within `[start, end]` inclusive,
    /// deduplicated by `(title, url)`, in fetch order. Malformed entries are
    /// skipped, not raised.
    async fn fetch_articles(
        &self,
        company_name: &str,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Article>>;
}

#[async_trait]
pub trait CompanyLookup: Send + Sync {
    /// Resolve a ticker symbol to the company's display name.
    ///
    /// Fails with [`Error::InvalidTicker`](crate::Error::InvalidTicker) when
    /// the ticker resolves to nothing, and [`Error::Lookup`](crate::Error::Lookup)
    /// when the provider itself could not be reached.
    async fn resolve_company_name(&self, ticker: &str) -> Result<String>;
}
