use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing::{info, warn};

use sn_core::{CompanyLookup, Error, NewsSource};

use crate::batch::BatchSummarizer;

pub const MSG_INVALID_DATES: &str = "Please enter valid dates in YYYY-MM-DD format.";
pub const MSG_INVERTED_RANGE: &str = "Start date must be before end date.";
pub const MSG_INVALID_TICKER: &str = "Invalid stock ticker.";
pub const MSG_LOOKUP_FAILED: &str = "Failed to retrieve company information.";
pub const MSG_FETCH_FAILED: &str = "Failed to retrieve news articles.";
pub const MSG_NO_ARTICLES: &str = "No articles found.";
pub const MSG_SIZE_LIMITED: &str = "Unable to process articles due to size limitations.";

const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Thin orchestration over the collaborators: validates inputs, resolves the
/// company name, fetches articles and runs the batching engine.
///
/// Every failure is absorbed into a user-facing message; callers (the web
/// handler, the CLI) always get a plain string back.
pub struct StockNewsSummarizer {
    lookup: Arc<dyn CompanyLookup>,
    source: Arc<dyn NewsSource>,
    summarizer: BatchSummarizer,
}

impl StockNewsSummarizer {
    pub fn new(
        lookup: Arc<dyn CompanyLookup>,
        source: Arc<dyn NewsSource>,
        summarizer: BatchSummarizer,
    ) -> Self {
        Self {
            lookup,
            source,
            summarizer,
        }
    }

    /// Absent dates default to a 30-day trailing window ending today.
    pub async fn summarize_stock_news(
        &self,
        ticker: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> String {
        let (start, end) = match resolve_range(start, end) {
            Some(range) => range,
            None => return MSG_INVALID_DATES.to_string(),
        };
        if start > end {
            return MSG_INVERTED_RANGE.to_string();
        }

        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return MSG_INVALID_TICKER.to_string();
        }

        let company_name = match self.lookup.resolve_company_name(&ticker).await {
            Ok(name) => name,
            Err(Error::InvalidTicker(_)) => return MSG_INVALID_TICKER.to_string(),
            Err(err) => {
                warn!(ticker = %ticker, error = %err, "company lookup failed");
                return MSG_LOOKUP_FAILED.to_string();
            }
        };

        let articles = match self
            .source
            .fetch_articles(&company_name, &ticker, start, end)
            .await
        {
            Ok(articles) => articles,
            Err(err) => {
                warn!(ticker = %ticker, error = %err, "article fetch failed");
                return MSG_FETCH_FAILED.to_string();
            }
        };
        if articles.is_empty() {
            return MSG_NO_ARTICLES.to_string();
        }

        info!(
            company = %company_name,
            articles = articles.len(),
            %start,
            %end,
            "summarizing stock news"
        );
        let summary = self.summarizer.summarize(&articles).await;
        if summary.is_empty() {
            MSG_SIZE_LIMITED.to_string()
        } else {
            summary
        }
    }
}

fn resolve_range(start: Option<&str>, end: Option<&str>) -> Option<(NaiveDate, NaiveDate)> {
    let today = Utc::now().date_naive();
    let end = match end {
        Some(s) => parse_date(s)?,
        None => today,
    };
    let start = match start {
        Some(s) => parse_date(s)?,
        None => today - Duration::days(DEFAULT_WINDOW_DAYS),
    };
    Some((start, end))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use sn_core::{Article, Result};

    use crate::models::DummyModel;

    struct StubLookup {
        response: fn(&str) -> Result<String>,
        calls: AtomicUsize,
    }

    impl StubLookup {
        fn new(response: fn(&str) -> Result<String>) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CompanyLookup for StubLookup {
        async fn resolve_company_name(&self, ticker: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.response)(ticker)
        }
    }

    struct StubSource {
        articles: Vec<Article>,
        fail: bool,
        seen: Mutex<Option<(String, String, NaiveDate, NaiveDate)>>,
    }

    impl StubSource {
        fn with_articles(articles: Vec<Article>) -> Arc<Self> {
            Arc::new(Self {
                articles,
                fail: false,
                seen: Mutex::new(None),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                articles: Vec::new(),
                fail: true,
                seen: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl NewsSource for StubSource {
        fn source(&self) -> &str {
            "stub"
        }

        async fn fetch_articles(
            &self,
            company_name: &str,
            ticker: &str,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<Article>> {
            *self.seen.lock().unwrap() = Some((
                company_name.to_string(),
                ticker.to_string(),
                start,
                end,
            ));
            if self.fail {
                return Err(Error::Feed("connection reset".to_string()));
            }
            Ok(self.articles.clone())
        }
    }

    fn article(title: &str) -> Article {
        Article::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            title,
            format!("https://news.example.com/{}", title.len()),
        )
    }

    fn pipeline(lookup: Arc<StubLookup>, source: Arc<StubSource>) -> StockNewsSummarizer {
        StockNewsSummarizer::new(
            lookup,
            source,
            BatchSummarizer::new(Arc::new(DummyModel)),
        )
    }

    #[tokio::test]
    async fn start_after_end_short_circuits() {
        let lookup = StubLookup::new(|_| Ok("NVIDIA Corporation".to_string()));
        let source = StubSource::with_articles(vec![article("headline")]);
        let p = pipeline(lookup.clone(), source.clone());

        let out = p
            .summarize_stock_news("NVDA", Some("2024-01-01"), Some("2023-12-01"))
            .await;

        assert_eq!(out, MSG_INVERTED_RANGE);
        // no collaborator was contacted
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
        assert!(source.seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_dates_are_rejected() {
        let lookup = StubLookup::new(|_| Ok("NVIDIA Corporation".to_string()));
        let source = StubSource::with_articles(vec![]);
        let p = pipeline(lookup.clone(), source);

        let out = p
            .summarize_stock_news("NVDA", Some("01/01/2024"), None)
            .await;

        assert_eq!(out, MSG_INVALID_DATES);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn dates_may_carry_surrounding_whitespace() {
        let lookup = StubLookup::new(|_| Ok("NVIDIA Corporation".to_string()));
        let source = StubSource::with_articles(vec![article("headline")]);
        let p = pipeline(lookup, source);

        let out = p
            .summarize_stock_news("NVDA", Some(" 2024-01-01 "), Some("2024-01-31"))
            .await;

        assert!(out.contains("headline"));
    }

    #[tokio::test]
    async fn unresolvable_ticker_is_reported() {
        let lookup = StubLookup::new(|t| Err(Error::InvalidTicker(t.to_string())));
        let source = StubSource::with_articles(vec![]);
        let p = pipeline(lookup, source);

        let out = p.summarize_stock_news("ZZZZ", None, None).await;
        assert_eq!(out, MSG_INVALID_TICKER);
    }

    #[tokio::test]
    async fn blank_ticker_is_reported_without_lookup() {
        let lookup = StubLookup::new(|_| Ok("whatever".to_string()));
        let source = StubSource::with_articles(vec![]);
        let p = pipeline(lookup.clone(), source);

        let out = p.summarize_stock_news("   ", None, None).await;
        assert_eq!(out, MSG_INVALID_TICKER);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lookup_outage_is_reported() {
        let lookup = StubLookup::new(|_| Err(Error::Lookup("timeout".to_string())));
        let source = StubSource::with_articles(vec![]);
        let p = pipeline(lookup, source);

        let out = p.summarize_stock_news("NVDA", None, None).await;
        assert_eq!(out, MSG_LOOKUP_FAILED);
    }

    #[tokio::test]
    async fn fetch_outage_is_reported() {
        let lookup = StubLookup::new(|_| Ok("NVIDIA Corporation".to_string()));
        let source = StubSource::failing();
        let p = pipeline(lookup, source);

        let out = p.summarize_stock_news("NVDA", None, None).await;
        assert_eq!(out, MSG_FETCH_FAILED);
    }

    #[tokio::test]
    async fn empty_result_set_is_reported() {
        let lookup = StubLookup::new(|_| Ok("NVIDIA Corporation".to_string()));
        let source = StubSource::with_articles(vec![]);
        let p = pipeline(lookup, source);

        let out = p.summarize_stock_news("NVDA", None, None).await;
        assert_eq!(out, MSG_NO_ARTICLES);
    }

    #[tokio::test]
    async fn happy_path_threads_company_name_through() {
        let lookup = StubLookup::new(|_| Ok("NVIDIA Corporation".to_string()));
        let source = StubSource::with_articles(vec![
            article("Nvidia beats estimates"),
            article("Nvidia announces buyback"),
        ]);
        let p = pipeline(lookup, source.clone());

        let out = p
            .summarize_stock_news("nvda", Some("2024-01-01"), Some("2024-01-31"))
            .await;

        assert!(out.contains("Nvidia beats estimates"));
        let seen = source.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.0, "NVIDIA Corporation");
        assert_eq!(seen.1, "NVDA"); // ticker normalized to uppercase
    }

    #[tokio::test]
    async fn absent_dates_default_to_a_trailing_month() {
        let lookup = StubLookup::new(|_| Ok("NVIDIA Corporation".to_string()));
        let source = StubSource::with_articles(vec![article("headline")]);
        let p = pipeline(lookup, source.clone());

        p.summarize_stock_news("NVDA", None, None).await;

        let (_, _, start, end) = source.seen.lock().unwrap().clone().unwrap();
        let today = Utc::now().date_naive();
        assert_eq!(end, today);
        assert_eq!(start, today - Duration::days(30));
    }
}
