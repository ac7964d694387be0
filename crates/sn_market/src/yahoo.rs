use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use sn_core::{CompanyLookup, Error, Result};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; sn/0.1)";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(rename = "longname", default)]
    long_name: Option<String>,
    #[serde(rename = "shortname", default)]
    short_name: Option<String>,
}

impl Quote {
    fn display_name(&self) -> Option<String> {
        self.long_name
            .clone()
            .or_else(|| self.short_name.clone())
            .filter(|name| !name.is_empty())
    }
}

/// Ticker-to-company-name lookup against the Yahoo Finance search endpoint.
#[derive(Debug, Clone)]
pub struct YahooFinanceLookup {
    client: Client,
    base_url: String,
}

impl YahooFinanceLookup {
    const BASE_URL: &'static str = "https://query1.finance.yahoo.com/v1/finance/search";

    pub fn new() -> Result<Self> {
        // Yahoo rejects requests without a browser-looking user agent.
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: Self::BASE_URL.to_string(),
        })
    }
}

#[async_trait]
impl CompanyLookup for YahooFinanceLookup {
    async fn resolve_company_name(&self, ticker: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", ticker), ("quotesCount", "5"), ("newsCount", "0")])
            .send()
            .await
            .map_err(|e| Error::Lookup(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::Lookup(e.to_string()))?;

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::Lookup(e.to_string()))?;

        debug!(ticker, quotes = parsed.quotes.len(), "yahoo search response");
        pick_company_name(&parsed, ticker)
            .ok_or_else(|| Error::InvalidTicker(ticker.to_string()))
    }
}

/// Prefer the quote whose symbol matches the ticker exactly; otherwise fall
/// back to the first quote the search returned.
fn pick_company_name(response: &SearchResponse, ticker: &str) -> Option<String> {
    response
        .quotes
        .iter()
        .find(|q| {
            q.symbol
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(ticker))
        })
        .and_then(Quote::display_name)
        .or_else(|| response.quotes.iter().find_map(Quote::display_name))
}
