//! Quotes from the API Ninjas quote service.
//!
//! `/api/quotes` passes the provider's JSON through untouched; `/about` only
//! needs the first quote, see [`first_quote`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use ui::QuoteView;

pub const DEFAULT_CATEGORY: &str = "happiness";
const API_NINJAS_URL: &str = "https://api.api-ninjas.com/v1/quotes";

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("quote request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Source of quotes by category.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch(&self, category: &str) -> Result<Value, QuoteError>;
}

pub struct ApiNinjasQuotes {
    http: reqwest::Client,
    api_key: String,
    url: String,
}

impl ApiNinjasQuotes {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            url: API_NINJAS_URL.to_string(),
        }
    }
}

#[async_trait]
impl QuoteSource for ApiNinjasQuotes {
    async fn fetch(&self, category: &str) -> Result<Value, QuoteError> {
        let quotes = self
            .http
            .get(&self.url)
            .query(&[("category", category)])
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(quotes)
    }
}

#[derive(Debug, Deserialize)]
struct RawQuote {
    quote: String,
    #[serde(default)]
    author: String,
}

/// First quote of a provider response, if it has the expected shape.
pub fn first_quote(quotes: Value) -> Option<QuoteView> {
    let quotes: Vec<RawQuote> = serde_json::from_value(quotes).ok()?;
    quotes.into_iter().next().map(|q| QuoteView {
        quote: q.quote,
        author: q.author,
    })
}

/// Blank or missing keywords fall back to [`DEFAULT_CATEGORY`].
pub fn category_or_default(keyword: Option<&str>) -> &str {
    match keyword.map(str::trim) {
        Some(k) if !k.is_empty() => k,
        _ => DEFAULT_CATEGORY,
    }
}
