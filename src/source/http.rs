//! HTTP feed source

use super::{decode_records, ErrorSource};
use crate::error::{FetchError, Result};
use crate::types::ErrorRecord;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Query parameter carrying the cache-busting timestamp
const CACHE_BUST_PARAM: &str = "_";

/// Fetches the error feed over HTTP
pub struct HttpErrorSource {
    client: Client,
    url: String,
}

impl HttpErrorSource {
    /// Create a source for `url` with a per-request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::from)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

/// Append `_=<millis>` so intermediaries never serve a cached feed
pub fn cache_busted_url(url: &str, millis: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", url, separator, CACHE_BUST_PARAM, millis)
}

#[async_trait]
impl ErrorSource for HttpErrorSource {
    async fn fetch(&self) -> std::result::Result<Vec<ErrorRecord>, FetchError> {
        let url = cache_busted_url(&self.url, Utc::now().timestamp_millis());
        debug!("Fetching error feed: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Error feed returned status {}", status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let records = decode_records(&body)?;
        debug!("Decoded {} records from {}", records.len(), self.url);
        Ok(records)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
