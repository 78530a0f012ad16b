//! Error record sources
//!
//! The dashboard only needs "give me the current list of error records". Where
//! the list comes from is behind [`ErrorSource`]:
//! - [`HttpErrorSource`]: GET a JSON document, defeating caches on every call
//! - [`FileErrorSource`]: read a JSON document from disk (the bundled mock feed)

pub mod file;
pub mod http;

pub use file::FileErrorSource;
pub use http::HttpErrorSource;

use crate::config::DashboardConfig;
use crate::error::{FetchError, Result};
use crate::types::ErrorRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// Something that can produce the current error list
#[async_trait]
pub trait ErrorSource: Send + Sync {
    /// Fetch the full record set
    async fn fetch(&self) -> std::result::Result<Vec<ErrorRecord>, FetchError>;

    /// Human-readable location, for logs and the header
    fn describe(&self) -> String;
}

/// Decode a feed body into records
pub fn decode_records(body: &[u8]) -> std::result::Result<Vec<ErrorRecord>, FetchError> {
    Ok(serde_json::from_slice(body)?)
}

/// Build the source matching the configured feed location
pub fn from_config(config: &DashboardConfig) -> Result<Arc<dyn ErrorSource>> {
    if config.is_remote_feed() {
        let source = HttpErrorSource::new(config.feed_url.trim(), config.request_timeout())?;
        Ok(Arc::new(source))
    } else {
        Ok(Arc::new(FileErrorSource::new(config.feed_url.trim())))
    }
}
