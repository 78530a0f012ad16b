//! Local file feed source

use super::{decode_records, ErrorSource};
use crate::error::FetchError;
use crate::types::ErrorRecord;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Reads the error feed from a JSON file on every fetch
pub struct FileErrorSource {
    path: PathBuf,
}

impl FileErrorSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ErrorSource for FileErrorSource {
    async fn fetch(&self) -> std::result::Result<Vec<ErrorRecord>, FetchError> {
        debug!("Reading error feed from {}", self.path.display());
        let body = tokio::fs::read(&self.path).await?;
        decode_records(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("errors.json");
        std::fs::write(&path, r#"[{"id": "1", "workflow": "Billing", "node": "Postgres"}]"#)
            .unwrap();

        let records = FileErrorSource::new(&path).fetch().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].node, "Postgres");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let source = FileErrorSource::new(dir.path().join("absent.json"));
        assert!(matches!(source.fetch().await, Err(FetchError::Io(_))));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("errors.json");
        std::fs::write(&path, "<html>502 Bad Gateway</html>").unwrap();

        let source = FileErrorSource::new(&path);
        let result = tokio_test::block_on(source.fetch());
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}
