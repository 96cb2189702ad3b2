//! Dataset sources: where the line-item CSV comes from.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use basketry_core::config::DatasetConfig;
use basketry_core::LineItem;
use tracing::info;

use crate::{parse_line_items, LoaderError};

/// A place the order dataset can be loaded from.
///
/// Implementations fetch the raw CSV and hand back parsed records; the caller
/// decides when to (re)load and what to do with the result.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn load(&self) -> Result<Vec<LineItem>, LoaderError>;

    /// Human-readable location, for logs and status output.
    fn describe(&self) -> String;
}

/// Loads the dataset from a local CSV file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn load(&self) -> Result<Vec<LineItem>, LoaderError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|source| {
            LoaderError::Io { path: self.path.display().to_string(), source }
        })?;

        let line_items = parse_line_items(raw.as_bytes())?;
        info!(
            event_name = "dataset.load.file",
            path = %self.path.display(),
            line_items = line_items.len(),
            "dataset loaded from file"
        );

        Ok(line_items)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches the dataset from a remote CSV URL.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { url: url.into(), client }
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn load(&self) -> Result<Vec<LineItem>, LoaderError> {
        let http_error =
            |source: reqwest::Error| LoaderError::Http { url: self.url.clone(), source };

        let response =
            self.client.get(&self.url).send().await.and_then(|r| r.error_for_status()).map_err(http_error)?;
        let raw = response.text().await.map_err(http_error)?;

        let line_items = parse_line_items(raw.as_bytes())?;
        info!(
            event_name = "dataset.load.http",
            url = %self.url,
            line_items = line_items.len(),
            "dataset fetched from remote source"
        );

        Ok(line_items)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Picks a source implementation from the configured dataset location.
pub fn source_for(config: &DatasetConfig) -> Result<Box<dyn DatasetSource>, LoaderError> {
    let source = config.source.trim();
    if source.is_empty() {
        return Err(LoaderError::UnsupportedSource(config.source.clone()));
    }

    if source.starts_with("http://") || source.starts_with("https://") {
        Ok(Box::new(HttpSource::new(source, Duration::from_secs(config.fetch_timeout_secs))))
    } else {
        Ok(Box::new(FileSource::new(source)))
    }
}
