use std::sync::Arc;

use basketry_core::config::{AppConfig, ConfigError, LoadOptions};
use basketry_core::CoOccurrenceIndex;
use basketry_loader::{source_for, DatasetSource, LoaderError};
use thiserror::Error;
use tracing::info;

use crate::state::IndexHandle;

pub struct Application {
    pub config: AppConfig,
    pub index: IndexHandle,
    pub dataset_source: Arc<dyn DatasetSource>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("dataset load failed: {0}")]
    Dataset(#[from] LoaderError),
}

/// Loads the dataset and builds the initial index before the server accepts
/// any query.
pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        dataset_source = %config.dataset.source,
        "starting application bootstrap"
    );

    let dataset_source: Arc<dyn DatasetSource> = Arc::from(source_for(&config.dataset)?);
    let line_items = dataset_source.load().await?;
    let index = CoOccurrenceIndex::build(&line_items);
    let stats = index.stats();

    info!(
        event_name = "system.bootstrap.index_built",
        correlation_id = "bootstrap",
        line_items = stats.line_items,
        eligible_orders = stats.eligible_orders,
        distinct_triples = stats.distinct_triples,
        "co-occurrence index built"
    );

    Ok(Application { config, index: IndexHandle::new(index), dataset_source })
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

#[cfg(test)]
mod tests {
    use basketry_core::config::{ConfigOverrides, LoadOptions};

    use crate::bootstrap::{bootstrap, BootstrapError};

    #[tokio::test]
    async fn bootstrap_fails_fast_when_the_dataset_is_missing() {
        let result = bootstrap(LoadOptions {
            config_path: Some("/nonexistent/basketry-test.toml".into()),
            overrides: ConfigOverrides {
                dataset_source: Some("/nonexistent/orders.csv".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await;

        assert!(matches!(result, Err(BootstrapError::Dataset(_))));
    }

    #[tokio::test]
    async fn bootstrap_builds_a_queryable_index() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("orders.csv");
        tokio::fs::write(
            &path,
            "Order ID,Product ID,Product Name,Order Date\n\
             O1,A,Alpha,2024-03-01\n\
             O1,B,Beta,2024-03-01\n\
             O1,C,Gamma,2024-03-01\n",
        )
        .await
        .unwrap();

        let app = bootstrap(LoadOptions {
            config_path: Some("/nonexistent/basketry-test.toml".into()),
            overrides: ConfigOverrides {
                dataset_source: Some(path.display().to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await
        .expect("bootstrap should succeed");

        let index = app.index.current();
        assert_eq!(index.len(), 1);
        assert_eq!(index.suggest("Alpha").len(), 2);
    }
}
