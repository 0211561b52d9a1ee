use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

use crate::core::dataset::{DatasetKind, DatasetProvider};

/// Reads datasets from local JSON files. Files are read wholesale on each
/// request; freshness is whatever the last aggregation run left on disk.
pub struct LocalFileProvider {
    data_dir: PathBuf,
}

impl LocalFileProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        LocalFileProvider {
            data_dir: data_dir.into(),
        }
    }
}

#[async_trait]
impl DatasetProvider for LocalFileProvider {
    async fn fetch(&self, kind: DatasetKind) -> Result<Value> {
        let path = self.data_dir.join(kind.file_name());
        debug!("Reading dataset from {}", path.display());

        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;
        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse dataset file: {}", path.display()))?;

        Ok(value)
    }
}
