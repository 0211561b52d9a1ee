use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::core::dataset::{DatasetKind, DatasetProvider};

/// Fetches datasets from the aggregation service over HTTP. The service
/// publishes each dataset as a static JSON document under `/data/`.
pub struct RemoteDatasetProvider {
    base_url: String,
}

impl RemoteDatasetProvider {
    pub fn new(base_url: &str) -> Self {
        RemoteDatasetProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl DatasetProvider for RemoteDatasetProvider {
    #[instrument(
        name = "RemoteDatasetFetch",
        skip(self),
        fields(dataset = %kind)
    )]
    async fn fetch(&self, kind: DatasetKind) -> Result<Value> {
        let url = format!("{}/data/{}", self.base_url, kind.file_name());
        debug!("Requesting dataset from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("polisight/0.1")
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for dataset: {} URL: {}", e, kind, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for dataset: {}",
                response.status(),
                kind
            ));
        }

        let text = response.text().await?;
        let value: Value = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", kind, e))?;

        Ok(value)
    }
}
