use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::core::cache::Cache;
use crate::core::dataset::{DatasetKind, DatasetProvider};

/// Source-selection policy: try the primary (remote) provider, fall back to
/// the secondary (local files) on any error. The fallback is silent apart
/// from a debug log; only a failure of both surfaces to the caller.
pub struct FallbackProvider<P, S> {
    primary: P,
    secondary: S,
    cache: Arc<Cache<DatasetKind, Value>>,
}

impl<P, S> FallbackProvider<P, S> {
    pub fn new(primary: P, secondary: S, cache: Arc<Cache<DatasetKind, Value>>) -> Self {
        FallbackProvider {
            primary,
            secondary,
            cache,
        }
    }
}

#[async_trait]
impl<P, S> DatasetProvider for FallbackProvider<P, S>
where
    P: DatasetProvider,
    S: DatasetProvider,
{
    async fn fetch(&self, kind: DatasetKind) -> Result<Value> {
        if let Some(cached) = self.cache.get(&kind).await {
            return Ok(cached);
        }

        let value = match self.primary.fetch(kind).await {
            Ok(value) => value,
            Err(e) => {
                debug!("Remote fetch failed for {}: {}. Falling back to local data", kind, e);
                self.secondary.fetch(kind).await?
            }
        };

        self.cache.put(kind, value.clone()).await;
        Ok(value)
    }
}
