use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory dataset cache. Each dataset is fetched at most once per run.
#[derive(Clone)]
pub struct Cache<K, V>
where
    K: Eq + Hash + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Mutex<HashMap<K, V>>>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let cache = self.inner.lock().await;
        let value = cache.get(key).cloned();
        if value.is_some() {
            debug!(?key, "cache hit");
        } else {
            debug!(?key, "cache miss");
        }
        value
    }

    pub async fn put(&self, key: K, value: V) {
        let mut cache = self.inner.lock().await;
        debug!(?key, "cache put");
        cache.insert(key, value);
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Eq + Hash + Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}
