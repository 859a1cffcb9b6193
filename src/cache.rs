use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

pub struct Config {
    pub enabled: bool,
    pub ttl: Duration,
}

struct Entry<T> {
    items: Arc<Vec<T>>,
    fetched_at: Instant,
}

/// Last fetched collection of a source, valid for `ttl` after it was written.
///
/// Readers share the lock and only clone the snapshot's `Arc`, so a write
/// swaps the whole collection at once and never exposes a partial one.
pub struct TimedCache<T> {
    enabled: bool,
    inner: RwLock<Option<Entry<T>>>,
    ttl: Duration,
}

impl<T> TimedCache<T>
where
    T: Send + Sync,
{
    pub fn new(config: Config) -> Self {
        Self {
            enabled: config.enabled && !config.ttl.is_zero(),
            ttl: config.ttl,
            inner: RwLock::new(None),
        }
    }

    /// Returns the cached items while they are fresh, `None` on a miss.
    pub async fn read(&self) -> Option<Arc<Vec<T>>> {
        if !self.enabled {
            return None;
        }

        let inner = self.inner.read().await;
        let entry = inner.as_ref()?;

        if entry.fetched_at.elapsed() < self.ttl {
            Some(Arc::clone(&entry.items))
        } else {
            None
        }
    }

    pub async fn write(&self, items: Vec<T>) -> Arc<Vec<T>> {
        let arcd = Arc::new(items);
        if !self.enabled {
            return arcd;
        }

        *self.inner.write().await = Some(Entry {
            items: Arc::clone(&arcd),
            fetched_at: Instant::now(),
        });

        arcd
    }
}
