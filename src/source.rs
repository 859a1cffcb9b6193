use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::cache::TimedCache;
use crate::error::FetchError;
use crate::model::{Event, User};

/// One upstream collection, read through its own [`TimedCache`].
pub struct Source<T> {
    name: &'static str,
    url: String,
    client: reqwest::Client,
    cache: TimedCache<T>,
}

impl Source<Event> {
    pub fn events(
        url: impl Into<String>,
        client: reqwest::Client,
        cache: TimedCache<Event>,
    ) -> Self {
        Self::new("events", url, client, cache)
    }
}

impl Source<User> {
    pub fn users(
        url: impl Into<String>,
        client: reqwest::Client,
        cache: TimedCache<User>,
    ) -> Self {
        Self::new("users", url, client, cache)
    }
}

impl<T> Source<T>
where
    T: DeserializeOwned + Send + Sync,
{
    pub fn new(
        name: &'static str,
        url: impl Into<String>,
        client: reqwest::Client,
        cache: TimedCache<T>,
    ) -> Self {
        Self {
            name,
            url: url.into(),
            client,
            cache,
        }
    }

    /// Returns the cached collection while it is fresh, otherwise fetches,
    /// decodes and caches a new one.
    #[instrument(skip(self), fields(source = self.name))]
    pub async fn fetch(&self) -> Result<Arc<Vec<T>>, FetchError> {
        if let Some(items) = self.cache.read().await {
            debug!(count = items.len(), "serving from cache");
            return Ok(items);
        }

        debug!(url = %self.url, "sending HTTP request");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| self.transport(source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UpstreamStatus {
                source_name: self.name,
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| self.transport(source))?;

        // A `null` body is an empty collection.
        let items: Vec<T> = serde_json::from_slice::<Option<Vec<T>>>(&body)
            .map_err(|source| FetchError::Decode {
                source_name: self.name,
                source,
            })?
            .unwrap_or_default();

        info!(count = items.len(), "fetched from upstream");
        Ok(self.cache.write(items).await)
    }

    fn transport(&self, source: reqwest::Error) -> FetchError {
        FetchError::Transport {
            source_name: self.name,
            source,
        }
    }
}
