//! Registry lookup with an HTTP fallback.

use super::{LoadError, Registry};

/// Retrieves documents over HTTP relative to a base URL.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    base_url: String,
}

impl Fetcher {
    /// Create a fetcher for documents served under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a fetcher that reuses an existing client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Join the base URL and a logical path with exactly one slash.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Issue a single GET for `path`. Any 2xx response is success.
    ///
    /// # Errors
    /// Returns [`LoadError::Network`] if the request fails or the body cannot
    /// be read, and [`LoadError::Status`] for a non-success status.
    pub async fn fetch(&self, path: &str) -> Result<String, LoadError> {
        let url = self.url_for(path);
        tracing::debug!(%url, "fetching document");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| LoadError::Network {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| LoadError::Network {
            path: path.to_string(),
            source,
        })
    }
}

/// Resolves logical document paths to their text.
#[derive(Debug, Clone, Default)]
pub struct ContentLoader {
    registry: Registry,
    fetcher: Option<Fetcher>,
}

impl ContentLoader {
    /// Create a loader backed only by `registry`.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            fetcher: None,
        }
    }

    /// Fall back to `fetcher` for paths missing from the registry.
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: Fetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Documents served without a fetch.
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Look up `path` in the registry without touching the network.
    pub fn load_registered(&self, path: &str) -> Option<&str> {
        self.registry.get(path)
    }

    /// Load `path`, reporting why it is unavailable.
    ///
    /// # Errors
    /// Returns [`LoadError::NotFound`] when the path is not registered and no
    /// fetcher is configured, or the fetcher's error otherwise.
    pub async fn try_load(&self, path: &str) -> Result<String, LoadError> {
        if let Some(content) = self.registry.get(path) {
            tracing::debug!(path, "document served from registry");
            return Ok(content.to_string());
        }

        match &self.fetcher {
            Some(fetcher) => fetcher.fetch(path).await,
            None => Err(LoadError::NotFound {
                path: path.to_string(),
            }),
        }
    }

    /// Load `path`, returning an empty string if it is unavailable.
    ///
    /// The failure is logged. Callers cannot tell an empty document from a
    /// failed load; use [`Self::try_load`] when that matters.
    pub async fn load(&self, path: &str) -> String {
        match self.try_load(path).await {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path, error = %err, "content unavailable");
                String::new()
            }
        }
    }
}
