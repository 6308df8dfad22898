//! Document loading.
//!
//! Logical paths such as `/docs/vectorAPI/api-reference.md` resolve first
//! against a [`Registry`] fixed at startup and then, if a [`Fetcher`] is
//! configured, through a single HTTP GET. [`ContentLoader::load`] is
//! fail-soft and returns an empty string when the document is unavailable;
//! [`ContentLoader::try_load`] reports why.

mod loader;
mod registry;

pub use loader::{ContentLoader, Fetcher};
pub use registry::{DOCS_MOUNT, Registry, RegistryBuilder};

use thiserror::Error;

/// Why a document could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path is not registered and no fetch fallback is configured.
    #[error("document not found: {path}")]
    NotFound { path: String },

    /// The request could not be sent or the body could not be read.
    #[error("failed to fetch {path}: {source}")]
    Network {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("fetching {path} returned HTTP {status}")]
    Status { path: String, status: u16 },
}

impl LoadError {
    /// The logical path that failed to load.
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path } | Self::Network { path, .. } | Self::Status { path, .. } => {
                path
            }
        }
    }
}
