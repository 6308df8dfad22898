//! Immutable registry of documents known at startup.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Mount point for documents registered from a directory.
pub const DOCS_MOUNT: &str = "/docs";

/// Read-only map from logical document path to its text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: BTreeMap<String, String>,
}

impl Registry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Register every markdown file under `root` as `/docs/<relative path>`.
    ///
    /// # Errors
    /// Returns an error if `root` or one of its subdirectories cannot be read.
    /// Markdown files that cannot be read as UTF-8 are logged and skipped.
    /// Symlinked directories are not followed.
    pub fn from_dir(root: &Path) -> Result<Self> {
        let mut builder = Self::builder();
        collect_dir(root, root, &mut builder)?;
        let registry = builder.build();
        tracing::debug!(
            root = %root.display(),
            documents = registry.len(),
            "registered documents from directory"
        );
        Ok(registry)
    }

    /// Look up a document by logical path.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(&normalize_path(path)).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(&normalize_path(path))
    }

    /// All registered paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulates entries before freezing them into a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<String, String>,
}

impl RegistryBuilder {
    /// Register `content` under `path`. A later insert for the same path wins.
    #[must_use]
    pub fn insert(mut self, path: &str, content: impl Into<String>) -> Self {
        self.entries.insert(normalize_path(path), content.into());
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }
}

fn collect_dir(root: &Path, dir: &Path, builder: &mut RegistryBuilder) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read docs dir {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to read file type of {}", path.display()))?;
        if file_type.is_dir() {
            collect_dir(root, &path, builder)?;
            continue;
        }
        // Symlinked directories can loop back to an ancestor.
        if file_type.is_symlink() && path.is_dir() {
            tracing::debug!(path = %path.display(), "skipping symlinked directory");
            continue;
        }
        if !crate::document::is_markdown_file(&path) {
            continue;
        }

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let logical = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "skipping unreadable document"
                );
                continue;
            }
        };

        builder
            .entries
            .insert(normalize_path(&format!("{DOCS_MOUNT}/{logical}")), content);
    }

    Ok(())
}

/// Ensure a registry key carries exactly one leading slash.
fn normalize_path(path: &str) -> String {
    format!("/{}", path.trim().trim_start_matches('/'))
}
