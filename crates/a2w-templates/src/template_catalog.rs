//! Startup-time discovery of `*.tmpl` notification templates.
//!
//! The catalog is read once before the server accepts requests and is never
//! mutated afterwards; request handlers share it through an `Arc`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

/// Template used when a request does not name one.
pub const DEFAULT_TEMPLATE_NAME: &str = "base.tmpl";
/// File extension (without dot) of discoverable templates.
pub const TEMPLATE_EXTENSION: &str = "tmpl";

#[derive(Debug, Error)]
/// Enumerates supported `TemplateCatalogError` values.
pub enum TemplateCatalogError {
    #[error("failed to read template directory {}: {}", .path.display(), .source)]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read template file {}: {}", .path.display(), .source)]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no *.tmpl templates found in {}", .path.display())]
    NoTemplates { path: PathBuf },
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    path: PathBuf,
    source: String,
}

#[derive(Debug, Clone, Default)]
/// Immutable map from template file name to template source.
pub struct TemplateCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl TemplateCatalog {
    /// Loads every `*.tmpl` file directly inside `dir`, keyed by file name.
    pub fn load_dir(dir: &Path) -> Result<Self, TemplateCatalogError> {
        let read_dir = std::fs::read_dir(dir).map_err(|source| TemplateCatalogError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut entries = BTreeMap::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| TemplateCatalogError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file()
                || path.extension().and_then(|value| value.to_str()) != Some(TEMPLATE_EXTENSION)
            {
                continue;
            }
            let Some(name) = path.file_name().and_then(|value| value.to_str()) else {
                warn!(path = %path.display(), "skipping template with non UTF-8 file name");
                continue;
            };
            let name = name.to_string();
            let source = std::fs::read_to_string(&path).map_err(|source| {
                TemplateCatalogError::ReadTemplate {
                    path: path.clone(),
                    source,
                }
            })?;
            debug!(template = %name, path = %path.display(), "loaded notification template");
            entries.insert(name, CatalogEntry { path, source });
        }

        if entries.is_empty() {
            return Err(TemplateCatalogError::NoTemplates {
                path: dir.to_path_buf(),
            });
        }
        info!(
            dir = %dir.display(),
            count = entries.len(),
            "template catalog loaded"
        );
        Ok(Self { entries })
    }

    /// Builds a catalog from in-memory `(name, source)` pairs.
    pub fn from_sources<I, N, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        let entries = sources
            .into_iter()
            .map(|(name, source)| {
                let name = name.into();
                let entry = CatalogEntry {
                    path: PathBuf::from(&name),
                    source: source.into(),
                };
                (name, entry)
            })
            .collect();
        Self { entries }
    }

    pub fn source(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|entry| entry.source.as_str())
    }

    pub fn path(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(|entry| entry.path.as_path())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps the `tmpl` query prefix to a catalog key, defaulting to `base.tmpl`.
pub fn resolve_template_name(prefix: Option<&str>) -> String {
    match prefix.map(str::trim).filter(|value| !value.is_empty()) {
        Some(prefix) => format!("{prefix}.{TEMPLATE_EXTENSION}"),
        None => DEFAULT_TEMPLATE_NAME.to_string(),
    }
}
