use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::fs;

use crate::loader::error::LoaderError;

/// Backend that resolves a logical module name to a loaded value.
///
/// Sources are the pluggable half of the entrypoint loader: the
/// [`LoaderCache`](crate::loader::LoaderCache) handles memoization, a
/// `ModuleSource` does the actual fetching and decoding.
#[async_trait]
pub trait ModuleSource<V>: Send + Sync {
    async fn resolve(&self, name: &str) -> Result<Arc<V>, LoaderError>;
}

/// Resolves module names against a directory of JSON payload files.
///
/// The name `foo` maps to `<root>/foo.json`. Names may not escape the root
/// directory.
#[derive(Debug, Clone)]
pub struct JsonModuleSource {
    root: PathBuf,
}

impl JsonModuleSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn module_path(&self, name: &str) -> Result<PathBuf, LoaderError> {
        if name.is_empty()
            || name.contains("..")
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(LoaderError::NotFound {
                name: name.to_string(),
            });
        }
        Ok(self.root.join(format!("{}.json", name)))
    }
}

#[async_trait]
impl<V> ModuleSource<V> for JsonModuleSource
where
    V: DeserializeOwned + Send + Sync + 'static,
{
    async fn resolve(&self, name: &str) -> Result<Arc<V>, LoaderError> {
        let path = self.module_path(name)?;
        log::debug!("resolving module '{}' from {}", name, path.display());

        let bytes = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LoaderError::NotFound {
                    name: name.to_string(),
                }
            } else {
                LoaderError::Io {
                    name: name.to_string(),
                    source: Arc::new(e),
                }
            }
        })?;

        let value: V = serde_json::from_slice(&bytes).map_err(|e| LoaderError::Parse {
            name: name.to_string(),
            source: Arc::new(e),
        })?;

        Ok(Arc::new(value))
    }
}
