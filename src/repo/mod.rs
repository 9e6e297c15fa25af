//! Locally cached chart repositories
//!
//! The registry file enumerates configured repositories; each one has a cached
//! index listing the charts it publishes.

pub mod index;
pub mod repositories;

pub use index::{ChartVersion, RepositoryIndex};
pub use repositories::{RepositoryEntry, RepositoryFile};

use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;

use crate::error::WhatupResult;

/// Source of repository indices
#[cfg_attr(test, automock)]
pub trait IndexSource {
    /// Load every configured repository index, in registry order
    fn load_indices(&self) -> WhatupResult<Vec<RepositoryIndex>>;
}

/// Indices read from a registry file and its cache directory
#[derive(Debug, Clone)]
pub struct LocalRepositories {
    registry_path: PathBuf,
    cache_dir: PathBuf,
}

impl LocalRepositories {
    pub fn new(registry_path: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry_path: registry_path.into(),
            cache_dir: cache_dir.into(),
        }
    }
}

impl IndexSource for LocalRepositories {
    fn load_indices(&self) -> WhatupResult<Vec<RepositoryIndex>> {
        tracing::debug!(
            "Loading repositories from {} (cache: {})",
            self.registry_path.display(),
            self.cache_dir.display()
        );

        let registry = RepositoryFile::load(&self.registry_path)?;

        registry
            .repositories
            .iter()
            .map(|repository| {
                RepositoryIndex::load(&repository.name, &repository.index_path(&self.cache_dir))
            })
            .collect()
    }
}
