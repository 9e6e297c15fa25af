//! Repository registry file (`repositories.yaml`)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{WhatupError, WhatupResult};

/// A configured chart repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryEntry {
    pub name: String,

    #[serde(default)]
    pub url: String,

    /// Path of the cached index, when the registry records one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<String>,
}

impl RepositoryEntry {
    /// Location of this repository's cached index.
    ///
    /// A recorded `cache` path is used as-is when absolute and resolved against
    /// `cache_dir` when relative. Without one, the index lives at
    /// `<cache_dir>/<name>-index.yaml`.
    pub fn index_path(&self, cache_dir: &Path) -> PathBuf {
        match self.cache.as_deref().filter(|c| !c.is_empty()) {
            Some(cache) if Path::new(cache).is_absolute() => PathBuf::from(cache),
            Some(cache) => cache_dir.join(cache),
            None => cache_dir.join(format!("{}-index.yaml", self.name)),
        }
    }
}

/// Parsed registry file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default)]
    pub repositories: Vec<RepositoryEntry>,
}

impl RepositoryFile {
    /// Load the registry file from disk
    pub fn load(path: &Path) -> WhatupResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            WhatupError::Fetch(format!(
                "could not load repositories file '{}': {}",
                path.display(),
                e
            ))
        })?;

        // An empty file is a registry without repositories
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&contents).map_err(|e| {
            WhatupError::Fetch(format!(
                "could not parse repositories file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, cache: Option<&str>) -> RepositoryEntry {
        RepositoryEntry {
            name: name.to_string(),
            url: format!("https://charts.example.com/{}", name),
            cache: cache.map(str::to_string),
        }
    }

    #[test]
    fn test_index_path_defaults_to_name() {
        let path = entry("stable", None).index_path(Path::new("/cache"));
        assert_eq!(path, PathBuf::from("/cache/stable-index.yaml"));
    }

    #[test]
    fn test_index_path_relative_cache() {
        let path = entry("stable", Some("stable-index.yaml")).index_path(Path::new("/cache"));
        assert_eq!(path, PathBuf::from("/cache/stable-index.yaml"));
    }

    #[test]
    fn test_index_path_absolute_cache() {
        let path = entry("stable", Some("/home/u/.helm/repository/cache/stable-index.yaml"))
            .index_path(Path::new("/cache"));
        assert_eq!(
            path,
            PathBuf::from("/home/u/.helm/repository/cache/stable-index.yaml")
        );
    }

    #[test]
    fn test_index_path_empty_cache_is_ignored() {
        let path = entry("incubator", Some("")).index_path(Path::new("/cache"));
        assert_eq!(path, PathBuf::from("/cache/incubator-index.yaml"));
    }
}
