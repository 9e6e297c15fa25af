//! Cached repository index files
//!
//! An index maps chart names to every version the repository publishes.
//! Lookups follow the index's own rules: membership is an exact string match
//! on the version, and resolution returns the newest entry that satisfies a
//! version constraint.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{WhatupError, WhatupResult};
use crate::version::semver::{parse_constraint, parse_version, satisfies};

/// One published version of a chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartVersion {
    #[serde(default)]
    pub name: String,

    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub deprecated: bool,
}

/// On-disk layout of `index.yaml`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndexFile {
    #[serde(default)]
    api_version: Option<String>,

    #[serde(default)]
    entries: BTreeMap<String, Vec<ChartVersion>>,
}

/// A loaded repository index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIndex {
    name: String,
    entries: BTreeMap<String, Vec<ChartVersion>>,
}

impl RepositoryIndex {
    /// Build an index from its entries, sorting each chart newest-first
    pub fn new(name: impl Into<String>, entries: BTreeMap<String, Vec<ChartVersion>>) -> Self {
        let mut entries = entries;
        for versions in entries.values_mut() {
            sort_newest_first(versions);
        }

        Self {
            name: name.into(),
            entries,
        }
    }

    /// Parse an index from YAML text
    pub fn from_yaml(name: &str, contents: &str) -> WhatupResult<Self> {
        let file: IndexFile = serde_yaml::from_str(contents).map_err(|e| {
            WhatupError::Fetch(format!("could not parse index for '{}': {}", name, e))
        })?;

        if file.api_version.is_none() {
            tracing::debug!("Index for '{}' has no apiVersion", name);
        }

        Ok(Self::new(name, file.entries))
    }

    /// Load an index from a cached `index.yaml`
    pub fn load(name: &str, path: &Path) -> WhatupResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            WhatupError::Fetch(format!(
                "could not load index file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let index = Self::from_yaml(name, &contents)?;
        tracing::debug!(
            "Loaded index '{}' from {} ({} charts)",
            name,
            path.display(),
            index.entries.len()
        );
        Ok(index)
    }

    /// Repository name this index was loaded for
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Published versions of a chart, newest first
    pub fn versions(&self, chart: &str) -> Option<&[ChartVersion]> {
        self.entries.get(chart).map(Vec::as_slice)
    }

    /// Whether the index lists exactly this chart version
    pub fn has(&self, chart: &str, version: &str) -> bool {
        self.entries
            .get(chart)
            .is_some_and(|versions| versions.iter().any(|v| v.version == version))
    }

    /// Resolve the newest entry satisfying `constraint`.
    ///
    /// An empty constraint means "newest stable". When the constraint is
    /// itself the literal version string of an entry, that entry wins.
    pub fn get(&self, chart: &str, constraint: &str) -> WhatupResult<&ChartVersion> {
        let versions = self.entries.get(chart).ok_or_else(|| {
            WhatupError::NotFound(format!("chart '{}' not found in '{}'", chart, self.name))
        })?;

        if versions.is_empty() {
            return Err(WhatupError::NotFound(format!(
                "chart '{}' has no versions in '{}'",
                chart, self.name
            )));
        }

        let req = parse_constraint(constraint)?;

        if !constraint.is_empty() {
            if let Some(exact) = versions.iter().find(|v| v.version == constraint) {
                return Ok(exact);
            }
        }

        versions
            .iter()
            .find(|entry| {
                parse_version(&entry.version).is_some_and(|version| satisfies(&req, &version))
            })
            .ok_or_else(|| {
                WhatupError::NotFound(format!(
                    "no chart version found for {}-{} in '{}'",
                    chart, constraint, self.name
                ))
            })
    }
}

/// Sort newest-first; unparseable versions keep their order at the end
fn sort_newest_first(versions: &mut [ChartVersion]) {
    versions.sort_by(|a, b| match (parse_version(&a.version), parse_version(&b.version)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
