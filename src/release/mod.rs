//! Installed releases tracked by the release manager

pub mod storage;

pub use storage::{HelmStorage, StorageDriver};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

use crate::error::WhatupResult;

/// Snapshot of one deployed release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledRelease {
    /// Release name, unique per namespace
    pub name: String,
    pub namespace: String,
    pub revision: i64,
    pub chart_name: String,
    pub chart_version: String,
}

/// Source of installed releases
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// List the currently deployed releases
    async fn list_releases(&self) -> WhatupResult<Vec<InstalledRelease>>;
}
