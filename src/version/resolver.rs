//! Latest version resolution and release classification

use serde::Serialize;

use crate::error::WhatupResult;
use crate::release::InstalledRelease;
use crate::repo::RepositoryIndex;
use crate::version::semver::{DEVEL_CONSTRAINT, STABLE_CONSTRAINT};

/// Whether an installed release trails its repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReleaseStatus {
    /// Installed version is the latest one available
    Uptodate,
    /// A different version is available
    Outdated,
}

impl ReleaseStatus {
    /// Classify by string equality of the two versions
    pub fn classify(installed: &str, latest: &str) -> Self {
        if installed == latest {
            ReleaseStatus::Uptodate
        } else {
            ReleaseStatus::Outdated
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseStatus::Uptodate => "UPTODATE",
            ReleaseStatus::Outdated => "OUTDATED",
        }
    }
}

impl std::fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison of one release against one repository index
///
/// The status is derived from the two versions at construction and cannot be
/// set on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartVersionInfo {
    release_name: String,
    chart_name: String,
    installed_version: String,
    latest_version: String,
    status: ReleaseStatus,
}

impl ChartVersionInfo {
    pub fn new(
        release_name: impl Into<String>,
        chart_name: impl Into<String>,
        installed_version: impl Into<String>,
        latest_version: impl Into<String>,
    ) -> Self {
        let installed_version = installed_version.into();
        let latest_version = latest_version.into();
        let status = ReleaseStatus::classify(&installed_version, &latest_version);

        Self {
            release_name: release_name.into(),
            chart_name: chart_name.into(),
            installed_version,
            latest_version,
            status,
        }
    }

    /// Build the comparison for a release and the version resolved for it
    pub fn for_release(release: &InstalledRelease, latest_version: impl Into<String>) -> Self {
        Self::new(
            release.name.as_str(),
            release.chart_name.as_str(),
            release.chart_version.as_str(),
            latest_version,
        )
    }

    pub fn release_name(&self) -> &str {
        &self.release_name
    }

    pub fn chart_name(&self) -> &str {
        &self.chart_name
    }

    pub fn installed_version(&self) -> &str {
        &self.installed_version
    }

    pub fn latest_version(&self) -> &str {
        &self.latest_version
    }

    pub fn status(&self) -> ReleaseStatus {
        self.status
    }

    pub fn is_outdated(&self) -> bool {
        self.status == ReleaseStatus::Outdated
    }
}

/// Constraint used to pick the latest version under a pre-release policy
pub fn latest_constraint(include_prerelease: bool) -> &'static str {
    if include_prerelease {
        DEVEL_CONSTRAINT
    } else {
        STABLE_CONSTRAINT
    }
}

/// Resolve the latest version of `chart` in `index`
pub fn resolve_latest(
    index: &RepositoryIndex,
    chart: &str,
    include_prerelease: bool,
) -> WhatupResult<String> {
    let constraint = latest_constraint(include_prerelease);
    let latest = index.get(chart, constraint)?;

    tracing::debug!(
        "Latest '{}' in '{}' ({}): {}",
        chart,
        index.name(),
        constraint,
        latest.version
    );

    Ok(latest.version.clone())
}
