//! Pairing installed releases with the repository indices that publish them

use crate::error::WhatupResult;
use crate::release::InstalledRelease;
use crate::repo::RepositoryIndex;
use crate::version::resolver::{ChartVersionInfo, resolve_latest};

/// Compare every release against every index that lists its installed version.
///
/// Results are ordered by release, then by index. A release found in several
/// indices yields one entry per index; a release found in none yields nothing.
/// The first resolution failure aborts the whole pass.
pub fn match_releases(
    releases: &[InstalledRelease],
    indices: &[RepositoryIndex],
    include_prerelease: bool,
) -> WhatupResult<Vec<ChartVersionInfo>> {
    let mut results = Vec::new();

    for release in releases {
        let mut matched = false;

        for index in indices {
            if !index.has(&release.chart_name, &release.chart_version) {
                continue;
            }

            matched = true;
            let latest = resolve_latest(index, &release.chart_name, include_prerelease)?;
            results.push(ChartVersionInfo::for_release(release, latest));
        }

        if !matched {
            tracing::debug!(
                "Release '{}' ({}-{}) not found in any repository",
                release.name,
                release.chart_name,
                release.chart_version
            );
        }
    }

    Ok(results)
}
