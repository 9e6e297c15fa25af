//! Report pipeline
//!
//! Fetch installed releases, fetch repository indices, compare, render. Each
//! stage runs after the previous one completes and any error ends the run.

use std::io::Write;

use crate::config::ReportOptions;
use crate::error::WhatupResult;
use crate::release::ReleaseSource;
use crate::repo::IndexSource;
use crate::report;
use crate::version::match_releases;

pub const NO_RELEASES_MESSAGE: &str = "No releases found.";
pub const NO_REPOSITORIES_MESSAGE: &str =
    "No repositories found. Run `helm repo update` and re-try.";

/// Produce the report for the given release and index sources
pub async fn run<W: Write>(
    releases: &dyn ReleaseSource,
    indices: &dyn IndexSource,
    options: &ReportOptions,
    out: &mut W,
) -> WhatupResult<()> {
    let releases = releases.list_releases().await?;
    let indices = indices.load_indices()?;

    if releases.is_empty() {
        writeln!(out, "{}", NO_RELEASES_MESSAGE)?;
        return Ok(());
    }

    if indices.is_empty() {
        writeln!(out, "{}", NO_REPOSITORIES_MESSAGE)?;
        return Ok(());
    }

    tracing::debug!(
        "Comparing {} releases against {} repositories",
        releases.len(),
        indices.len()
    );

    let results = match_releases(&releases, &indices, options.include_prerelease)?;
    report::render(&results, options.format, out)
}
