//! helm-whatup - check if installed charts are out of date
//!
//! Compares the chart version of every deployed release with the versions
//! published in the locally cached repository indices and reports which
//! releases have an update available.

use anyhow::Result;
use clap::Parser;

use helm_whatup::Settings;
use helm_whatup::cli::{Args, init_logging};
use helm_whatup::pipeline;
use helm_whatup::release::HelmStorage;
use helm_whatup::repo::LocalRepositories;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.debug);
    tracing::debug!("Debug logging enabled");

    // Resolve everything up front so a bad flag fails before any connection
    let settings = Settings::from_env(&args)?;

    tracing::debug!("Initializing Kubernetes client");
    let client = helm_whatup::kube::create_client(&settings.connection).await?;

    let releases = HelmStorage::new(client, settings.namespace.clone(), settings.storage_driver);
    let indices = LocalRepositories::new(
        settings.repository_config.clone(),
        settings.repository_cache.clone(),
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    pipeline::run(&releases, &indices, &settings.report, &mut out).await?;

    Ok(())
}
