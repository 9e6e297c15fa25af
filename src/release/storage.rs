//! Release records read from the release manager's cluster storage
//!
//! Each deployed release revision is stored in a Secret (or ConfigMap) named
//! `sh.helm.release.v1.{release}.v{revision}` and labelled `owner=helm`.
//! The `release` key holds the record: base64 text of gzip-compressed JSON.

use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;

use async_trait::async_trait;
use k8s_openapi::NamespaceResourceScope;
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use kube::api::{Api, ListParams};
use serde::Deserialize;

use super::{InstalledRelease, ReleaseSource};
use crate::error::{WhatupError, WhatupResult};

/// Label selector matching deployed release records
const RELEASE_SELECTOR: &str = "owner=helm,status=deployed";

/// Key under which a storage object keeps the encoded release
const RELEASE_KEY: &str = "release";

/// Kind of object the release manager stores releases in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageDriver {
    #[default]
    Secret,
    ConfigMap,
}

impl FromStr for StorageDriver {
    type Err = WhatupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "secret" | "secrets" => Ok(StorageDriver::Secret),
            "configmap" | "configmaps" => Ok(StorageDriver::ConfigMap),
            other => Err(WhatupError::Fetch(format!(
                "unsupported release storage driver '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for StorageDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageDriver::Secret => f.write_str("secret"),
            StorageDriver::ConfigMap => f.write_str("configmap"),
        }
    }
}

/// Reads installed releases through the Kubernetes API
#[derive(Clone)]
pub struct HelmStorage {
    client: kube::Client,
    namespace: Option<String>,
    driver: StorageDriver,
}

impl HelmStorage {
    /// Read releases from every namespace, or only `namespace` when given
    pub fn new(client: kube::Client, namespace: Option<String>, driver: StorageDriver) -> Self {
        Self {
            client,
            namespace,
            driver,
        }
    }

    fn api<K>(&self) -> Api<K>
    where
        K: kube::Resource<Scope = NamespaceResourceScope>,
        <K as kube::Resource>::DynamicType: Default,
    {
        match &self.namespace {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::all(self.client.clone()),
        }
    }

    /// Fetch `(object name, encoded release)` pairs for the configured driver
    async fn fetch_payloads(&self) -> WhatupResult<Vec<(String, Vec<u8>)>> {
        let params = ListParams::default().labels(RELEASE_SELECTOR);

        let payloads = match self.driver {
            StorageDriver::Secret => {
                let list = self.api::<Secret>().list(&params).await.map_err(|e| {
                    WhatupError::Fetch(format!("could not list release secrets: {}", e))
                })?;
                list.items
                    .into_iter()
                    .filter_map(|secret| {
                        let name = secret.metadata.name.unwrap_or_default();
                        let payload = secret.data?.remove(RELEASE_KEY)?;
                        Some((name, payload.0))
                    })
                    .collect()
            }
            StorageDriver::ConfigMap => {
                let list = self.api::<ConfigMap>().list(&params).await.map_err(|e| {
                    WhatupError::Fetch(format!("could not list release configmaps: {}", e))
                })?;
                list.items
                    .into_iter()
                    .filter_map(|config_map| {
                        let name = config_map.metadata.name.unwrap_or_default();
                        let payload = config_map.data?.remove(RELEASE_KEY)?;
                        Some((name, payload.into_bytes()))
                    })
                    .collect()
            }
        };

        Ok(payloads)
    }
}

#[async_trait]
impl ReleaseSource for HelmStorage {
    async fn list_releases(&self) -> WhatupResult<Vec<InstalledRelease>> {
        tracing::debug!(
            "Listing releases from {} storage in {}",
            self.driver,
            self.namespace.as_deref().unwrap_or("all namespaces")
        );

        let payloads = self.fetch_payloads().await?;
        let mut releases = Vec::with_capacity(payloads.len());

        for (object, payload) in payloads {
            releases.push(decode_release(&object, &payload)?);
        }

        let releases = latest_revisions(releases);
        tracing::debug!("Found {} deployed releases", releases.len());
        Ok(releases)
    }
}

#[derive(Debug, Deserialize)]
struct StoredRelease {
    name: String,
    #[serde(default)]
    namespace: String,
    #[serde(default)]
    version: i64,
    #[serde(default)]
    chart: Option<StoredChart>,
}

#[derive(Debug, Deserialize)]
struct StoredChart {
    #[serde(default)]
    metadata: Option<StoredChartMetadata>,
}

#[derive(Debug, Deserialize)]
struct StoredChartMetadata {
    name: String,
    #[serde(default)]
    version: String,
}

/// Decode a stored release record: base64 → gzip detection → decompress → JSON
///
/// `object` is the name of the storage object the payload came from.
pub fn decode_release(object: &str, payload: &[u8]) -> WhatupResult<InstalledRelease> {
    use base64::Engine;
    let invalid = |reason: String| {
        WhatupError::Fetch(format!("could not decode release '{}': {}", object, reason))
    };

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(payload.trim_ascii())
        .map_err(|e| invalid(format!("invalid base64 release data: {}", e)))?;

    // Check for gzip magic bytes (0x1f, 0x8b, 0x08)
    let is_gzipped =
        decoded.len() >= 3 && decoded[0] == 0x1f && decoded[1] == 0x8b && decoded[2] == 0x08;

    let decompressed = if is_gzipped {
        let mut decoder = flate2::read::GzDecoder::new(&decoded[..]);
        let mut buf = Vec::new();
        decoder
            .read_to_end(&mut buf)
            .map_err(|e| invalid(format!("failed to decompress release data: {}", e)))?;
        buf
    } else {
        decoded
    };

    let stored: StoredRelease = serde_json::from_slice(&decompressed)
        .map_err(|e| invalid(format!("failed to parse release JSON: {}", e)))?;

    let metadata = stored
        .chart
        .and_then(|chart| chart.metadata)
        .ok_or_else(|| invalid(format!("release '{}' has no chart metadata", stored.name)))?;

    Ok(InstalledRelease {
        name: stored.name,
        namespace: stored.namespace,
        revision: stored.version,
        chart_name: metadata.name,
        chart_version: metadata.version,
    })
}

/// Keep the highest revision of each release, ordered by name then namespace
fn latest_revisions(releases: Vec<InstalledRelease>) -> Vec<InstalledRelease> {
    let mut latest: HashMap<(String, String), InstalledRelease> = HashMap::new();

    for release in releases {
        let key = (release.namespace.clone(), release.name.clone());
        match latest.get(&key) {
            Some(existing) if existing.revision >= release.revision => {}
            _ => {
                latest.insert(key, release);
            }
        }
    }

    let mut releases: Vec<InstalledRelease> = latest.into_values().collect();
    releases.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.namespace.cmp(&b.namespace))
    });
    releases
}
