//! Kubernetes client module
//!
//! Handles the connection to the API server that fronts the release manager's
//! storage and provides a configured client for the release reader.
//!
//! Uses the default kubeconfig loading strategy, then applies the overrides
//! from the connection settings:
//! - a host override replaces the cluster URL (and stands in for a missing
//!   kubeconfig)
//! - TLS settings replace the CA bundle, client certificate and key, and
//!   server name used for verification

pub mod tls;

use kube::{Client, Config};
use url::Url;

use crate::config::{ConnectionSettings, TlsSettings};
use crate::error::{WhatupError, WhatupResult};

/// Initialize a Kubernetes client and check that the API server answers
pub async fn create_client(settings: &ConnectionSettings) -> WhatupResult<Client> {
    let config = build_config(settings).await?;

    tracing::debug!(
        "API server: \"{}\", TLS enabled: \"{}\", TLS verify: \"{}\"",
        config.cluster_url,
        settings.tls.enable,
        settings.tls.verify
    );

    let client = Client::try_from(config)
        .map_err(|e| WhatupError::Connection(format!("could not create client: {}", e)))?;

    let version = client.apiserver_version().await.map_err(|e| {
        WhatupError::Connection(format!("release manager is not reachable: {}", e))
    })?;
    tracing::debug!("Connected to API server {}", version.git_version);

    Ok(client)
}

async fn build_config(settings: &ConnectionSettings) -> WhatupResult<Config> {
    let mut config = with_host_override(Config::infer().await, settings.host.as_deref())?;

    if settings.tls.is_enabled() {
        apply_tls(&mut config, &settings.tls)?;
    }

    Ok(config)
}

/// Point an inferred config at `host`, or connect to `host` directly when no
/// kubeconfig could be loaded
fn with_host_override<E>(inferred: Result<Config, E>, host: Option<&str>) -> WhatupResult<Config>
where
    E: std::fmt::Display,
{
    match (inferred, host) {
        (Ok(mut config), Some(host)) => {
            config.cluster_url = parse_cluster_url(host)?;
            Ok(config)
        }
        (Ok(config), None) => Ok(config),
        (Err(e), Some(host)) => {
            tracing::debug!("No usable kubeconfig ({}), connecting to {} directly", e, host);
            Ok(Config::new(parse_cluster_url(host)?))
        }
        (Err(e), None) => Err(WhatupError::Connection(format!(
            "release manager host not set and no kubeconfig found: {}",
            e
        ))),
    }
}

fn parse_cluster_url<U>(host: &str) -> WhatupResult<U>
where
    U: std::str::FromStr,
    U::Err: std::fmt::Display,
{
    let url = normalize_host(host)?;
    url.as_str().parse().map_err(|e| {
        WhatupError::Connection(format!("invalid release manager host '{}': {}", host, e))
    })
}

/// Parse a host override, defaulting to HTTPS when no scheme is given
pub fn normalize_host(host: &str) -> WhatupResult<Url> {
    let host = host.trim();
    let candidate = if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    };

    let url = Url::parse(&candidate).map_err(|e| {
        WhatupError::Connection(format!("invalid release manager host '{}': {}", host, e))
    })?;

    if url.host_str().is_none() {
        return Err(WhatupError::Connection(format!(
            "invalid release manager host '{}': missing host name",
            host
        )));
    }

    Ok(url)
}

/// Overlay TLS settings on a loaded config
fn apply_tls(config: &mut Config, tls: &TlsSettings) -> WhatupResult<()> {
    tracing::debug!(
        "TLS: hostname={:?}, key={:?}, cert={:?}, ca={:?}",
        tls.hostname,
        tls.key,
        tls.cert,
        tls.ca_cert
    );

    config.accept_invalid_certs = !tls.verify;

    if tls.verify {
        if let Some(ca_cert) = &tls.ca_cert {
            config.root_cert = Some(tls::load_certificates(ca_cert)?);
        }
    }

    if let (Some(cert), Some(key)) = (&tls.cert, &tls.key) {
        config.auth_info.client_certificate = Some(cert.to_string_lossy().into_owned());
        config.auth_info.client_certificate_data = None;
        config.auth_info.client_key = Some(key.to_string_lossy().into_owned());
        config.auth_info.client_key_data = None;
    }

    if let Some(hostname) = &tls.hostname {
        config.tls_server_name = Some(hostname.clone());
    }

    Ok(())
}
