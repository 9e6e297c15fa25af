//! Runtime settings for a report run
//!
//! Settings are resolved once from command-line flags, environment variables
//! and built-in defaults, then passed by value through the pipeline.
//! Precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables
//! 3. Built-in defaults

pub mod paths;

use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::error::WhatupResult;
use crate::release::StorageDriver;
use crate::report::OutputFormat;

use paths::non_empty;

/// Environment variable lookup
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// How the report is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub format: OutputFormat,
    /// Let pre-release versions count as "latest"
    pub include_prerelease: bool,
}

/// TLS material for the release manager connection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsSettings {
    pub enable: bool,
    pub verify: bool,
    pub ca_cert: Option<PathBuf>,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
    pub hostname: Option<String>,
}

impl TlsSettings {
    /// TLS is applied when either enabled or verification is requested
    pub fn is_enabled(&self) -> bool {
        self.enable || self.verify
    }
}

/// How to reach the release manager
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// API server address overriding the kubeconfig
    pub host: Option<String>,
    pub tls: TlsSettings,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub report: ReportOptions,
    pub connection: ConnectionSettings,
    pub namespace: Option<String>,
    pub storage_driver: StorageDriver,
    pub repository_config: PathBuf,
    pub repository_cache: PathBuf,
}

impl Settings {
    /// Resolve settings against the process environment
    pub fn from_env(args: &Args) -> WhatupResult<Self> {
        Self::resolve(args, &|key| std::env::var(key).ok())
    }

    /// Resolve settings against an arbitrary environment
    pub fn resolve(args: &Args, env: EnvLookup<'_>) -> WhatupResult<Self> {
        // Output format first so a bad value fails before anything else happens
        let format: OutputFormat = args.output.parse()?;

        let host = args
            .host
            .clone()
            .or_else(|| non_empty(env, "TILLER_HOST"))
            .or_else(|| non_empty(env, "HELM_HOST"));

        let storage_driver: StorageDriver = match args.storage_driver.clone() {
            Some(driver) => driver.parse()?,
            None => non_empty(env, "HELM_DRIVER")
                .map(|driver| driver.parse::<StorageDriver>())
                .transpose()?
                .unwrap_or_default(),
        };

        let repository_config = args
            .repository_config
            .clone()
            .unwrap_or_else(|| paths::repository_config(env));
        let repository_cache = args
            .repository_cache
            .clone()
            .unwrap_or_else(|| paths::repository_cache(env));

        let settings = Settings {
            report: ReportOptions {
                format,
                include_prerelease: args.devel,
            },
            connection: ConnectionSettings {
                host,
                tls: resolve_tls(args, env),
            },
            namespace: args.namespace.clone(),
            storage_driver,
            repository_config,
            repository_cache,
        };

        tracing::debug!(
            "Settings: output={}, devel={}, host={:?}, tls={}, verify={}, driver={}",
            settings.report.format,
            settings.report.include_prerelease,
            settings.connection.host,
            settings.connection.tls.enable,
            settings.connection.tls.verify,
            settings.storage_driver
        );

        Ok(settings)
    }
}

fn resolve_tls(args: &Args, env: EnvLookup<'_>) -> TlsSettings {
    let home = paths::helm_home(env);

    TlsSettings {
        enable: args.tls || env_bool(env, "HELM_TLS_ENABLE"),
        verify: args.tls_verify || env_bool(env, "HELM_TLS_VERIFY"),
        ca_cert: tls_file(args.tls_ca_cert.as_deref(), env, "HELM_TLS_CA_CERT", &home, "ca.pem"),
        cert: tls_file(args.tls_cert.as_deref(), env, "HELM_TLS_CERT", &home, "cert.pem"),
        key: tls_file(args.tls_key.as_deref(), env, "HELM_TLS_KEY", &home, "key.pem"),
        hostname: args
            .tls_hostname
            .clone()
            .or_else(|| non_empty(env, "HELM_TLS_HOSTNAME")),
    }
}

/// Flag, then env var, then `<home>/<default_name>` if that file exists
fn tls_file(
    flag: Option<&Path>,
    env: EnvLookup<'_>,
    key: &str,
    home: &Path,
    default_name: &str,
) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| non_empty(env, key).map(PathBuf::from))
        .or_else(|| Some(home.join(default_name)).filter(|path| path.exists()))
}

fn env_bool(env: EnvLookup<'_>, key: &str) -> bool {
    let Some(value) = non_empty(env, key) else {
        return false;
    };

    match parse_bool(&value) {
        Some(parsed) => parsed,
        None => {
            tracing::warn!("Ignoring {}={:?}: not a boolean", key, value);
            false
        }
    }
}

/// Accepts the usual spellings: 1/0, t/f, true/false in any common casing
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
