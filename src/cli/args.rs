//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

/// Check if installed charts are out of date
#[derive(Parser, Debug, Clone)]
#[command(name = "helm-whatup")]
#[command(version, about = "Check if installed charts are out of date", long_about = None)]
pub struct Args {
    /// Output format, choose from plain, json, yaml, table
    #[arg(long, short = 'o', default_value = "plain")]
    pub output: String,

    /// Whether to include pre-releases or not
    #[arg(long, short = 'd')]
    pub devel: bool,

    /// Print debug logs to stderr
    #[arg(long, short = 'D')]
    pub debug: bool,

    /// Address of the release manager's API server (overrides the kubeconfig)
    #[arg(long)]
    pub host: Option<String>,

    /// Only check releases installed in this namespace
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    /// Where releases are stored: secret or configmap
    #[arg(long)]
    pub storage_driver: Option<String>,

    /// Enable TLS for the release manager connection
    #[arg(long)]
    pub tls: bool,

    /// Enable TLS and verify the remote certificate
    #[arg(long)]
    pub tls_verify: bool,

    /// Path to the TLS CA certificate file
    #[arg(long)]
    pub tls_ca_cert: Option<PathBuf>,

    /// Path to the TLS certificate file
    #[arg(long)]
    pub tls_cert: Option<PathBuf>,

    /// Path to the TLS key file
    #[arg(long)]
    pub tls_key: Option<PathBuf>,

    /// Server name used to verify the remote certificate
    #[arg(long)]
    pub tls_hostname: Option<String>,

    /// Path to the repository registry file
    #[arg(long)]
    pub repository_config: Option<PathBuf>,

    /// Directory holding cached repository indices
    #[arg(long)]
    pub repository_cache: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_flags() {
        let args = Args::parse_from(["helm-whatup", "-o", "json", "-d", "-D", "-n", "prod"]);
        assert_eq!(args.output, "json");
        assert!(args.devel);
        assert!(args.debug);
        assert_eq!(args.namespace.as_deref(), Some("prod"));
    }

    #[test]
    fn test_tls_flags() {
        let args = Args::parse_from([
            "helm-whatup",
            "--tls",
            "--tls-ca-cert",
            "/certs/ca.pem",
            "--tls-hostname",
            "api.internal",
        ]);
        assert!(args.tls);
        assert!(!args.tls_verify);
        assert_eq!(args.tls_ca_cert, Some(PathBuf::from("/certs/ca.pem")));
        assert_eq!(args.tls_hostname.as_deref(), Some("api.internal"));
    }

    #[test]
    fn test_default_output_is_plain() {
        let args = Args::parse_from(["helm-whatup"]);
        assert_eq!(args.output, "plain");
        assert!(!args.devel);
    }
}
