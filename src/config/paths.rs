//! Cross-platform directory path resolution
//!
//! Provides functions to resolve where the release manager's client keeps its
//! files: the repository registry, the index cache and TLS material.
//! - Linux/macOS: XDG Base Directory specification (~/.config, ~/.cache)
//! - Windows: Known Folder API (AppData\Roaming, AppData\Local)
//!
//! A set `HELM_HOME` switches every path to the legacy single-directory layout.

use std::path::PathBuf;

use directories::BaseDirs;

use super::EnvLookup;

/// Look up an environment variable, treating empty values as unset
pub(crate) fn non_empty(env: EnvLookup<'_>, key: &str) -> Option<String> {
    env(key).filter(|value| !value.trim().is_empty())
}

fn home_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the legacy home directory
///
/// Checks HELM_HOME first, then falls back to ~/.helm
pub fn helm_home(env: EnvLookup<'_>) -> PathBuf {
    non_empty(env, "HELM_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(".helm"))
}

/// Get the configuration directory path
///
/// - Unix (Linux/macOS): XDG_CONFIG_HOME/helm or ~/.config/helm
/// - Windows: %APPDATA%\helm
pub fn config_dir(env: EnvLookup<'_>) -> PathBuf {
    #[cfg(windows)]
    {
        let _ = env;
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".").join(".config"))
            .join("helm")
    }
    #[cfg(not(windows))]
    {
        non_empty(env, "XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| home_dir().join(".config"))
            .join("helm")
    }
}

/// Get the cache directory path
///
/// - Unix (Linux/macOS): XDG_CACHE_HOME/helm or ~/.cache/helm
/// - Windows: %LOCALAPPDATA%\helm
pub fn cache_dir(env: EnvLookup<'_>) -> PathBuf {
    #[cfg(windows)]
    {
        let _ = env;
        BaseDirs::new()
            .map(|dirs| dirs.cache_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".").join(".cache"))
            .join("helm")
    }
    #[cfg(not(windows))]
    {
        non_empty(env, "XDG_CACHE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| home_dir().join(".cache"))
            .join("helm")
    }
}

/// Get the repository registry file path
///
/// Precedence: HELM_PATH_REPOSITORY_FILE, HELM_REPOSITORY_CONFIG,
/// $HELM_HOME/repository/repositories.yaml, <config dir>/repositories.yaml
pub fn repository_config(env: EnvLookup<'_>) -> PathBuf {
    non_empty(env, "HELM_PATH_REPOSITORY_FILE")
        .or_else(|| non_empty(env, "HELM_REPOSITORY_CONFIG"))
        .map(PathBuf::from)
        .unwrap_or_else(|| match non_empty(env, "HELM_HOME") {
            Some(home) => PathBuf::from(home)
                .join("repository")
                .join("repositories.yaml"),
            None => config_dir(env).join("repositories.yaml"),
        })
}

/// Get the repository index cache directory
///
/// Precedence: HELM_PATH_REPOSITORY_CACHE, HELM_REPOSITORY_CACHE,
/// $HELM_HOME/repository/cache, <cache dir>/repository
pub fn repository_cache(env: EnvLookup<'_>) -> PathBuf {
    non_empty(env, "HELM_PATH_REPOSITORY_CACHE")
        .or_else(|| non_empty(env, "HELM_REPOSITORY_CACHE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| match non_empty(env, "HELM_HOME") {
            Some(home) => PathBuf::from(home).join("repository").join("cache"),
            None => cache_dir(env).join("repository"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_repository_file_env_precedence() {
        let env = lookup(&[
            ("HELM_PATH_REPOSITORY_FILE", "/plugin/repositories.yaml"),
            ("HELM_REPOSITORY_CONFIG", "/v3/repositories.yaml"),
            ("HELM_HOME", "/legacy"),
        ]);
        assert_eq!(
            repository_config(&env),
            PathBuf::from("/plugin/repositories.yaml")
        );

        let env = lookup(&[
            ("HELM_REPOSITORY_CONFIG", "/v3/repositories.yaml"),
            ("HELM_HOME", "/legacy"),
        ]);
        assert_eq!(repository_config(&env), PathBuf::from("/v3/repositories.yaml"));
    }

    #[test]
    fn test_helm_home_layout() {
        let env = lookup(&[("HELM_HOME", "/legacy")]);
        assert_eq!(
            repository_config(&env),
            PathBuf::from("/legacy/repository/repositories.yaml")
        );
        assert_eq!(
            repository_cache(&env),
            PathBuf::from("/legacy/repository/cache")
        );
        assert_eq!(helm_home(&env), PathBuf::from("/legacy"));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let env = lookup(&[("HELM_PATH_REPOSITORY_FILE", ""), ("HELM_HOME", "/legacy")]);
        assert_eq!(
            repository_config(&env),
            PathBuf::from("/legacy/repository/repositories.yaml")
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn test_xdg_layout() {
        let env = lookup(&[("XDG_CONFIG_HOME", "/xdg/config"), ("XDG_CACHE_HOME", "/xdg/cache")]);
        assert_eq!(
            repository_config(&env),
            PathBuf::from("/xdg/config/helm/repositories.yaml")
        );
        assert_eq!(
            repository_cache(&env),
            PathBuf::from("/xdg/cache/helm/repository")
        );
    }

    #[test]
    fn test_default_paths_mention_helm() {
        let env = lookup(&[]);
        assert!(repository_config(&env).to_string_lossy().contains("helm"));
        assert!(helm_home(&env).to_string_lossy().contains(".helm"));
    }
}
