use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api: Option<ApiConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
}

/// Platform config directory path: `<config_dir>/artview/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("artview").join("config.toml"))
}

/// Load config by cascading CWD `.artview.toml` over platform config.
/// CWD values override platform values. Unreadable or malformed files are
/// logged and skipped.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_or_warn(&p));
    let cwd = load_or_warn(Path::new(".artview.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_or_warn(path: &Path) -> Option<ConfigFile> {
    match load_from_path(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring config file");
            None
        }
    }
}

/// Load a config from a specific path. `Ok(None)` if the file doesn't exist.
pub fn load_from_path(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        api: Some(ApiConfig {
            base_url: overlay
                .api
                .as_ref()
                .and_then(|a| a.base_url.clone())
                .or_else(|| base.api.as_ref().and_then(|a| a.base_url.clone())),
            timeout_secs: overlay
                .api
                .as_ref()
                .and_then(|a| a.timeout_secs)
                .or_else(|| base.api.as_ref().and_then(|a| a.timeout_secs)),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
                .or_else(|| base.display.as_ref().and_then(|d| d.theme.clone())),
        }),
    }
}
