use std::time::Duration;

pub mod config_file;
pub mod pager;
pub mod pagination;
pub mod record;
pub mod selection;
pub mod source;

// Re-export for convenience
pub use config_file::{ConfigError, ConfigFile};
pub use pager::{LoadTicket, PageRequests, PageWindow, load_page};
pub use record::{Artwork, ArtworkId, ArtworkPage};
pub use selection::{BulkCount, PageToggle, Pursuit, PursuitState, SelectionController, SelectionError};
pub use source::artic::{ArticClient, DEFAULT_API_BASE};
pub use source::{FetchError, PageSource};

/// Records per page. Fixed by the API, not client-controlled.
pub const PAGE_SIZE: usize = 12;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Values given on the command line; `None` falls through to env/config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
    pub theme: Option<String>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub timeout_secs: u64,
    pub theme: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            theme: None,
        }
    }
}

impl Config {
    /// Resolve CLI flags > environment > config file > defaults.
    pub fn resolve(file: &ConfigFile, cli: ConfigOverrides) -> Self {
        Self::resolve_with_env(file, cli, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::resolve`] with an injectable environment lookup.
    pub fn resolve_with_env(
        file: &ConfigFile,
        cli: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let defaults = Self::default();
        let api = file.api.as_ref();

        let api_base = cli
            .api_base
            .or_else(|| env("ARTVIEW_API_BASE"))
            .or_else(|| api.and_then(|a| a.base_url.clone()))
            .unwrap_or(defaults.api_base);

        // A zero timeout fails every request, so it falls through like garbage.
        let timeout_secs = cli
            .timeout_secs
            .filter(|&t| t > 0)
            .or_else(|| {
                env("ARTVIEW_TIMEOUT")
                    .and_then(|v| v.trim().parse().ok())
                    .filter(|&t| t > 0)
            })
            .or_else(|| api.and_then(|a| a.timeout_secs).filter(|&t| t > 0))
            .unwrap_or(defaults.timeout_secs);

        let theme = cli
            .theme
            .or_else(|| file.display.as_ref().and_then(|d| d.theme.clone()));

        Self {
            api_base,
            timeout_secs,
            theme,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the HTTP page source for this configuration.
    pub fn client(&self) -> ArticClient {
        ArticClient::new(self.api_base.clone(), self.timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_file::{ApiConfig, DisplayConfig};

    fn file() -> ConfigFile {
        ConfigFile {
            api: Some(ApiConfig {
                base_url: Some("https://file.example/artworks".into()),
                timeout_secs: Some(30),
            }),
            display: Some(DisplayConfig {
                theme: Some("modern".into()),
            }),
        }
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::resolve_with_env(&ConfigFile::default(), ConfigOverrides::default(), |_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.api_base, "https://api.artic.edu/api/v1/artworks");
    }

    #[test]
    fn file_beats_defaults_and_env_beats_file() {
        let config = Config::resolve_with_env(&file(), ConfigOverrides::default(), |key| {
            (key == "ARTVIEW_TIMEOUT").then(|| "7".to_string())
        });
        assert_eq!(config.api_base, "https://file.example/artworks");
        assert_eq!(config.timeout_secs, 7);
        assert_eq!(config.theme.as_deref(), Some("modern"));
    }

    #[test]
    fn cli_beats_everything() {
        let cli = ConfigOverrides {
            api_base: Some("http://localhost:8080/artworks".into()),
            timeout_secs: Some(1),
            theme: Some("default".into()),
        };
        let config = Config::resolve_with_env(&file(), cli, |_| Some("ignored".into()));
        assert_eq!(config.api_base, "http://localhost:8080/artworks");
        assert_eq!(config.timeout_secs, 1);
        assert_eq!(config.theme.as_deref(), Some("default"));
    }

    #[test]
    fn unparsable_env_timeout_falls_through() {
        let config = Config::resolve_with_env(&file(), ConfigOverrides::default(), |key| {
            (key == "ARTVIEW_TIMEOUT").then(|| "soon".to_string())
        });
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn zero_timeout_falls_through_each_source() {
        let cli = ConfigOverrides {
            timeout_secs: Some(0),
            ..Default::default()
        };
        let config = Config::resolve_with_env(&file(), cli.clone(), |key| {
            (key == "ARTVIEW_TIMEOUT").then(|| "0".to_string())
        });
        assert_eq!(config.timeout_secs, 30);

        let zero_file = ConfigFile {
            api: Some(ApiConfig {
                base_url: None,
                timeout_secs: Some(0),
            }),
            display: None,
        };
        let config = Config::resolve_with_env(&zero_file, cli, |_| None);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
