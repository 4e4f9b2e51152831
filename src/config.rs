use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;

/// Qualifier/organization/application triple for the platform config,
/// cache and data directories.
pub const PROJECT_DIRS: (&str, &str, &str) = ("io", "aminoscope", "aminoscope");

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Timeout in seconds for UniProt requests.
    #[serde(default = "default_download_timeout")]
    pub download_timeout: u64,

    /// Default number of hits shown by `search`.
    #[serde(default = "default_search_limit")]
    pub search_limit: u64,
}

fn default_download_timeout() -> u64 {
    60
}

fn default_search_limit() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_timeout: default_download_timeout(),
            search_limit: default_search_limit(),
        }
    }
}

impl Config {
    /// Loads `config.toml` from the platform config directory, falling
    /// back to defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        let (qualifier, organization, application) = PROJECT_DIRS;
        if let Some(proj_dirs) = ProjectDirs::from(qualifier, organization, application) {
            let config_path = proj_dirs.config_dir().join("config.toml");

            if config_path.exists() {
                if let Ok(content) = fs::read_to_string(&config_path) {
                    if let Ok(config) = toml::from_str(&content) {
                        debug!("loaded configuration from {}", config_path.display());
                        return config;
                    }
                }
            }
        }
        Config::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_keys() {
        let config: Config = toml::from_str("download_timeout = 10").unwrap();
        assert_eq!(config.download_timeout, 10);
        assert_eq!(config.search_limit, 15);

        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.download_timeout, 60);
        assert_eq!(config.search_limit, 15);
    }
}
