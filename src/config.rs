use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, DEFAULT_ENV_DIRS, DEFAULT_FONTS, DEFAULT_FONTS_DIR,
    DEFAULT_SEARCH_PATH, DEFAULT_TARGET,
};

/// Overrides for the install layout, read from `launcher.toml`.
///
/// Every field is optional; anything left out keeps the bundled default.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Executable name, relative to the install root.
    pub target: String,
    pub fonts_dir: String,
    pub fonts: Vec<String>,
    /// Install-relative directories appended to `PATH`, `/`-separated.
    pub search_path: Vec<String>,
    /// `[env]` table of variable name to install-relative directory,
    /// applied in file order.
    pub env: IndexMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            fonts_dir: DEFAULT_FONTS_DIR.to_string(),
            fonts: DEFAULT_FONTS.iter().map(|f| f.to_string()).collect(),
            search_path: DEFAULT_SEARCH_PATH.iter().map(|p| p.to_string()).collect(),
            env: DEFAULT_ENV_DIRS
                .iter()
                .map(|(name, dir)| (name.to_string(), dir.to_string()))
                .collect(),
        }
    }
}

impl Config {
    /// Loads the first config file found for `root`, falling back to the
    /// defaults when there is none or it cannot be used.
    pub fn load(root: &Path) -> Self {
        let Some(path) = config_file_path(root) else {
            return Config::default();
        };

        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Using config {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{}", e);
                Config::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// `launcher.toml` next to the executable wins over the user config dir.
fn config_file_path(root: &Path) -> Option<PathBuf> {
    let local = root.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    let user = dirs::config_dir()?.join(APP_NAME).join(CONFIG_FILE_NAME);
    user.is_file().then_some(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.target, DEFAULT_TARGET);
        assert_eq!(config.fonts.len(), 5);
        assert_eq!(config.fonts[0], "FiraCodeNerdFontMono-Medium.ttf");
        assert_eq!(config.search_path, vec!["git/bin", "nvim/bin"]);
        let names: Vec<&str> = config.env.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec!["XDG_CONFIG_HOME", "XDG_DATA_HOME", "XDG_STATE_HOME", "XDG_CACHE_HOME"]
        );
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
            target = "nvim-qt"
            fonts = ["Iosevka.ttf"]
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.target, "nvim-qt");
        assert_eq!(config.fonts, vec!["Iosevka.ttf"]);
        assert_eq!(config.fonts_dir, DEFAULT_FONTS_DIR);
        assert_eq!(config.env, Config::default().env);
    }

    #[test]
    fn test_parse_env_table() {
        let toml = r#"
            target = "nvim-qt"

            [env]
            NVIM_APPNAME = "profile"
            XDG_CACHE_HOME = "tmp/cache"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.target, "nvim-qt");
        let env: Vec<(&str, &str)> = config
            .env
            .iter()
            .map(|(name, dir)| (name.as_str(), dir.as_str()))
            .collect();
        assert_eq!(
            env,
            vec![("NVIM_APPNAME", "profile"), ("XDG_CACHE_HOME", "tmp/cache")]
        );
    }

    #[test]
    fn test_env_table_in_file_keeps_other_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "fonts_dir = \"typefaces\"\n\n[env]\nNVIM_APPNAME = \"profile\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path());
        assert_eq!(config.fonts_dir, "typefaces");
        assert_eq!(config.env.get("NVIM_APPNAME").map(String::as_str), Some("profile"));
        assert_eq!(config.env.len(), 1);
    }

    #[test]
    fn test_load_prefers_install_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "fonts_dir = \"typefaces\"\n").unwrap();

        let config = Config::load(dir.path());
        assert_eq!(config.fonts_dir, "typefaces");
    }

    #[test]
    fn test_invalid_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "fonts = 3\n").unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(Config::load(dir.path()), Config::default());
    }
}
