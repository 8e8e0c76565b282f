//! Configuration management for cachebust

pub mod schema;

pub use schema::{Config, FilesConfig};

use crate::error::{CachebustError, CachebustResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Name of the project-local config file
pub const LOCAL_CONFIG_NAME: &str = ".cachebust.toml";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cachebust")
            .join("config.toml")
    }

    /// Find `.cachebust.toml` in `start` or any of its ancestors
    pub fn find_local_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
            .find(|path| path.is_file())
    }

    /// Load the global config with an optional local config layered on top.
    ///
    /// Tables are merged key by key, so the local file only overrides what
    /// it sets.
    pub async fn load_merged(&self, local: Option<&Path>) -> CachebustResult<Config> {
        let mut merged = toml::Value::Table(toml::map::Map::new());

        if self.config_path.exists() {
            merge_toml(&mut merged, read_toml(&self.config_path).await?);
        } else {
            debug!("Config file not found, using defaults");
        }

        if let Some(path) = local {
            debug!("Layering local config {}", path.display());
            merge_toml(&mut merged, read_toml(path).await?);
        }

        let source = local.unwrap_or(&self.config_path);
        merged.try_into().map_err(|e: toml::de::Error| CachebustError::ConfigInvalid {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_toml(path: &Path) -> CachebustResult<toml::Value> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| CachebustError::io(format!("reading config from {}", path.display()), e))?;

    toml::from_str(&content).map_err(|e| CachebustError::ConfigInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Recursively merge `overlay` into `base`; overlay wins on conflicts
fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");
        let manager = ConfigManager::with_path(path);

        let config = manager.load_merged(None).await.unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn shown_config_loads_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let mut config = Config::default();
        config.options.separator = "-".to_string();
        config.assets = vec!["css/*.css".to_string()];
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = ConfigManager::with_path(path).load_merged(None).await.unwrap();

        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn local_overrides_only_its_keys() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("config.toml");
        std::fs::write(&global, "[options]\nlength = 10\nseparator = \"_\"\n").unwrap();
        let local = temp.path().join(LOCAL_CONFIG_NAME);
        std::fs::write(&local, "assets = [\"*.css\"]\n[options]\nlength = 6\n").unwrap();

        let config = ConfigManager::with_path(global)
            .load_merged(Some(&local))
            .await
            .unwrap();

        assert_eq!(config.options.length, 6);
        assert_eq!(config.options.separator, "_");
        assert_eq!(config.assets, vec!["*.css"]);
    }

    #[tokio::test]
    async fn invalid_local_config_reports_path() {
        let temp = TempDir::new().unwrap();
        let local = temp.path().join(LOCAL_CONFIG_NAME);
        std::fs::write(&local, "[options]\nlength = \"long\"\n").unwrap();

        let err = ConfigManager::with_path(temp.path().join("none.toml"))
            .load_merged(Some(&local))
            .await
            .unwrap_err();

        assert!(matches!(err, CachebustError::ConfigInvalid { ref path, .. } if *path == local));
    }

    #[test]
    fn finds_local_config_in_ancestors() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join(LOCAL_CONFIG_NAME), "").unwrap();

        let found = ConfigManager::find_local_config(&nested).unwrap();
        assert_eq!(found, temp.path().join(LOCAL_CONFIG_NAME));
    }

    #[test]
    fn merge_replaces_scalars_and_arrays() {
        let mut base: toml::Value = toml::from_str("a = [1, 2]\n[t]\nx = 1\ny = 2").unwrap();
        let overlay: toml::Value = toml::from_str("a = [3]\n[t]\ny = 5").unwrap();
        merge_toml(&mut base, overlay);

        assert_eq!(base["a"].as_array().unwrap().len(), 1);
        assert_eq!(base["t"]["x"].as_integer(), Some(1));
        assert_eq!(base["t"]["y"].as_integer(), Some(5));
    }
}
