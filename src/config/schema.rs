//! Configuration schema for cachebust
//!
//! Global configuration lives at `~/.config/cachebust/config.toml`; a
//! project-local `.cachebust.toml` overrides it key by key.

use crate::bust::BustOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Glob patterns selecting assets, relative to `options.base_dir`
    pub assets: Vec<String>,

    /// Engine options
    pub options: BustOptions,

    /// Consumer files whose references get rewritten
    pub files: FilesConfig,
}

/// Consumer file group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Directory the `src` patterns are relative to (default: project root)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,

    /// Glob patterns selecting consumer files
    pub src: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            cwd: None,
            src: vec!["**/*.html".to_string()],
        }
    }
}

impl FilesConfig {
    /// Root the `src` patterns are expanded from
    pub fn root(&self, project_root: &Path) -> PathBuf {
        match self.cwd {
            Some(ref cwd) => project_root.join(cwd),
            None => project_root.to_path_buf(),
        }
    }
}

impl Config {
    /// Copy with `base_dir` resolved against `project_root`
    pub fn resolved(&self, project_root: &Path) -> Self {
        let mut config = self.clone();
        config.options.base_dir = project_root.join(&self.options.base_dir);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[options]"));
        assert!(toml.contains("[files]"));
        assert!(toml.contains("algorithm = \"md5\""));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.files.src, vec!["**/*.html"]);
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            assets = ["css/*.css", "js/*.js"]

            [options]
            base_dir = "public"
            length = 8

            [files]
            cwd = "public"
            src = ["*.html"]
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.assets.len(), 2);
        assert_eq!(config.options.length, 8);
        assert_eq!(config.options.separator, "."); // default preserved
        assert_eq!(config.files.cwd, Some(PathBuf::from("public")));
    }

    #[test]
    fn resolves_paths_against_project_root() {
        let mut config = Config::default();
        config.options.base_dir = PathBuf::from("public");
        config.files.cwd = Some(PathBuf::from("views"));

        let root = Path::new("/project");
        assert_eq!(
            config.resolved(root).options.base_dir,
            PathBuf::from("/project/public")
        );
        assert_eq!(config.files.root(root), PathBuf::from("/project/views"));
    }
}
