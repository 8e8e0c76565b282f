//! Asset map side file
//!
//! A flat JSON object, one `"original": "busted"` entry per asset, in map
//! order.

use super::fs::AssetFs;
use super::map::AssetMap;
use crate::error::{CachebustError, CachebustResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads and saves the asset map at a fixed path
pub struct MapStore<'a> {
    fs: &'a dyn AssetFs,
    path: PathBuf,
}

impl<'a> MapStore<'a> {
    pub fn new(fs: &'a dyn AssetFs, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted map
    ///
    /// A missing file is `MissingPreviousMap`; malformed JSON is
    /// `PersistedMapInvalid`.
    pub fn load(&self) -> CachebustResult<AssetMap> {
        if !self.fs.exists(&self.path) {
            return Err(CachebustError::MissingPreviousMap(self.path.clone()));
        }

        let content = self.fs.read_text(&self.path)?;
        let map: AssetMap =
            serde_json::from_str(&content).map_err(|e| CachebustError::PersistedMapInvalid {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        debug!("Loaded {} entries from {}", map.len(), self.path.display());
        Ok(map)
    }

    /// Persist `map`, replacing any previous file
    pub fn save(&self, map: &AssetMap) -> CachebustResult<()> {
        let content = serde_json::to_string_pretty(map)?;
        self.fs.write_text(&self.path, &content)?;

        debug!("Saved {} entries to {}", map.len(), self.path.display());
        Ok(())
    }
}
