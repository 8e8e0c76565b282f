//! Asset map construction
//!
//! Hashes each candidate asset, derives its busted name and, outside query
//! mode, materializes the renamed copy and/or deletes the original.

use super::digest::Digester;
use super::fs::AssetFs;
use super::map::AssetMap;
use super::naming::NameDeriver;
use super::options::BustOptions;
use crate::error::CachebustResult;
use tracing::debug;

/// Builds the asset map for one run
pub struct AssetMapBuilder<'a> {
    fs: &'a dyn AssetFs,
    options: &'a BustOptions,
    digester: Digester,
    namer: NameDeriver,
}

impl<'a> AssetMapBuilder<'a> {
    /// Fails with `UnsupportedAlgorithm` / `UnsupportedEncoding` before
    /// anything is read or written.
    pub fn new(fs: &'a dyn AssetFs, options: &'a BustOptions) -> CachebustResult<Self> {
        let digester = Digester::new(
            &options.algorithm,
            &options.encoding,
            options.length,
            options.hash.as_deref(),
        )?;
        let namer = NameDeriver::new(&options.separator, options.query_string, &options.output_dir);

        Ok(Self {
            fs,
            options,
            digester,
            namer,
        })
    }

    /// Build the map for `assets` (paths relative to `base_dir`).
    ///
    /// Assets are processed in descending lexicographic order, and the map
    /// keeps that order. Every input path becomes a key.
    pub fn build(&self, assets: &[String]) -> CachebustResult<AssetMap> {
        let mut ordered: Vec<&String> = assets.iter().collect();
        ordered.sort();
        ordered.reverse();

        let mut map = AssetMap::new();
        for asset in ordered {
            let busted = self.bust_asset(asset)?;
            map.insert(asset.as_str(), busted);
        }

        debug!("Built asset map with {} entries", map.len());
        Ok(map)
    }

    fn bust_asset(&self, asset: &str) -> CachebustResult<String> {
        let base = &self.options.base_dir;
        let abs = base.join(asset);

        let bytes = self.fs.read_bytes(&abs)?;
        let digest = self.digester.fingerprint(&bytes);
        let busted = self.namer.derive(asset, &digest);
        debug!("{} -> {}", asset, busted);

        // Nothing to materialize when the name did not change
        if self.options.query_string || busted == asset {
            return Ok(busted);
        }

        if self.options.create_copies {
            let target = base.join(&busted);
            self.fs.copy_file(&abs, &target)?;
            debug!("Copied {} to {}", abs.display(), target.display());
        }

        if self.options.delete_originals {
            self.fs.remove_file(&abs)?;
            debug!("Deleted {}", abs.display());
        }

        Ok(busted)
    }
}
