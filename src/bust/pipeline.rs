//! One cache-busting run, end to end

use super::builder::AssetMapBuilder;
use super::cleanup;
use super::fs::AssetFs;
use super::map::AssetMap;
use super::options::BustOptions;
use super::persist::MapStore;
use super::rewrite::Rewriter;
use crate::error::CachebustResult;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What happened to stale-file cleanup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CleanupOutcome {
    /// `delete_old_hash_files` is off
    Disabled,
    /// Previous map loaded and compared
    Completed,
    /// Previous map missing or unreadable; nothing deleted
    Skipped { reason: String },
}

/// Result of a run
#[derive(Debug, Clone, Serialize)]
pub struct BustReport {
    /// Final asset map, in processing order
    pub map: AssetMap,
    /// Stale busted files removed (relative to `base_dir`)
    pub removed: Vec<String>,
    /// Consumer files whose content changed
    pub rewritten: Vec<PathBuf>,
    pub cleanup: CleanupOutcome,
    /// Where the map was persisted, if it was
    pub map_file: Option<PathBuf>,
}

/// Runs the engine against a filesystem
pub struct CacheBuster<'a> {
    fs: &'a dyn AssetFs,
    options: &'a BustOptions,
}

impl<'a> CacheBuster<'a> {
    pub fn new(fs: &'a dyn AssetFs, options: &'a BustOptions) -> Self {
        Self { fs, options }
    }

    /// Bust `assets` (relative to `base_dir`) and rewrite `consumers`.
    ///
    /// Steps run strictly in order: clear output dir, build map, stale
    /// cleanup, persist map, rewrite consumers. A failure while building
    /// the map aborts before any consumer is touched. A failure while
    /// rewriting leaves earlier consumers rewritten.
    pub fn run(&self, assets: &[String], consumers: &[PathBuf]) -> CachebustResult<BustReport> {
        let opts = self.options;

        // Validates algorithm and encoding before any mutation
        let builder = AssetMapBuilder::new(self.fs, opts)?;
        let clear = if opts.clear_output_dir {
            opts.clearable_output_dir()?
        } else {
            None
        };

        if let Some(dir) = clear {
            self.fs.remove_dir_all(&dir)?;
            debug!("Cleared output directory {}", dir.display());
        }

        let map = builder.build(assets)?;
        info!("Hashed {} assets", map.len());

        let store = MapStore::new(self.fs, opts.map_path());

        let (cleanup, removed) = if opts.delete_old_hash_files {
            self.remove_stale(&store, &map)?
        } else {
            (CleanupOutcome::Disabled, Vec::new())
        };

        let map_file = if opts.json_output {
            store.save(&map)?;
            info!("Wrote asset map to {}", store.path().display());
            Some(store.path().to_path_buf())
        } else {
            None
        };

        let rewriter = Rewriter::new(&map, &opts.separator, opts.query_string)?;
        let mut rewritten = Vec::new();
        for consumer in consumers {
            if rewriter.rewrite_file(self.fs, consumer)? {
                rewritten.push(consumer.clone());
            }
        }
        info!("Rewrote {} of {} files", rewritten.len(), consumers.len());

        Ok(BustReport {
            map,
            removed,
            rewritten,
            cleanup,
            map_file,
        })
    }

    /// A previous map that cannot be read skips cleanup; it never fails the run
    fn remove_stale(
        &self,
        store: &MapStore<'_>,
        current: &AssetMap,
    ) -> CachebustResult<(CleanupOutcome, Vec<String>)> {
        let previous = match store.load() {
            Ok(previous) => previous,
            Err(e) => {
                warn!("Skipping stale file cleanup: {}", e);
                return Ok((
                    CleanupOutcome::Skipped {
                        reason: e.to_string(),
                    },
                    Vec::new(),
                ));
            }
        };

        let removed = cleanup::remove_stale(self.fs, &self.options.base_dir, &previous, current)?;
        info!("Removed {} stale files", removed.len());
        Ok((CleanupOutcome::Completed, removed))
    }
}
