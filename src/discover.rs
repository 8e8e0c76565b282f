//! Candidate asset and consumer file discovery
//!
//! Expands glob patterns against a directory tree. Patterns use `/` as the
//! separator, `*` stays within one path segment and `**` crosses segments.
//! A pattern starting with `!` excludes whatever it matches.

use crate::error::{CachebustError, CachebustResult};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Include and exclude globs
#[derive(Debug, Clone)]
pub struct PatternSet {
    include: GlobSet,
    exclude: GlobSet,
}

impl PatternSet {
    pub fn new(patterns: &[String]) -> CachebustResult<Self> {
        let mut include = GlobSetBuilder::new();
        let mut exclude = GlobSetBuilder::new();

        for raw in patterns {
            let raw = raw.trim();
            let (target, pattern) = match raw.strip_prefix('!') {
                Some(negated) => (&mut exclude, negated),
                None => (&mut include, raw),
            };
            let pattern = pattern.trim_start_matches("./");
            if pattern.is_empty() {
                continue;
            }

            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| CachebustError::InvalidPattern {
                    pattern: raw.to_string(),
                    reason: e.to_string(),
                })?;
            target.add(glob);
        }

        let build = |builder: GlobSetBuilder| {
            builder.build().map_err(|e| CachebustError::InvalidPattern {
                pattern: patterns.join(", "),
                reason: e.to_string(),
            })
        };

        Ok(Self {
            include: build(include)?,
            exclude: build(exclude)?,
        })
    }

    /// Whether a `/`-separated relative path is selected
    pub fn matches(&self, rel_path: &str) -> bool {
        self.include.is_match(rel_path) && !self.exclude.is_match(rel_path)
    }
}

/// Regular files under `root` selected by `patterns`, as `/`-separated
/// paths relative to `root`, in file-name order.
pub fn expand(root: &Path, patterns: &[String]) -> CachebustResult<Vec<String>> {
    let set = PatternSet::new(patterns)?;
    let mut found = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            CachebustError::io(format!("walking {}", root.display()), e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let rel = rel.to_string_lossy().replace('\\', "/");
        if set.matches(&rel) {
            found.push(rel);
        }
    }

    Ok(found)
}

/// Candidate assets under `base_dir`, relative to it
pub fn list_candidate_assets(base_dir: &Path, patterns: &[String]) -> CachebustResult<Vec<String>> {
    let assets = expand(base_dir, patterns)?;
    debug!("Found {} candidate assets in {}", assets.len(), base_dir.display());
    Ok(assets)
}

/// Consumer files under `root`, as absolute paths
pub fn list_consumer_files(root: &Path, patterns: &[String]) -> CachebustResult<Vec<PathBuf>> {
    let root = std::path::absolute(root)
        .map_err(|e| CachebustError::io(format!("resolving {}", root.display()), e))?;

    let files = expand(&root, patterns)?
        .into_iter()
        .map(|rel| {
            info!("Busted: {}", rel);
            root.join(rel)
        })
        .collect();

    Ok(files)
}
