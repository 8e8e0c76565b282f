//! Stale busted-file cleanup
//!
//! Compares the previous run's map with the current one and removes busted
//! files that are no longer produced.

use super::fs::AssetFs;
use super::map::AssetMap;
use crate::error::CachebustResult;
use std::path::{Component, Path};
use tracing::debug;

/// Busted references from `previous` that the current run no longer produces.
///
/// Skips entries whose busted reference equals the original (nothing was
/// renamed, so the "busted" file is a live asset) and query-suffixed
/// references, which never exist on disk. Absolute references and ones
/// that climb out with `..` are never reported, so cleanup stays under
/// `base_dir`. Order follows `previous`; duplicates are reported once.
pub fn stale_files(previous: &AssetMap, current: &AssetMap) -> Vec<String> {
    let mut stale: Vec<String> = Vec::new();

    for (original, busted) in previous.iter() {
        if busted == original
            || busted.contains('?')
            || !is_contained(busted)
            || current.contains_value(busted)
        {
            continue;
        }
        if !stale.iter().any(|s| s == busted) {
            stale.push(busted.to_string());
        }
    }

    stale
}

/// Relative path made only of plain segments
fn is_contained(path: &str) -> bool {
    let path = Path::new(path);
    path.components().next().is_some()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Force-delete every stale file under `base_dir`, returning what was removed
pub fn remove_stale(
    fs: &dyn AssetFs,
    base_dir: &Path,
    previous: &AssetMap,
    current: &AssetMap,
) -> CachebustResult<Vec<String>> {
    let stale = stale_files(previous, current);

    for busted in &stale {
        let path = base_dir.join(busted);
        fs.remove_file(&path)?;
        debug!("Removed stale {}", path.display());
    }

    Ok(stale)
}
