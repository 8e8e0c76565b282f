//! Reference rewriting in consumer files
//!
//! Each map entry becomes a rule matching either the literal original path
//! (optionally followed by a `?query` token from an earlier query-mode run)
//! or a same-stem, same-extension name carrying an older hex digest. Every
//! match is replaced with the current busted reference, so re-running with
//! a new digest replaces the old one instead of stacking digests.

use super::fs::AssetFs;
use super::map::AssetMap;
use crate::error::{CachebustError, CachebustResult};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

/// Compiled-size ceiling for the combined matcher of a large asset map
const PATTERN_SIZE_LIMIT: usize = 256 * 1024 * 1024;

/// Old digest after `?`, in query mode. Fixed hashes are often version
/// strings (`v1.2.3`, `release-42`), so `.`, `_`, `~` and `-` are allowed
/// after the first character.
const QUERY_TOKEN: &str = r"[0-9A-Za-z][0-9A-Za-z._~-]*";

/// Old digest after `?` in filename mode: hex only, so consumer-owned
/// queries such as `?inline` or `?raw` are left alone
const HEX_TOKEN: &str = r"[a-fA-F0-9]+";

/// Matcher source and replacement for one asset map entry
#[derive(Debug, Clone)]
pub struct RewriteRule {
    busted: String,
    source: String,
}

impl RewriteRule {
    pub fn new(original: &str, busted: &str, separator: &str, query_string: bool) -> Self {
        let token = if query_string { QUERY_TOKEN } else { HEX_TOKEN };
        let mut source = format!(r"{}(\?{})?", regex::escape(original), token);

        // trunk + separator + <hex> + "." + ext, e.g. css/app.1f3a9c.css
        if let Some((trunk, ext)) = original.rsplit_once('.') {
            source.push_str(&format!(
                r"|{}[a-fA-F0-9]+\.{}",
                regex::escape(&format!("{}{}", trunk, separator)),
                regex::escape(ext)
            ));
        }

        Self {
            busted: busted.to_string(),
            source,
        }
    }

    /// Regex source; capture group 1 is the optional `?query` token
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Rewrites references for every entry of an asset map
///
/// All rules are compiled into one leftmost-first alternation, in map
/// order. The scan moves left to right; at any position the first rule in
/// map order that matches wins, and replaced text is never scanned again.
/// Because the map is in descending path order, `css/main.css` is tried
/// before `main.css`, and a busted name written for one rule cannot be
/// picked up by a shorter rule.
#[derive(Debug, Clone)]
pub struct Rewriter {
    rules: Vec<RewriteRule>,
    pattern: Option<Regex>,
}

impl Rewriter {
    /// `query_string` selects which old `?token` after an original counts
    /// as a previous digest and gets replaced.
    pub fn new(map: &AssetMap, separator: &str, query_string: bool) -> CachebustResult<Self> {
        let rules: Vec<RewriteRule> = map
            .iter()
            .filter(|(original, _)| !original.is_empty())
            .map(|(original, busted)| RewriteRule::new(original, busted, separator, query_string))
            .collect();

        if rules.is_empty() {
            return Ok(Self {
                rules,
                pattern: None,
            });
        }

        let source = rules
            .iter()
            .map(|r| format!("({})", r.source()))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = RegexBuilder::new(&source)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|e| CachebustError::InvalidPattern {
                pattern: format!("<{} rewrite rules>", rules.len()),
                reason: e.to_string(),
            })?;

        Ok(Self {
            rules,
            pattern: Some(pattern),
        })
    }

    /// Replace every non-overlapping reference in `text`
    ///
    /// A match directly preceded by an identifier character (letter, digit,
    /// `_` or `-`) belongs to a longer name and is skipped. A
    /// `?token` that runs on into more query text (`?v=2`, `?deadbeefx`) is
    /// not treated as an old digest and is kept. A reference that already
    /// reads as the current busted value is left as is.
    pub fn rewrite_text<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let Some(ref pattern) = self.pattern else {
            return Cow::Borrowed(text);
        };

        let mut out = String::new();
        let mut last = 0;
        let mut pos = 0;
        let mut replaced = false;

        while pos <= text.len() {
            let Some(caps) = pattern.captures_at(text, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };

            if !at_name_start(text, whole.start()) {
                pos = next_char(text, whole.start());
                continue;
            }

            // Rule i owns group 2i+1, its query token is group 2i+2
            let Some(idx) = (0..self.rules.len()).find(|i| caps.get(2 * i + 1).is_some()) else {
                pos = next_char(text, whole.start());
                continue;
            };

            let busted = &self.rules[idx].busted;
            if whole.end() <= whole.start() + busted.len()
                && text[whole.start()..].starts_with(busted.as_str())
            {
                pos = next_char(text, whole.start()).max(whole.start() + busted.len());
                continue;
            }

            let end = match caps.get(2 * idx + 2) {
                Some(query) if continues_query(text, whole.end()) => query.start(),
                _ => whole.end(),
            };

            out.push_str(&text[last..whole.start()]);
            out.push_str(busted);
            last = end;
            pos = end.max(next_char(text, whole.start()));
            replaced = true;
        }

        if !replaced {
            return Cow::Borrowed(text);
        }

        out.push_str(&text[last..]);
        Cow::Owned(out)
    }

    /// Rewrite one consumer file in place.
    ///
    /// Read once, written at most once after all rules ran. Returns whether
    /// the content changed.
    pub fn rewrite_file(&self, fs: &dyn AssetFs, path: &Path) -> CachebustResult<bool> {
        let original = fs.read_text(path)?;

        match self.rewrite_text(&original) {
            Cow::Owned(rewritten) if rewritten != original => {
                fs.write_text(path, &rewritten)?;
                debug!("Rewrote {}", path.display());
                Ok(true)
            }
            _ => {
                debug!("No references in {}", path.display());
                Ok(false)
            }
        }
    }
}

fn at_name_start(text: &str, start: usize) -> bool {
    match text[..start].chars().next_back() {
        Some(c) => !(c.is_alphanumeric() || c == '_' || c == '-'),
        None => true,
    }
}

/// Whether the text at `idx` extends the query token matched before it
fn continues_query(text: &str, idx: usize) -> bool {
    text[idx..]
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || matches!(c, '=' | '_' | '-' | '.' | '~'))
}

/// Byte offset of the char after the one at `idx`
fn next_char(text: &str, idx: usize) -> usize {
    idx + text[idx..].chars().next().map_or(1, char::len_utf8)
}
