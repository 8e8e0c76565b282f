//! Busted name derivation
//!
//! Turns `css/app.css` plus a digest into either `css/app.css?<digest>`
//! (query mode) or `css/app.<sep><digest>.css`, optionally relocated into
//! an output directory.

use url::Url;

/// Derives busted references from original paths
#[derive(Debug, Clone)]
pub struct NameDeriver {
    separator: String,
    query_string: bool,
    output_dir: Option<String>,
}

impl NameDeriver {
    pub fn new(separator: &str, query_string: bool, output_dir: &str) -> Self {
        let output_dir = normalize_dir(output_dir);
        Self {
            separator: separator.to_string(),
            query_string,
            output_dir: (!output_dir.is_empty()).then_some(output_dir),
        }
    }

    /// Busted reference for `original` with fingerprint `digest`
    ///
    /// Query mode appends `?digest` verbatim, even when the digest is empty
    /// (yielding a trailing `?`). Otherwise the digest is inserted before
    /// the extension, and an empty digest leaves the file name unchanged
    /// apart from output-dir relocation.
    pub fn derive(&self, original: &str, digest: &str) -> String {
        if self.query_string {
            return format!("{}?{}", original, digest);
        }

        let (origin, path) = split_origin(original);

        let path = match self.output_dir {
            Some(ref dir) => {
                let root = if path.starts_with('/') && !dir.starts_with('/') {
                    "/"
                } else {
                    ""
                };
                format!("{}{}/{}", root, dir, file_name(&path))
            }
            None => path,
        };

        let ext = extension(&path);
        let stem = path.strip_suffix(ext).unwrap_or(&path);

        if digest.is_empty() {
            format!("{}{}{}", origin, stem, ext)
        } else {
            format!("{}{}{}{}{}", origin, stem, self.separator, digest, ext)
        }
    }
}

/// Split an absolute URL into `scheme://host[:port]` and its path.
///
/// Anything that does not parse as a URL with a host is treated as a plain
/// path, minus any query or fragment.
fn split_origin(original: &str) -> (String, String) {
    if let Ok(url) = Url::parse(original) {
        if let Some(host) = url.host_str() {
            let origin = match url.port() {
                Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
                None => format!("{}://{}", url.scheme(), host),
            };
            return (origin, url.path().to_string());
        }
    }

    let end = original.find(['?', '#']).unwrap_or(original.len());
    (String::new(), original[..end].to_string())
}

/// Final path segment
fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Extension of the final segment, dot included (`""` if none)
///
/// A leading dot (`.htaccess`) does not start an extension.
fn extension(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &name[idx..],
    }
}

/// Output directory with `./` prefixes and trailing slashes removed; `.` is empty
pub(crate) fn normalize_dir(dir: &str) -> String {
    let mut dir = dir.trim().replace('\\', "/");
    while let Some(rest) = dir.strip_prefix("./") {
        dir = rest.to_string();
    }
    let dir = dir.trim_end_matches('/');
    if dir == "." {
        String::new()
    } else {
        dir.to_string()
    }
}
