//! Error types for cachebust
//!
//! All modules use `CachebustResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cachebust operations
pub type CachebustResult<T> = Result<T, CachebustError>;

/// All errors that can occur in cachebust
#[derive(Error, Debug)]
pub enum CachebustError {
    // Engine errors
    #[error("Unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Previous asset map not found: {0}")]
    MissingPreviousMap(PathBuf),

    #[error("Invalid asset map at {path}: {reason}")]
    PersistedMapInvalid { path: PathBuf, reason: String },

    #[error("Invalid pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Refusing to clear {0}: output_dir must be a subdirectory of base_dir")]
    UnsafeOutputDir(PathBuf),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl CachebustError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Whether the underlying IO error is a missing file
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::MissingPreviousMap(_) => true,
            _ => false,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedAlgorithm(_) => {
                Some("Supported algorithms: md5, sha1, sha256, sha512, blake3")
            }
            Self::UnsupportedEncoding(_) => {
                Some("Supported encodings: utf8, binary, latin1, ascii, base64, hex, utf16le")
            }
            Self::MissingPreviousMap(_) => {
                Some("Run once with json_output = true to create the asset map")
            }
            Self::InvalidPattern { .. } => Some("Check the assets and files.src glob patterns"),
            Self::UnsafeOutputDir(_) => {
                Some("Point output_dir at a subdirectory, or set clear_output_dir = false")
            }
            Self::ConfigInvalid { .. } => Some("Run: cachebust config show"),
            _ => None,
        }
    }
}
