//! Content digests for asset fingerprints
//!
//! Hashes raw asset bytes and returns a lowercase hex digest truncated to
//! the configured length. Same bytes = same fingerprint, whatever the
//! file is called.

use crate::error::{CachebustError, CachebustResult};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
    Blake3,
}

impl Algorithm {
    /// Full lowercase hex digest of `data`
    pub fn hex_digest(&self, data: &[u8]) -> String {
        match self {
            Self::Md5 => hex::encode(Md5::digest(data)),
            Self::Sha1 => hex::encode(Sha1::digest(data)),
            Self::Sha256 => hex::encode(Sha256::digest(data)),
            Self::Sha512 => hex::encode(Sha512::digest(data)),
            Self::Blake3 => blake3::hash(data).to_hex().to_string(),
        }
    }
}

impl FromStr for Algorithm {
    type Err = CachebustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" | "sha-1" => Ok(Self::Sha1),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            "blake3" => Ok(Self::Blake3),
            _ => Err(CachebustError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Blake3 => "blake3",
        };
        write!(f, "{}", name)
    }
}

/// Text encoding named in the options
///
/// Only governs string input to the digest. Asset contents are always raw
/// bytes and are hashed verbatim, so the value is validated but never
/// changes a fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Latin1,
    Ascii,
    Base64,
    Hex,
    Utf16Le,
}

impl FromStr for Encoding {
    type Err = CachebustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "latin1" | "binary" => Ok(Self::Latin1),
            "ascii" => Ok(Self::Ascii),
            "base64" => Ok(Self::Base64),
            "hex" => Ok(Self::Hex),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(Self::Utf16Le),
            _ => Err(CachebustError::UnsupportedEncoding(s.to_string())),
        }
    }
}

/// Computes truncated fingerprints for asset contents
#[derive(Debug, Clone)]
pub struct Digester {
    algorithm: Algorithm,
    length: usize,
    fixed: Option<String>,
}

impl Digester {
    /// Create a digester, validating the algorithm and encoding names.
    ///
    /// A non-empty `fixed` value bypasses hashing entirely and is returned
    /// verbatim for every asset.
    pub fn new(
        algorithm: &str,
        encoding: &str,
        length: usize,
        fixed: Option<&str>,
    ) -> CachebustResult<Self> {
        encoding.parse::<Encoding>()?;
        Ok(Self {
            algorithm: algorithm.parse()?,
            length,
            fixed: fixed.filter(|h| !h.is_empty()).map(str::to_string),
        })
    }

    /// Fingerprint for `data`: hex digest cut to `length` characters
    ///
    /// No padding when the digest is shorter than requested.
    pub fn fingerprint(&self, data: &[u8]) -> String {
        if let Some(ref fixed) = self.fixed {
            return fixed.clone();
        }

        let mut digest = self.algorithm.hex_digest(data);
        // Hex output is ASCII, so truncating at any index is a char boundary
        digest.truncate(self.length);
        digest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md5(length: usize) -> Digester {
        Digester::new("md5", "utf8", length, None).unwrap()
    }

    #[test]
    fn md5_truncates_to_length() {
        assert_eq!(md5(8).fingerprint(b"body{}"), "aa676972");
        assert_eq!(md5(16).fingerprint(b"body{}"), "aa676972bbd2b68e");
    }

    #[test]
    fn length_beyond_digest_is_not_padded() {
        let fp = md5(100).fingerprint(b"body{}");
        assert_eq!(fp, "aa676972bbd2b68e94ef8e91e81d20be");
    }

    #[test]
    fn zero_length_is_empty() {
        assert_eq!(md5(0).fingerprint(b"body{}"), "");
    }

    #[test]
    fn same_bytes_same_fingerprint() {
        let d = md5(16);
        assert_eq!(d.fingerprint(b"console.log(1)"), d.fingerprint(b"console.log(1)"));
        assert_ne!(d.fingerprint(b"body{}"), d.fingerprint(b"body{color:red}"));
    }

    #[test]
    fn other_algorithms() {
        let sha1 = Digester::new("sha1", "utf8", 12, None).unwrap();
        assert_eq!(sha1.fingerprint(b"body{}"), "a4c0dac49e47");

        let sha256 = Digester::new("SHA-256", "utf8", 16, None).unwrap();
        assert_eq!(sha256.fingerprint(b"body{}"), "7c98040a54165758");

        let blake3 = Digester::new("blake3", "utf8", 64, None).unwrap();
        assert_eq!(blake3.fingerprint(b"body{}").len(), 64);
    }

    #[test]
    fn fixed_hash_bypasses_digest() {
        let d = Digester::new("md5", "utf8", 8, Some("release-42")).unwrap();
        assert_eq!(d.fingerprint(b"anything"), "release-42");
    }

    #[test]
    fn empty_fixed_hash_is_ignored() {
        let d = Digester::new("md5", "utf8", 8, Some("")).unwrap();
        assert_eq!(d.fingerprint(b"body{}"), "aa676972");
    }

    #[test]
    fn unsupported_algorithm_fails() {
        let err = Digester::new("whirlpool", "utf8", 8, None).unwrap_err();
        assert!(matches!(err, CachebustError::UnsupportedAlgorithm(ref a) if a == "whirlpool"));
    }

    #[test]
    fn unsupported_encoding_fails() {
        let err = Digester::new("md5", "ebcdic", 8, None).unwrap_err();
        assert!(matches!(err, CachebustError::UnsupportedEncoding(_)));
    }

    #[test]
    fn encoding_does_not_change_fingerprint() {
        let utf8 = Digester::new("md5", "utf8", 16, None).unwrap();
        let latin1 = Digester::new("md5", "binary", 16, None).unwrap();
        assert_eq!("binary".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert_eq!(utf8.fingerprint(b"body{}"), latin1.fingerprint(b"body{}"));
    }

    #[test]
    fn algorithm_display_roundtrip() {
        for alg in [
            Algorithm::Md5,
            Algorithm::Sha1,
            Algorithm::Sha256,
            Algorithm::Sha512,
            Algorithm::Blake3,
        ] {
            assert_eq!(alg.to_string().parse::<Algorithm>().unwrap(), alg);
        }
    }
}
