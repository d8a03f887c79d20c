//! Remote image identity and its on-disk cache key.

use sha2::{Digest, Sha256};

/// Opaque identifier naming a remote image, usually its absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceId(String);

impl SourceId {
    /// Creates a new `SourceId` from any string-like input.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the cache key for this source.
    #[must_use]
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::from_source(self)
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SourceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SourceId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// File name of a cache entry: lower-case hex SHA-256 of the source string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Length of a key in hex characters.
    pub const LEN: usize = 64;

    /// Hashes the source identifier into its cache key.
    #[must_use]
    pub fn from_source(source: &SourceId) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(source.as_str().as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use test_case::test_case;

    #[test]
    fn test_cache_key_length() {
        let key = SourceId::new("https://example.com/image.png").cache_key();
        assert_eq!(key.as_str().len(), CacheKey::LEN);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_cache_key_consistency() {
        let url = "https://example.com/image.png";
        let a = CacheKey::from_source(&SourceId::new(url));
        let b = CacheKey::from_source(&SourceId::new(url));
        assert_eq!(a, b);
    }

    #[test_case("abc", "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad" ; "abc")]
    #[test_case("", "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855" ; "empty")]
    fn test_cache_key_is_stable_digest(source: &str, expected: &str) {
        assert_eq!(SourceId::from(source).cache_key().as_str(), expected);
    }

    #[test]
    fn test_distinct_sources_distinct_keys() {
        let keys: HashSet<CacheKey> = (0..10_000)
            .map(|i| SourceId::new(format!("https://example.com/img/{i}.png")).cache_key())
            .collect();
        assert_eq!(keys.len(), 10_000);
    }

    #[test]
    fn test_near_identical_sources_differ() {
        let a = SourceId::from("https://example.com/a.png").cache_key();
        let b = SourceId::from("https://example.com/a.png ").cache_key();
        let c = SourceId::from("http://example.com/a.png").cache_key();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
