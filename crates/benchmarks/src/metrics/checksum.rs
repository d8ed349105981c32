//! Content checksum metric.

use crate::metric::Metric;
use crate::result::MetricValue;
use sha2::{Digest, Sha256};
use std::borrow::Cow;

/// SHA-256 over a sequence of byte chunks, as lowercase hex.
///
/// Useful to detect whether two runs produced the same content. The digest
/// is computed at construction and chunks are hashed in iteration order.
#[derive(Debug, Clone)]
pub struct Checksum {
    name: String,
    digest: String,
}

impl Checksum {
    /// Hash `chunks` and report the result as `checksum-<name>`.
    pub fn new<I, T>(name: impl Into<String>, chunks: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut hasher = Sha256::new();
        for chunk in chunks {
            hasher.update(chunk.as_ref());
        }
        Self {
            name: name.into(),
            digest: hex::encode(hasher.finalize()),
        }
    }

    /// The hex digest.
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl Metric for Checksum {
    const IDENTIFIER: &'static str = "checksum";
    const DISPLAY_NAME: &'static str = "Checksum of generated content";

    fn identifier(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{}-{}", Self::IDENTIFIER, self.name))
    }

    fn display_name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("Checksum of {}", self.name))
    }

    fn result(&self) -> Option<MetricValue> {
        Some(MetricValue::String(self.digest.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        let metric = Checksum::new("topics", ["abc"]);
        assert_eq!(
            metric.digest(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_chunking_does_not_change_digest() {
        let whole = Checksum::new("a", ["hello world"]);
        let split = Checksum::new("a", ["hello", " ", "world"]);
        assert_eq!(whole.digest(), split.digest());
    }

    #[test]
    fn test_identity_includes_name() {
        let metric = Checksum::new("topics", Vec::<Vec<u8>>::new());
        assert_eq!(metric.identifier(), "checksum-topics");
        assert_eq!(metric.display_name(), "Checksum of topics");
        assert!(matches!(metric.result(), Some(MetricValue::String(_))));
    }
}
