//! Output size metric.

use crate::metric::Metric;
use crate::result::MetricValue;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Total size in bytes of the regular files under a path.
///
/// The directory is walked once, at construction. Symbolic links are not
/// followed. Any I/O error leaves the metric without a result.
#[derive(Debug, Clone, Copy)]
pub struct OutputSize {
    bytes: Option<u64>,
}

impl OutputSize {
    /// Measure the tree rooted at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let bytes = match size_on_disk(path) {
            Ok(bytes) => Some(bytes),
            Err(error) => {
                debug!(path = %path.display(), %error, "could not measure output size");
                None
            }
        };
        Self { bytes }
    }

    /// The measured size in bytes.
    pub fn bytes(&self) -> Option<u64> {
        self.bytes
    }
}

impl Metric for OutputSize {
    const IDENTIFIER: &'static str = "output-size";
    const DISPLAY_NAME: &'static str = "Total output size on disk";

    fn result(&self) -> Option<MetricValue> {
        self.bytes.map(MetricValue::from)
    }
}

fn size_on_disk(path: &Path) -> io::Result<u64> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.is_file() {
        return Ok(metadata.len());
    }
    if !metadata.is_dir() {
        return Ok(0);
    }

    let mut total = 0u64;
    for entry in fs::read_dir(path)? {
        total += size_on_disk(&entry?.path())?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sums_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), vec![0u8; 100]).unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data").join("b.json"), vec![0u8; 28]).unwrap();

        let metric = OutputSize::new(dir.path());
        assert_eq!(metric.bytes(), Some(128));
        assert_eq!(metric.result(), Some(MetricValue::Number(128.0)));
    }

    #[test]
    fn test_empty_directory_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(OutputSize::new(dir.path()).bytes(), Some(0));
    }

    #[test]
    fn test_missing_path_has_no_result() {
        let dir = tempfile::tempdir().unwrap();
        let metric = OutputSize::new(dir.path().join("missing"));
        assert!(metric.result().is_none());
    }
}
