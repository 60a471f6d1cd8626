//! Persisted id of the last processed chat message.

use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

/// File holding a single decimal message id.
#[derive(Debug, Clone)]
pub struct WatermarkStore {
    path: PathBuf,
}

impl WatermarkStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored id, or 0 when the file is missing, empty, or unreadable.
    #[must_use]
    pub fn load(&self) -> u64 {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return 0,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read watermark, starting from 0");
                return 0;
            }
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return 0;
        }
        raw.parse().unwrap_or_else(|_| {
            warn!(path = %self.path.display(), value = raw, "corrupt watermark, starting from 0");
            0
        })
    }

    /// Persist `id`, creating the parent directory if needed.
    ///
    /// The value is written to a sibling temp file and renamed into place.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the directory or file cannot be written.
    pub fn store(&self, id: u64) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, id.to_string())?;
        std::fs::rename(&tmp, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = WatermarkStore::new(dir.path().join("last_message_id.txt"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = WatermarkStore::new(dir.path().join("data").join("last_message_id.txt"));
        store.store(1_234_567_890_123_456_789).unwrap();
        assert_eq!(store.load(), 1_234_567_890_123_456_789);
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "1234567890123456789"
        );
    }

    #[test]
    fn garbage_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_message_id.txt");
        std::fs::write(&path, "not-a-number").unwrap();
        assert_eq!(WatermarkStore::new(&path).load(), 0);

        std::fs::write(&path, "  105\n").unwrap();
        assert_eq!(WatermarkStore::new(&path).load(), 105);
    }
}
