//! Archive Reader Port - Named-entry access to a BCF container.
//!
//! A BCF archive is a zip file with one folder per topic:
//!
//! ```text
//! bcf.version
//! 3f2e8c1a-.../
//! ├── markup.bcf
//! ├── viewpoint.bcfv
//! └── snapshot.png
//! ```
//!
//! The reconciler only needs random access to entries by path. The reader
//! is shared read-only across every topic of one import run.

use std::io::Read;
use thiserror::Error;

/// Readable byte stream of one archive entry.
pub type EntryStream = Box<dyn Read + Send>;

/// Port for reading entries out of a BCF archive.
///
/// # Contract
///
/// Implementations must:
/// - Return `Ok(None)` for paths that are not in the archive
/// - Never mutate the archive
/// - List entry names in archive order, directories excluded
pub trait ArchiveReader: Send + Sync {
    /// Names of all file entries in archive order.
    fn entry_names(&self) -> Vec<String>;

    /// Opens the entry at `path` (`{topic}/{filename}`).
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::Read` when the entry exists but cannot be
    /// decompressed.
    fn find_entry(&self, path: &str) -> Result<Option<EntryStream>, ArchiveError>;

    /// Reads the full content of the entry at `path`.
    fn read_entry(&self, path: &str) -> Result<Option<Vec<u8>>, ArchiveError> {
        let Some(mut stream) = self.find_entry(path)? else {
            return Ok(None);
        };
        let mut bytes = Vec::new();
        stream
            .read_to_end(&mut bytes)
            .map_err(|e| ArchiveError::read(path, e.to_string()))?;
        Ok(Some(bytes))
    }
}

/// Archive access errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArchiveError {
    #[error("Failed to open archive: {0}")]
    Open(String),

    #[error("Failed to read archive entry '{path}': {reason}")]
    Read { path: String, reason: String },
}

impl ArchiveError {
    pub fn read(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ArchiveError::Read {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
