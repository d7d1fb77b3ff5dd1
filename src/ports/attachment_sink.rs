//! Attachment Sink Port - File attachment storage.

use async_trait::async_trait;
use std::fmt;

use super::EntryStream;
use crate::domain::foundation::{AttachmentId, DomainError};

/// A named byte stream handed over for storage.
///
/// The reconciler never reads the stream itself.
pub struct FileEntry {
    filename: String,
    stream: EntryStream,
}

impl FileEntry {
    pub fn new(stream: EntryStream, filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            stream,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Consumes the entry, returning its stream.
    pub fn into_stream(self) -> EntryStream {
        self.stream
    }
}

impl fmt::Debug for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileEntry")
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

/// Port for storing snapshot images as attachments.
#[async_trait]
pub trait AttachmentSink: Send + Sync {
    /// Stores the file and returns its attachment reference.
    async fn store(&self, file: FileEntry) -> Result<AttachmentId, DomainError>;
}
