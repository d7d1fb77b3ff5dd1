//! In-memory attachment sink.

use async_trait::async_trait;
use std::io::Read;
use std::sync::Mutex;

use crate::domain::foundation::{AttachmentId, DomainError, ErrorCode};
use crate::ports::{AttachmentSink, FileEntry};

/// An attachment captured by [`InMemoryAttachmentSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAttachment {
    pub id: AttachmentId,
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Reads attachments fully into memory and numbers them from 1.
#[derive(Debug, Default)]
pub struct InMemoryAttachmentSink {
    stored: Mutex<Vec<StoredAttachment>>,
    fail_stores: Mutex<Option<DomainError>>,
}

impl InMemoryAttachmentSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every store fail with a storage error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn fail_stores_with(&self, message: &str) {
        *self
            .fail_stores
            .lock()
            .expect("InMemoryAttachmentSink: lock poisoned") =
            Some(DomainError::new(ErrorCode::StorageError, message));
    }

    /// Returns all stored attachments (for test assertions).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn stored(&self) -> Vec<StoredAttachment> {
        self.stored
            .lock()
            .expect("InMemoryAttachmentSink: lock poisoned")
            .clone()
    }
}

#[async_trait]
impl AttachmentSink for InMemoryAttachmentSink {
    async fn store(&self, file: FileEntry) -> Result<AttachmentId, DomainError> {
        if let Some(err) = self
            .fail_stores
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::StorageError, "Attachment lock poisoned"))?
            .clone()
        {
            return Err(err);
        }

        let filename = file.filename().to_string();
        let mut bytes = Vec::new();
        file.into_stream().read_to_end(&mut bytes).map_err(|e| {
            DomainError::new(ErrorCode::StorageError, format!("Failed to read {}: {}", filename, e))
        })?;

        let mut stored = self
            .stored
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::StorageError, "Attachment lock poisoned"))?;
        let id = AttachmentId::new(stored.len() as u64 + 1);
        stored.push(StoredAttachment {
            id,
            filename,
            bytes,
        });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn stores_stream_content_under_filename() {
        let sink = InMemoryAttachmentSink::new();
        let entry = FileEntry::new(Box::new(Cursor::new(b"PNG".to_vec())), "snapshot.png");

        let id = sink.store(entry).await.unwrap();

        assert_eq!(id, AttachmentId::new(1));
        assert_eq!(
            sink.stored(),
            vec![StoredAttachment {
                id,
                filename: "snapshot.png".to_string(),
                bytes: b"PNG".to_vec(),
            }]
        );
    }

    #[tokio::test]
    async fn injected_failure_stores_nothing() {
        let sink = InMemoryAttachmentSink::new();
        sink.fail_stores_with("quota exceeded");
        let entry = FileEntry::new(Box::new(Cursor::new(b"PNG".to_vec())), "snapshot.png");

        let err = sink.store(entry).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(sink.stored().is_empty());
    }
}
