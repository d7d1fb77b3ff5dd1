//! Note Appender Port - Append entries to a work item thread.

use async_trait::async_trait;

use super::ServiceErrors;
use crate::domain::foundation::{JournalId, UserId, WorkItemId};

/// Port for adding notes to a work item's discussion thread.
#[async_trait]
pub trait NoteAppender: Send + Sync {
    /// Appends `text` as a note authored by `author`.
    ///
    /// Returns the reference of the created thread entry.
    async fn append(
        &self,
        work_item: WorkItemId,
        author: &UserId,
        text: &str,
    ) -> Result<JournalId, ServiceErrors>;
}
