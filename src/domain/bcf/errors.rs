//! BCF import error types.

use thiserror::Error;

use super::TopicUuid;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ArchiveError;

/// The markup bytes are not well-formed XML.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("Malformed markup XML at byte {position}: {reason}")]
    Malformed { position: u64, reason: String },
}

impl MarkupError {
    pub fn malformed(position: u64, reason: impl Into<String>) -> Self {
        MarkupError::Malformed {
            position,
            reason: reason.into(),
        }
    }
}

/// Fatal errors that abort the reconciliation of one topic.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    MalformedXml(#[from] MarkupError),

    #[error("Archive entry '{path}' is missing")]
    MissingEntry { path: String },

    #[error("Entry path '{0}' does not name a topic folder")]
    InvalidEntryPath(String),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Infrastructure(#[from] DomainError),
}

impl ReconcileError {
    pub fn missing_entry(path: impl Into<String>) -> Self {
        ReconcileError::MissingEntry { path: path.into() }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ReconcileError::MalformedXml(_) => ErrorCode::MalformedMarkup,
            ReconcileError::MissingEntry { .. } => ErrorCode::ArchiveEntryMissing,
            ReconcileError::InvalidEntryPath(_) => ErrorCode::InvalidEntryPath,
            ReconcileError::Archive(_) => ErrorCode::ArchiveUnreadable,
            ReconcileError::Infrastructure(err) => err.code,
        }
    }
}

/// A synchronization with the project-management system that failed
/// without aborting the import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncFailure {
    #[error("Failed to synchronize BCF {topic} with work item: {messages}")]
    WorkItem { topic: TopicUuid, messages: String },

    #[error("Failed to create comment {comment} for BCF {topic}: {messages}")]
    Comment {
        topic: TopicUuid,
        comment: String,
        messages: String,
    },

    #[error("Failed to record import note for BCF {topic}: {messages}")]
    ImportNote { topic: TopicUuid, messages: String },
}

impl SyncFailure {
    pub fn code(&self) -> ErrorCode {
        match self {
            SyncFailure::WorkItem { .. } => ErrorCode::WorkItemSyncFailed,
            SyncFailure::Comment { .. } | SyncFailure::ImportNote { .. } => {
                ErrorCode::CommentSyncFailed
            }
        }
    }
}
