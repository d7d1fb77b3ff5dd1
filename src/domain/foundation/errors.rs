//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Markup and archive errors
    MalformedMarkup,
    InvalidEntryPath,
    ArchiveEntryMissing,
    ArchiveUnreadable,

    // Issue invariants
    DuplicateViewpoint,
    DuplicateComment,
    CommentNotFound,

    // Synchronization errors
    WorkItemSyncFailed,
    CommentSyncFailed,

    // Infrastructure errors
    DatabaseError,
    StorageError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MalformedMarkup => "MALFORMED_MARKUP",
            ErrorCode::InvalidEntryPath => "INVALID_ENTRY_PATH",
            ErrorCode::ArchiveEntryMissing => "ARCHIVE_ENTRY_MISSING",
            ErrorCode::ArchiveUnreadable => "ARCHIVE_UNREADABLE",
            ErrorCode::DuplicateViewpoint => "DUPLICATE_VIEWPOINT",
            ErrorCode::DuplicateComment => "DUPLICATE_COMMENT",
            ErrorCode::CommentNotFound => "COMMENT_NOT_FOUND",
            ErrorCode::WorkItemSyncFailed => "WORK_ITEM_SYNC_FAILED",
            ErrorCode::CommentSyncFailed => "COMMENT_SYNC_FAILED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("work_item_type");
        assert_eq!(format!("{}", err), "Field 'work_item_type' cannot be empty");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::DuplicateViewpoint, "Viewpoint v1 already exists");
        assert_eq!(
            format!("{}", err),
            "[DUPLICATE_VIEWPOINT] Viewpoint v1 already exists"
        );
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::StorageError, "Disk full")
            .with_detail("filename", "snapshot.png")
            .with_detail("attempt", "1");

        assert_eq!(err.details.get("filename"), Some(&"snapshot.png".to_string()));
        assert_eq!(err.details.get("attempt"), Some(&"1".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::MalformedMarkup), "MALFORMED_MARKUP");
        assert_eq!(format!("{}", ErrorCode::ArchiveEntryMissing), "ARCHIVE_ENTRY_MISSING");
    }
}
