//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and error types that form the
//! vocabulary of the BCF import domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AttachmentId, IssueId, JournalId, ProjectId, StatusId, UserId, WorkItemId};
pub use timestamp::Timestamp;
