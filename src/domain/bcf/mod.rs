//! BCF module - topic markup, issue aggregate and reconciliation rules.
//!
//! # Module Organization
//!
//! - `markup` - Parsed markup document and its records
//! - `status` - Status name resolution snapshot
//! - `topic` - Topic identity from archive entry paths
//! - `issue` - Issue aggregate with viewpoints and comments
//! - `author` - Comment author resolution
//! - `errors` - Fatal and recoverable import errors

mod author;
mod errors;
mod issue;
mod markup;
mod status;
mod topic;

pub use author::{resolve_comment_author, CommentAuthor, Member};
pub use errors::{MarkupError, ReconcileError, SyncFailure};
pub use issue::{Comment, Issue, Snapshot, Viewpoint};
pub use markup::{CommentRecord, MarkupDocument, ViewpointRecord, WorkItemAttributes};
pub use status::StatusMapping;
pub use topic::TopicUuid;
