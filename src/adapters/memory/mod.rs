//! In-memory collaborator adapters.
//!
//! Back the ports with plain data structures for tests, demos and dry
//! runs against a BCF archive without a project-management system.
//!
//! Methods may panic if an internal lock is poisoned. These adapters are
//! not meant to serve production traffic.

mod attachment_sink;
mod issue_repository;
mod member_directory;
mod status_catalog;
mod work_items;

pub use attachment_sink::{InMemoryAttachmentSink, StoredAttachment};
pub use issue_repository::InMemoryIssueRepository;
pub use member_directory::InMemoryMemberDirectory;
pub use status_catalog::InMemoryStatusCatalog;
pub use work_items::{InMemoryWorkItems, RecordedNote, RecordedWorkItem};
