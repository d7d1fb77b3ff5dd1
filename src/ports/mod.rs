//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the import core and the project-management system. Adapters implement
//! these ports.
//!
//! ## Input Ports
//!
//! - `ArchiveReader` - Named-entry access to the BCF zip container
//! - `MarkupParser` - Topic markup extraction
//!
//! ## Collaborator Ports
//!
//! - `WorkItemService` - Work item create/update
//! - `NoteAppender` - Work item discussion thread
//! - `MemberDirectory` - Comment author lookup and permission check
//! - `StatusCatalog` - Status names and default status
//! - `AttachmentSink` - Snapshot image storage
//! - `IssueRepository` - Issue persistence

mod archive_reader;
mod attachment_sink;
mod issue_repository;
mod markup_parser;
mod member_directory;
mod note_appender;
mod status_catalog;
mod work_item_service;

pub use archive_reader::{ArchiveError, ArchiveReader, EntryStream};
pub use attachment_sink::{AttachmentSink, FileEntry};
pub use issue_repository::IssueRepository;
pub use markup_parser::MarkupParser;
pub use member_directory::MemberDirectory;
pub use note_appender::NoteAppender;
pub use status_catalog::{StatusCatalog, StatusEntry};
pub use work_item_service::{ServiceErrors, WorkItemParams, WorkItemService};
