//! BCF import handlers.
//!
//! - `ReconcileIssueHandler` merges one topic into its issue
//! - `ImportArchiveHandler` drives it over every topic of an archive

mod import_archive;
mod reconcile_issue;

pub use import_archive::{
    FailedTopic, ImportArchiveCommand, ImportArchiveHandler, ImportReport, ImportedTopic,
};
pub use reconcile_issue::{
    ReconcileIssueCommand, ReconcileIssueHandler, ReconcileIssueResult, ReconcilePorts,
};
