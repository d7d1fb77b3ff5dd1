//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::bcf::{
    FailedTopic, ImportArchiveCommand, ImportArchiveHandler, ImportReport, ImportedTopic,
    ReconcileIssueCommand, ReconcileIssueHandler, ReconcileIssueResult, ReconcilePorts,
};
