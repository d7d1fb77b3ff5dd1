//! ImportArchiveHandler - Imports every topic of a BCF archive.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::bcf::{Issue, StatusMapping, SyncFailure};
use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, UserId};
use crate::ports::{ArchiveReader, IssueRepository, StatusCatalog};

use super::reconcile_issue::{ReconcileIssueCommand, ReconcileIssueHandler};

/// Command to import a whole archive into a project.
#[derive(Debug, Clone)]
pub struct ImportArchiveCommand {
    pub project_id: ProjectId,
    pub current_user: UserId,
}

/// A topic that was reconciled and saved.
#[derive(Debug, Clone)]
pub struct ImportedTopic {
    pub entry_path: String,
    pub issue: Issue,
    pub sync_failures: Vec<SyncFailure>,
}

/// A topic that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTopic {
    pub entry_path: String,
    pub code: ErrorCode,
    pub message: String,
}

/// Outcome of an archive import.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub imported: Vec<ImportedTopic>,
    pub failed: Vec<FailedTopic>,
}

impl ImportReport {
    /// True if every topic was imported without any failure.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.imported.iter().all(|t| t.sync_failures.is_empty())
    }
}

/// Handler for importing a BCF archive.
///
/// Topics are processed one after another. A topic that fails is
/// recorded in the report and the import moves on to the next one.
pub struct ImportArchiveHandler {
    reconciler: ReconcileIssueHandler,
    issues: Arc<dyn IssueRepository>,
    statuses: Arc<dyn StatusCatalog>,
}

impl ImportArchiveHandler {
    pub fn new(
        reconciler: ReconcileIssueHandler,
        issues: Arc<dyn IssueRepository>,
        statuses: Arc<dyn StatusCatalog>,
    ) -> Self {
        Self {
            reconciler,
            issues,
            statuses,
        }
    }

    /// Imports every markup entry of `archive`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` only if the status catalog cannot be read.
    /// Per-topic failures are reported in `ImportReport::failed`.
    pub async fn handle(
        &self,
        cmd: ImportArchiveCommand,
        archive: &dyn ArchiveReader,
    ) -> Result<ImportReport, DomainError> {
        let statuses = self.load_status_mapping().await?;
        let config = self.reconciler.config();

        let entries: Vec<String> = archive
            .entry_names()
            .into_iter()
            .filter(|name| config.is_markup_entry(name))
            .collect();
        if entries.is_empty() {
            warn!(project = %cmd.project_id, "BCF archive contains no topic markup");
        }

        let mut report = ImportReport::default();
        for entry_path in entries {
            let reconciled = self
                .reconciler
                .handle(
                    ReconcileIssueCommand {
                        project_id: cmd.project_id,
                        entry_path: entry_path.clone(),
                        current_user: cmd.current_user.clone(),
                    },
                    archive,
                    &statuses,
                )
                .await;

            let result = match reconciled {
                Ok(result) => result,
                Err(err) => {
                    error!(entry = %entry_path, code = %err.code(), "Failed to import BCF topic: {}", err);
                    report.failed.push(FailedTopic {
                        entry_path,
                        code: err.code(),
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            if let Err(err) = self.issues.save(&result.issue).await {
                error!(entry = %entry_path, code = %err.code, "Failed to save BCF issue: {}", err);
                report.failed.push(FailedTopic {
                    entry_path,
                    code: err.code,
                    message: err.to_string(),
                });
                continue;
            }

            report.imported.push(ImportedTopic {
                entry_path,
                issue: result.issue,
                sync_failures: result.sync_failures,
            });
        }

        info!(
            project = %cmd.project_id,
            imported = report.imported.len(),
            failed = report.failed.len(),
            "BCF import finished"
        );
        Ok(report)
    }

    async fn load_status_mapping(&self) -> Result<StatusMapping, DomainError> {
        let statuses = self.statuses.list_statuses().await?;
        let default_status = self.statuses.default_status_id().await?;
        Ok(StatusMapping::new(
            statuses.into_iter().map(|s| (s.name, s.id)),
            default_status,
        ))
    }
}
