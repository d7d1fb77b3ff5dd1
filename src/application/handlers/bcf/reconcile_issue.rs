//! ReconcileIssueHandler - Merges one topic markup into its issue.
//!
//! Re-running the handler on the same archive entry is idempotent:
//! viewpoints and comments are matched by uuid and never duplicated.
//! Once the work item has been touched nothing else fails the topic:
//! work item, thread and member directory failures are logged and
//! recorded, so local progress survives a failing collaborator.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::ImportConfig;
use crate::domain::bcf::{
    resolve_comment_author, Comment, CommentAuthor, Issue, Member, MarkupDocument,
    ReconcileError, Snapshot, StatusMapping, SyncFailure, TopicUuid, Viewpoint, ViewpointRecord,
};
use crate::domain::foundation::{DomainError, JournalId, ProjectId, UserId, WorkItemId};
use crate::ports::{
    ArchiveReader, AttachmentSink, EntryStream, FileEntry, IssueRepository, MarkupParser,
    MemberDirectory, NoteAppender, ServiceErrors, WorkItemParams, WorkItemService,
};

/// Command to reconcile one topic markup entry.
#[derive(Debug, Clone)]
pub struct ReconcileIssueCommand {
    pub project_id: ProjectId,
    /// Path of the markup entry, e.g. `"3f2e.../markup.bcf"`.
    pub entry_path: String,
    /// User running the import.
    pub current_user: UserId,
}

/// Result of a reconciliation.
///
/// The issue is returned unsaved. `sync_failures` lists every
/// recoverable failure that happened along the way.
#[derive(Debug, Clone)]
pub struct ReconcileIssueResult {
    pub issue: Issue,
    pub sync_failures: Vec<SyncFailure>,
}

/// Collaborators of the reconciler.
#[derive(Clone)]
pub struct ReconcilePorts {
    pub parser: Arc<dyn MarkupParser>,
    pub issues: Arc<dyn IssueRepository>,
    pub work_items: Arc<dyn WorkItemService>,
    pub notes: Arc<dyn NoteAppender>,
    pub members: Arc<dyn MemberDirectory>,
    pub attachments: Arc<dyn AttachmentSink>,
}

/// Handler for reconciling a topic with its issue.
pub struct ReconcileIssueHandler {
    ports: ReconcilePorts,
    config: ImportConfig,
}

impl ReconcileIssueHandler {
    pub fn new(ports: ReconcilePorts, config: ImportConfig) -> Self {
        Self { ports, config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Reconciles the topic at `cmd.entry_path` into its issue.
    ///
    /// # Errors
    ///
    /// - `InvalidEntryPath` if the entry is not inside a topic folder
    /// - `MissingEntry` if the markup, a viewpoint or a snapshot is absent
    /// - `MalformedXml` if the markup is not well-formed
    /// - `Infrastructure` if the issue store or attachment sink fails
    pub async fn handle(
        &self,
        cmd: ReconcileIssueCommand,
        archive: &dyn ArchiveReader,
        statuses: &StatusMapping,
    ) -> Result<ReconcileIssueResult, ReconcileError> {
        let topic = TopicUuid::from_entry_path(&cmd.entry_path)
            .ok_or_else(|| ReconcileError::InvalidEntryPath(cmd.entry_path.clone()))?;
        let markup = archive
            .read_entry(&cmd.entry_path)?
            .ok_or_else(|| ReconcileError::missing_entry(&cmd.entry_path))?;
        let document = self.ports.parser.parse(&markup)?;

        // 1. Find or initialize the issue
        let mut issue = match self.ports.issues.find_by_topic(&topic, cmd.project_id).await? {
            Some(issue) => issue,
            None => Issue::new(topic.clone(), cmd.project_id),
        };

        // 2. Markup is a point-in-time copy, always replaced
        issue.replace_markup(markup);

        // 3. Viewpoints
        self.merge_viewpoints(&mut issue, &document, archive).await?;

        // 4. Work item
        let mut sync_failures = Vec::new();
        self.synchronize_work_item(&mut issue, &document, statuses, &cmd, &mut sync_failures)
            .await;

        // 5. Comments
        self.merge_comments(&mut issue, &document, &cmd, &mut sync_failures)
            .await?;

        info!(
            topic = %topic,
            project = %cmd.project_id,
            viewpoints = issue.viewpoints().len(),
            comments = issue.comments().len(),
            failures = sync_failures.len(),
            "Reconciled BCF topic"
        );

        Ok(ReconcileIssueResult {
            issue,
            sync_failures,
        })
    }

    async fn merge_viewpoints(
        &self,
        issue: &mut Issue,
        document: &MarkupDocument,
        archive: &dyn ArchiveReader,
    ) -> Result<(), ReconcileError> {
        // All entries are read before the first snapshot is stored, so a
        // missing file fails the topic without leaving attachments behind.
        let mut pending: Vec<PendingViewpoint<'_>> = Vec::new();
        for record in document.viewpoints() {
            let seen = pending.iter().any(|p| p.record.uuid == record.uuid);
            if seen || issue.has_viewpoint(&record.uuid) {
                debug!(topic = %issue.topic(), viewpoint = %record.uuid, "Viewpoint already imported");
                continue;
            }
            pending.push(PendingViewpoint::read(issue.topic(), record, archive)?);
        }

        for viewpoint in pending {
            let record = viewpoint.record;
            let snapshot = match viewpoint.snapshot {
                Some(stream) => {
                    let attachment_id = self
                        .ports
                        .attachments
                        .store(FileEntry::new(stream, record.snapshot_ref.clone()))
                        .await?;
                    Some(Snapshot {
                        filename: record.snapshot_ref.clone(),
                        attachment_id,
                    })
                }
                None => None,
            };

            issue.add_viewpoint(Viewpoint::new(
                record.uuid.clone(),
                record.viewpoint_ref.clone(),
                viewpoint.content,
                snapshot,
            ))?;
        }
        Ok(())
    }

    async fn synchronize_work_item(
        &self,
        issue: &mut Issue,
        document: &MarkupDocument,
        statuses: &StatusMapping,
        cmd: &ReconcileIssueCommand,
        sync_failures: &mut Vec<SyncFailure>,
    ) {
        let params = WorkItemParams {
            project_id: cmd.project_id,
            type_name: self.config.work_item_type.clone(),
            attributes: document.work_item_attributes(statuses),
            send_notifications: self.config.send_notifications,
        };

        let call = match issue.work_item_id() {
            Some(work_item) => {
                self.ports
                    .work_items
                    .update(work_item, &params, &cmd.current_user)
                    .await
            }
            None => self.ports.work_items.create(&params, &cmd.current_user).await,
        };

        match call {
            Ok(work_item) => {
                issue.bind_work_item(work_item, &params.attributes);
                if let Err(errors) = self
                    .append_note(work_item, &cmd.current_user, &self.config.sync_note)
                    .await
                {
                    error!(
                        topic = %issue.topic(),
                        "Failed to record import note for BCF topic: {}",
                        errors.full_messages()
                    );
                    sync_failures.push(SyncFailure::ImportNote {
                        topic: issue.topic().clone(),
                        messages: errors.full_messages(),
                    });
                }
            }
            Err(errors) => {
                error!(
                    topic = %issue.topic(),
                    "Failed to synchronize BCF topic with work item: {}",
                    errors.full_messages()
                );
                sync_failures.push(SyncFailure::WorkItem {
                    topic: issue.topic().clone(),
                    messages: errors.full_messages(),
                });
            }
        }
    }

    async fn merge_comments(
        &self,
        issue: &mut Issue,
        document: &MarkupDocument,
        cmd: &ReconcileIssueCommand,
        sync_failures: &mut Vec<SyncFailure>,
    ) -> Result<(), ReconcileError> {
        for record in document.comments() {
            if issue.has_comment(&record.uuid) {
                debug!(topic = %issue.topic(), comment = %record.uuid, "Comment already imported");
                continue;
            }
            issue.add_comment(Comment::from_record(record))?;

            // Without a work item there is no thread to post to
            let Some(work_item) = issue.work_item_id() else {
                continue;
            };

            let author = self
                .comment_author(
                    issue.topic(),
                    cmd.project_id,
                    &record.author_email,
                    &cmd.current_user,
                )
                .await;
            match self.append_note(work_item, author.user_id(), &record.body).await {
                Ok(journal_id) => issue.bind_comment(&record.uuid, journal_id)?,
                Err(errors) => {
                    error!(
                        topic = %issue.topic(),
                        comment = %record.uuid,
                        "Failed to create comment for BCF topic: {}",
                        errors.full_messages()
                    );
                    sync_failures.push(SyncFailure::Comment {
                        topic: issue.topic().clone(),
                        comment: record.uuid.clone(),
                        messages: errors.full_messages(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Looks up the member behind a comment's author email.
    ///
    /// A failing member directory does not stop the import. The comment
    /// is attributed to the importer instead.
    async fn comment_author(
        &self,
        topic: &TopicUuid,
        project_id: ProjectId,
        email: &str,
        importer: &UserId,
    ) -> CommentAuthor {
        if email.trim().is_empty() {
            return resolve_comment_author(None, false, importer);
        }

        match self.lookup_member(project_id, email).await {
            Ok((candidate, may_add_notes)) => {
                resolve_comment_author(candidate.as_ref(), may_add_notes, importer)
            }
            Err(err) => {
                warn!(
                    topic = %topic,
                    code = %err.code,
                    "Failed to look up BCF comment author, attributing to importer: {}",
                    err.message
                );
                resolve_comment_author(None, false, importer)
            }
        }
    }

    async fn lookup_member(
        &self,
        project_id: ProjectId,
        email: &str,
    ) -> Result<(Option<Member>, bool), DomainError> {
        let candidate = self.ports.members.find_by_email(project_id, email).await?;
        let may_add_notes = match &candidate {
            Some(member) => self.ports.members.can_add_notes(member, project_id).await?,
            None => false,
        };
        Ok((candidate, may_add_notes))
    }

    async fn append_note(
        &self,
        work_item: WorkItemId,
        author: &UserId,
        text: &str,
    ) -> Result<JournalId, ServiceErrors> {
        self.ports.notes.append(work_item, author, text).await
    }
}

/// A new viewpoint whose archive entries have been read but not stored.
struct PendingViewpoint<'a> {
    record: &'a ViewpointRecord,
    content: Vec<u8>,
    snapshot: Option<EntryStream>,
}

impl<'a> PendingViewpoint<'a> {
    fn read(
        topic: &TopicUuid,
        record: &'a ViewpointRecord,
        archive: &dyn ArchiveReader,
    ) -> Result<Self, ReconcileError> {
        let path = topic.entry_path(&record.viewpoint_ref);
        let content = archive
            .read_entry(&path)?
            .ok_or_else(|| ReconcileError::missing_entry(path))?;

        let snapshot = if record.has_snapshot() {
            let path = topic.entry_path(&record.snapshot_ref);
            let stream = archive
                .find_entry(&path)?
                .ok_or_else(|| ReconcileError::missing_entry(path))?;
            Some(stream)
        } else {
            None
        };

        Ok(Self {
            record,
            content,
            snapshot,
        })
    }
}
