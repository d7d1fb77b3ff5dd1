//! BCF issue aggregate.
//!
//! An issue mirrors one topic of a BCF archive inside a project. It owns
//! the viewpoints and comments imported for that topic and optionally
//! references the work item it is synchronized with.
//!
//! # Ownership
//!
//! The work item and its discussion thread live in the project-management
//! system. The issue only stores their references.

use serde::{Deserialize, Serialize};

use super::{CommentRecord, TopicUuid, WorkItemAttributes};
use crate::domain::foundation::{
    AttachmentId, DomainError, ErrorCode, IssueId, JournalId, ProjectId, StatusId, Timestamp,
    WorkItemId,
};

/// Snapshot image stored as an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub filename: String,
    pub attachment_id: AttachmentId,
}

/// A saved camera/view state of a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewpoint {
    uuid: String,
    /// Filename the viewpoint had inside the archive.
    name: String,
    /// Raw viewpoint XML.
    content: Vec<u8>,
    snapshot: Option<Snapshot>,
}

impl Viewpoint {
    pub fn new(uuid: String, name: String, content: Vec<u8>, snapshot: Option<Snapshot>) -> Self {
        Self {
            uuid,
            name,
            content,
            snapshot,
        }
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }
}

/// A topic comment, optionally bound to a work item thread entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    uuid: String,
    date: String,
    author_email: String,
    body: String,
    journal_id: Option<JournalId>,
}

impl Comment {
    pub fn from_record(record: &CommentRecord) -> Self {
        Self {
            uuid: record.uuid.clone(),
            date: record.date.clone(),
            author_email: record.author_email.clone(),
            body: record.body.clone(),
            journal_id: None,
        }
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Raw date token from the markup.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Date token parsed as RFC 3339, if it is one.
    pub fn date_time(&self) -> Option<Timestamp> {
        Timestamp::parse_rfc3339(&self.date)
    }

    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Thread entry this comment was posted as. `None` while unsynchronized.
    pub fn journal_id(&self) -> Option<JournalId> {
        self.journal_id
    }
}

/// BCF issue aggregate.
///
/// # Invariants
///
/// - keyed by `(topic, project_id)`
/// - viewpoint uuids are unique
/// - comment uuids are unique
/// - viewpoints and comments are only ever appended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    id: IssueId,
    topic: TopicUuid,
    project_id: ProjectId,
    markup: Vec<u8>,
    status_id: Option<StatusId>,
    subject: String,
    description: String,
    work_item_id: Option<WorkItemId>,
    viewpoints: Vec<Viewpoint>,
    comments: Vec<Comment>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Issue {
    /// Initializes an issue for a topic seen for the first time.
    pub fn new(topic: TopicUuid, project_id: ProjectId) -> Self {
        let now = Timestamp::now();
        Self {
            id: IssueId::new(),
            topic,
            project_id,
            markup: Vec::new(),
            status_id: None,
            subject: String::new(),
            description: String::new(),
            work_item_id: None,
            viewpoints: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &IssueId {
        &self.id
    }

    pub fn topic(&self) -> &TopicUuid {
        &self.topic
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn markup(&self) -> &[u8] {
        &self.markup
    }

    pub fn status_id(&self) -> Option<StatusId> {
        self.status_id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn work_item_id(&self) -> Option<WorkItemId> {
        self.work_item_id
    }

    pub fn viewpoints(&self) -> &[Viewpoint] {
        &self.viewpoints
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn has_viewpoint(&self, uuid: &str) -> bool {
        self.viewpoints.iter().any(|vp| vp.uuid == uuid)
    }

    pub fn has_comment(&self, uuid: &str) -> bool {
        self.comments.iter().any(|c| c.uuid == uuid)
    }

    pub fn comment(&self, uuid: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.uuid == uuid)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the stored markup with a new point-in-time copy.
    pub fn replace_markup(&mut self, markup: Vec<u8>) {
        self.markup = markup;
        self.touch();
    }

    /// Appends a viewpoint.
    ///
    /// # Errors
    ///
    /// - `DuplicateViewpoint` if a viewpoint with the same uuid exists
    pub fn add_viewpoint(&mut self, viewpoint: Viewpoint) -> Result<(), DomainError> {
        if self.has_viewpoint(&viewpoint.uuid) {
            return Err(DomainError::new(
                ErrorCode::DuplicateViewpoint,
                format!("Viewpoint {} already exists on topic {}", viewpoint.uuid, self.topic),
            )
            .with_detail("uuid", viewpoint.uuid.clone()));
        }
        self.viewpoints.push(viewpoint);
        self.touch();
        Ok(())
    }

    /// Appends a comment.
    ///
    /// # Errors
    ///
    /// - `DuplicateComment` if a comment with the same uuid exists
    pub fn add_comment(&mut self, comment: Comment) -> Result<(), DomainError> {
        if self.has_comment(&comment.uuid) {
            return Err(DomainError::new(
                ErrorCode::DuplicateComment,
                format!("Comment {} already exists on topic {}", comment.uuid, self.topic),
            )
            .with_detail("uuid", comment.uuid.clone()));
        }
        self.comments.push(comment);
        self.touch();
        Ok(())
    }

    /// Records the thread entry a comment was posted as.
    ///
    /// # Errors
    ///
    /// - `CommentNotFound` if no comment has the given uuid
    pub fn bind_comment(&mut self, uuid: &str, journal_id: JournalId) -> Result<(), DomainError> {
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.uuid == uuid)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::CommentNotFound,
                    format!("Comment {} not found on topic {}", uuid, self.topic),
                )
                .with_detail("uuid", uuid)
            })?;
        comment.journal_id = Some(journal_id);
        self.touch();
        Ok(())
    }

    /// Binds the synchronized work item and mirrors its attributes.
    pub fn bind_work_item(&mut self, work_item_id: WorkItemId, attributes: &WorkItemAttributes) {
        self.work_item_id = Some(work_item_id);
        self.subject = attributes.subject.clone();
        self.description = attributes.description.clone();
        self.status_id = Some(attributes.status_id);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
