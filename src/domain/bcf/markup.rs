//! Parsed view of one topic's markup document.

use serde::Serialize;

use super::StatusMapping;
use crate::domain::foundation::StatusId;

/// One `Markup/Viewpoints` element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ViewpointRecord {
    /// `Guid` attribute, unique within the topic.
    pub uuid: String,
    /// Filename of the viewpoint XML inside the topic folder.
    pub viewpoint_ref: String,
    /// Filename of the snapshot image; empty when the topic has none.
    pub snapshot_ref: String,
}

impl ViewpointRecord {
    pub fn has_snapshot(&self) -> bool {
        !self.snapshot_ref.is_empty()
    }
}

/// One `Markup/Comment` element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CommentRecord {
    pub uuid: String,
    /// Raw timestamp token as written by the authoring tool.
    pub date: String,
    pub author_email: String,
    pub body: String,
}

/// Attribute set forwarded to the work-item service.
///
/// Project and type are filled in by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkItemAttributes {
    pub subject: String,
    pub description: String,
    pub status_id: StatusId,
}

/// Read-only view of a topic's `markup.bcf`.
///
/// Absent elements and attributes are represented by empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MarkupDocument {
    title: String,
    description: String,
    status_token: String,
    viewpoints: Vec<ViewpointRecord>,
    comments: Vec<CommentRecord>,
}

impl MarkupDocument {
    pub fn new(
        title: String,
        description: String,
        status_token: String,
        viewpoints: Vec<ViewpointRecord>,
        comments: Vec<CommentRecord>,
    ) -> Self {
        Self {
            title,
            description,
            status_token,
            viewpoints,
            comments,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Value of the `TopicStatus` attribute.
    pub fn status_token(&self) -> &str {
        &self.status_token
    }

    pub fn viewpoints(&self) -> &[ViewpointRecord] {
        &self.viewpoints
    }

    pub fn comments(&self) -> &[CommentRecord] {
        &self.comments
    }

    /// Derives the minimal work item attributes for this topic.
    pub fn work_item_attributes(&self, statuses: &StatusMapping) -> WorkItemAttributes {
        WorkItemAttributes {
            subject: self.title.clone(),
            description: self.description.clone(),
            status_id: statuses.resolve(&self.status_token),
        }
    }
}
