//! Comment author resolution.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// A project member as reported by the member directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub user_id: UserId,
    pub email: String,
}

/// Who a BCF comment is attributed to in the work item thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentAuthor {
    /// The member whose email matched the comment author.
    Member(UserId),
    /// The user running the import.
    Importer(UserId),
}

impl CommentAuthor {
    pub fn user_id(&self) -> &UserId {
        match self {
            CommentAuthor::Member(id) | CommentAuthor::Importer(id) => id,
        }
    }
}

/// Picks the effective author of an imported comment.
///
/// The matched member is used only when they may add notes in the
/// project. Otherwise the comment is attributed to the importing user,
/// never to nobody.
pub fn resolve_comment_author(
    candidate: Option<&Member>,
    may_add_notes: bool,
    importer: &UserId,
) -> CommentAuthor {
    match candidate {
        Some(member) if may_add_notes => CommentAuthor::Member(member.user_id.clone()),
        _ => CommentAuthor::Importer(importer.clone()),
    }
}
