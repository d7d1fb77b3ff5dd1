//! Member Directory Port - Project member lookup and note permission.

use async_trait::async_trait;

use crate::domain::bcf::Member;
use crate::domain::foundation::{DomainError, ProjectId};

/// Port for resolving BCF comment authors to project members.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Finds the project member with the given email address.
    async fn find_by_email(
        &self,
        project_id: ProjectId,
        email: &str,
    ) -> Result<Option<Member>, DomainError>;

    /// Whether the member may add notes to work items in the project.
    ///
    /// Consulted on every comment, never cached.
    async fn can_add_notes(
        &self,
        member: &Member,
        project_id: ProjectId,
    ) -> Result<bool, DomainError>;
}
