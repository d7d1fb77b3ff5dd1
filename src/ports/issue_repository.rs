//! Issue Repository Port - Persistence of BCF issues.

use async_trait::async_trait;

use crate::domain::bcf::{Issue, TopicUuid};
use crate::domain::foundation::{DomainError, ProjectId};

/// Port for loading and storing issues.
///
/// # Contract
///
/// Implementations must:
/// - Key issues by `(topic, project_id)`
/// - Treat `save` as insert-or-replace for that key
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Finds the issue for a topic within a project.
    async fn find_by_topic(
        &self,
        topic: &TopicUuid,
        project_id: ProjectId,
    ) -> Result<Option<Issue>, DomainError>;

    /// Persists the issue with its viewpoints and comments.
    async fn save(&self, issue: &Issue) -> Result<(), DomainError>;
}
