//! Work Item Service Port - Create and update work items.
//!
//! The project-management system owns work items. The importer asks it to
//! create one per topic and to update it on every later import.

use async_trait::async_trait;
use std::error::Error;
use std::fmt;

use crate::domain::bcf::WorkItemAttributes;
use crate::domain::foundation::{ProjectId, UserId, WorkItemId};

/// Everything the service needs to create or update a work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItemParams {
    pub project_id: ProjectId,
    /// Work item type name, e.g. `"Issue"`.
    pub type_name: String,
    pub attributes: WorkItemAttributes,
    pub send_notifications: bool,
}

/// Failure reported by a collaborator service.
///
/// Carries the service's own messages, e.g. validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceErrors {
    messages: Vec<String>,
}

impl ServiceErrors {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// All messages joined with `"; "`.
    pub fn full_messages(&self) -> String {
        self.messages.join("; ")
    }
}

impl fmt::Display for ServiceErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_messages())
    }
}

impl Error for ServiceErrors {}

/// Port for work item synchronization.
///
/// # Contract
///
/// Implementations must:
/// - Report business failures (validation, locking) as `ServiceErrors`
/// - Act on behalf of `author` for permission checks and journals
/// - Return the reference of the created or updated work item
#[async_trait]
pub trait WorkItemService: Send + Sync {
    /// Creates a new work item.
    async fn create(
        &self,
        params: &WorkItemParams,
        author: &UserId,
    ) -> Result<WorkItemId, ServiceErrors>;

    /// Updates an existing work item with the given attributes.
    async fn update(
        &self,
        work_item: WorkItemId,
        params: &WorkItemParams,
        author: &UserId,
    ) -> Result<WorkItemId, ServiceErrors>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_messages_joins_with_semicolon() {
        let errors = ServiceErrors::new(vec![
            "Subject can't be blank".to_string(),
            "Work item is locked".to_string(),
        ]);
        assert_eq!(errors.full_messages(), "Subject can't be blank; Work item is locked");
        assert_eq!(errors.to_string(), errors.full_messages());
    }

    #[test]
    fn empty_errors_render_empty_string() {
        assert_eq!(ServiceErrors::default().full_messages(), "");
    }
}
