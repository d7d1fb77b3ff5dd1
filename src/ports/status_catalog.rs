//! Status Catalog Port - Known work item statuses.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, StatusId};

/// One status of the target system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub id: StatusId,
    pub name: String,
}

/// Port for reading the status catalog.
///
/// Read once per import run to build a `StatusMapping`.
#[async_trait]
pub trait StatusCatalog: Send + Sync {
    /// All statuses.
    async fn list_statuses(&self) -> Result<Vec<StatusEntry>, DomainError>;

    /// Status assigned when a topic's status matches none of the catalog.
    async fn default_status_id(&self) -> Result<StatusId, DomainError>;
}
