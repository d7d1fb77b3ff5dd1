//! In-memory status catalog.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::foundation::{DomainError, StatusId};
use crate::ports::{StatusCatalog, StatusEntry};

/// Fixed list of statuses with a designated default.
#[derive(Debug)]
pub struct InMemoryStatusCatalog {
    statuses: Vec<StatusEntry>,
    default_status: StatusId,
    list_calls: AtomicUsize,
}

impl InMemoryStatusCatalog {
    pub fn new(statuses: Vec<StatusEntry>, default_status: StatusId) -> Self {
        Self {
            statuses,
            default_status,
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Convenience constructor from `(id, name)` pairs.
    pub fn with_names(statuses: &[(u64, &str)], default_status: u64) -> Self {
        Self::new(
            statuses
                .iter()
                .map(|(id, name)| StatusEntry {
                    id: StatusId::new(*id),
                    name: name.to_string(),
                })
                .collect(),
            StatusId::new(default_status),
        )
    }

    /// How often the catalog was listed.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusCatalog for InMemoryStatusCatalog {
    async fn list_statuses(&self) -> Result<Vec<StatusEntry>, DomainError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.statuses.clone())
    }

    async fn default_status_id(&self) -> Result<StatusId, DomainError> {
        Ok(self.default_status)
    }
}
