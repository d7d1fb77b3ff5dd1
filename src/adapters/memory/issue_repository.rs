//! In-memory issue repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use crate::domain::bcf::{Issue, TopicUuid};
use crate::domain::foundation::{DomainError, ErrorCode, ProjectId};
use crate::ports::IssueRepository;

/// Stores issues in a map keyed by `(topic, project)`.
///
/// Saved issues are cloned, so callers observe persistence the same way
/// they would with a database-backed repository.
#[derive(Debug, Default)]
pub struct InMemoryIssueRepository {
    issues: RwLock<HashMap<(TopicUuid, ProjectId), Issue>>,
    fail_saves: Mutex<Option<DomainError>>,
}

impl InMemoryIssueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every save fail with a database error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn fail_saves_with(&self, message: &str) {
        *self
            .fail_saves
            .lock()
            .expect("InMemoryIssueRepository: lock poisoned") =
            Some(DomainError::new(ErrorCode::DatabaseError, message));
    }

    /// Number of stored issues.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn count(&self) -> usize {
        self.issues
            .read()
            .expect("InMemoryIssueRepository: lock poisoned")
            .len()
    }

    /// Returns a stored issue (for test assertions).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn get(&self, topic: &TopicUuid, project_id: ProjectId) -> Option<Issue> {
        self.issues
            .read()
            .expect("InMemoryIssueRepository: lock poisoned")
            .get(&(topic.clone(), project_id))
            .cloned()
    }
}

fn poisoned() -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, "Issue store lock poisoned")
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn find_by_topic(
        &self,
        topic: &TopicUuid,
        project_id: ProjectId,
    ) -> Result<Option<Issue>, DomainError> {
        let issues = self.issues.read().map_err(|_| poisoned())?;
        Ok(issues.get(&(topic.clone(), project_id)).cloned())
    }

    async fn save(&self, issue: &Issue) -> Result<(), DomainError> {
        if let Some(err) = self.fail_saves.lock().map_err(|_| poisoned())?.clone() {
            return Err(err);
        }
        let mut issues = self.issues.write().map_err(|_| poisoned())?;
        issues.insert((issue.topic().clone(), issue.project_id()), issue.clone());
        Ok(())
    }
}
