//! In-memory work items and discussion threads.
//!
//! Implements both `WorkItemService` and `NoteAppender` over one shared
//! state so tests can follow a topic from work item creation to its
//! thread entries.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::foundation::{JournalId, UserId, WorkItemId};
use crate::ports::{NoteAppender, ServiceErrors, WorkItemParams, WorkItemService};

/// A work item as last written by the importer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWorkItem {
    pub id: WorkItemId,
    pub params: WorkItemParams,
    pub author: UserId,
    pub revisions: u32,
}

/// A thread entry appended to a work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedNote {
    pub id: JournalId,
    pub work_item: WorkItemId,
    pub author: UserId,
    pub text: String,
}

#[derive(Debug, Default)]
struct State {
    work_items: BTreeMap<WorkItemId, RecordedWorkItem>,
    notes: Vec<RecordedNote>,
    next_work_item: u64,
    create_calls: usize,
    update_calls: usize,
    fail_writes: Option<ServiceErrors>,
    fail_notes: Option<ServiceErrors>,
}

/// In-memory work item store with failure injection.
///
/// # Example
///
/// ```ignore
/// let work_items = InMemoryWorkItems::new();
/// work_items.fail_writes_with("Work item is locked");
///
/// // create/update now report ServiceErrors
/// ```
#[derive(Debug, Default)]
pub struct InMemoryWorkItems {
    state: Mutex<State>,
}

impl InMemoryWorkItems {
    pub fn new() -> Self {
        Self::default()
    }

    // === Failure Injection ===

    /// Makes every create and update fail with the given message.
    pub fn fail_writes_with(&self, message: &str) {
        self.lock().fail_writes = Some(ServiceErrors::single(message));
    }

    /// Makes every note append fail with the given message.
    pub fn fail_notes_with(&self, message: &str) {
        self.lock().fail_notes = Some(ServiceErrors::single(message));
    }

    // === Test Helpers ===

    pub fn work_items(&self) -> Vec<RecordedWorkItem> {
        self.lock().work_items.values().cloned().collect()
    }

    pub fn notes(&self) -> Vec<RecordedNote> {
        self.lock().notes.clone()
    }

    pub fn create_calls(&self) -> usize {
        self.lock().create_calls
    }

    pub fn update_calls(&self) -> usize {
        self.lock().update_calls
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state
            .lock()
            .expect("InMemoryWorkItems: lock poisoned")
    }
}

#[async_trait]
impl WorkItemService for InMemoryWorkItems {
    async fn create(
        &self,
        params: &WorkItemParams,
        author: &UserId,
    ) -> Result<WorkItemId, ServiceErrors> {
        let mut state = self.lock();
        state.create_calls += 1;
        if let Some(errors) = &state.fail_writes {
            return Err(errors.clone());
        }
        if params.attributes.subject.trim().is_empty() {
            return Err(ServiceErrors::single("Subject can't be blank"));
        }

        state.next_work_item += 1;
        let id = WorkItemId::new(state.next_work_item);
        state.work_items.insert(
            id,
            RecordedWorkItem {
                id,
                params: params.clone(),
                author: author.clone(),
                revisions: 1,
            },
        );
        Ok(id)
    }

    async fn update(
        &self,
        work_item: WorkItemId,
        params: &WorkItemParams,
        author: &UserId,
    ) -> Result<WorkItemId, ServiceErrors> {
        let mut state = self.lock();
        state.update_calls += 1;
        if let Some(errors) = &state.fail_writes {
            return Err(errors.clone());
        }

        let recorded = state
            .work_items
            .get_mut(&work_item)
            .ok_or_else(|| ServiceErrors::single(format!("Work item {} not found", work_item)))?;
        recorded.params = params.clone();
        recorded.author = author.clone();
        recorded.revisions += 1;
        Ok(work_item)
    }
}

#[async_trait]
impl NoteAppender for InMemoryWorkItems {
    async fn append(
        &self,
        work_item: WorkItemId,
        author: &UserId,
        text: &str,
    ) -> Result<JournalId, ServiceErrors> {
        let mut state = self.lock();
        if let Some(errors) = &state.fail_notes {
            return Err(errors.clone());
        }
        if !state.work_items.contains_key(&work_item) {
            return Err(ServiceErrors::single(format!("Work item {} not found", work_item)));
        }

        let id = JournalId::new(state.notes.len() as u64 + 1);
        state.notes.push(RecordedNote {
            id,
            work_item,
            author: author.clone(),
            text: text.to_string(),
        });
        Ok(id)
    }
}
