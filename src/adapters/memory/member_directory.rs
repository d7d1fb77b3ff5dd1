//! In-memory member directory.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::bcf::Member;
use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, UserId};
use crate::ports::MemberDirectory;

#[derive(Debug, Clone)]
struct Membership {
    project_id: ProjectId,
    member: Member,
    can_add_notes: bool,
}

/// Fixed set of project memberships.
///
/// Email lookup is case-insensitive, matching how mail addresses are
/// usually compared by account systems.
#[derive(Debug, Default)]
pub struct InMemoryMemberDirectory {
    memberships: Vec<Membership>,
    fail_lookups: Mutex<Option<DomainError>>,
    fail_permission_checks: Mutex<Option<DomainError>>,
}

impl InMemoryMemberDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member to a project.
    pub fn with_member(
        mut self,
        project_id: ProjectId,
        user_id: UserId,
        email: &str,
        can_add_notes: bool,
    ) -> Self {
        self.memberships.push(Membership {
            project_id,
            member: Member {
                user_id,
                email: email.to_string(),
            },
            can_add_notes,
        });
        self
    }

    // === Failure Injection ===

    /// Makes every email lookup fail with a database error.
    pub fn fail_lookups_with(&self, message: &str) {
        set_failure(&self.fail_lookups, message);
    }

    /// Makes every permission check fail with a database error.
    pub fn fail_permission_checks_with(&self, message: &str) {
        set_failure(&self.fail_permission_checks, message);
    }
}

fn set_failure(slot: &Mutex<Option<DomainError>>, message: &str) {
    *slot
        .lock()
        .expect("InMemoryMemberDirectory: lock poisoned") =
        Some(DomainError::new(ErrorCode::DatabaseError, message));
}

fn injected_failure(slot: &Mutex<Option<DomainError>>) -> Result<(), DomainError> {
    let failure = slot
        .lock()
        .map_err(|_| DomainError::new(ErrorCode::DatabaseError, "Member lock poisoned"))?;
    match failure.as_ref() {
        Some(err) => Err(err.clone()),
        None => Ok(()),
    }
}

#[async_trait]
impl MemberDirectory for InMemoryMemberDirectory {
    async fn find_by_email(
        &self,
        project_id: ProjectId,
        email: &str,
    ) -> Result<Option<Member>, DomainError> {
        injected_failure(&self.fail_lookups)?;
        Ok(self
            .memberships
            .iter()
            .find(|m| m.project_id == project_id && m.member.email.eq_ignore_ascii_case(email))
            .map(|m| m.member.clone()))
    }

    async fn can_add_notes(
        &self,
        member: &Member,
        project_id: ProjectId,
    ) -> Result<bool, DomainError> {
        injected_failure(&self.fail_permission_checks)?;
        Ok(self
            .memberships
            .iter()
            .any(|m| m.project_id == project_id && m.member == *member && m.can_add_notes))
    }
}
