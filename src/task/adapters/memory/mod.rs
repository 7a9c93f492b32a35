//! In-memory workflow repository for tests.
//!
//! One store implements both the task and the status ports so a
//! transition can look the target status up inside the same guarded
//! critical section — the in-memory stand-in for the row lock the
//! `PostgreSQL` adapter takes. All validation runs before the first
//! write, so a rejected operation leaves tasks, history, and the audit
//! log untouched.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::audit::adapters::memory::InMemoryAuditLog;
use crate::audit::domain::AuditEntry;
use crate::pagination::Page;
use crate::task::domain::{
    Status, StatusChange, StatusChangeRequest, StatusId, Task, TaskDomainError, TaskId,
    TerminalStatus,
};
use crate::task::ports::{
    StatusRepository, StatusRepositoryError, StatusRepositoryResult, TaskFilter, TaskRepository,
    TaskRepositoryError, TaskRepositoryResult,
};

/// Thread-safe in-memory workflow store.
///
/// Implements [`TaskRepository`] and [`StatusRepository`] over one shared
/// state. Concurrent status transitions on the same task serialize behind
/// the state lock, which preserves the transition ordering guarantee the
/// production adapter gets from `SELECT … FOR UPDATE`.
#[derive(Clone)]
pub struct InMemoryWorkflowRepository {
    state: Arc<RwLock<WorkflowState>>,
    audit_log: InMemoryAuditLog,
    terminal: TerminalStatus,
    clock: Arc<dyn Clock + Send + Sync>,
}

#[derive(Default)]
struct WorkflowState {
    tasks: HashMap<TaskId, Task>,
    statuses: HashMap<StatusId, Status>,
    history: Vec<StatusChange>,
}

fn task_poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn status_poisoned(err: impl std::fmt::Display) -> StatusRepositoryError {
    StatusRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryWorkflowRepository {
    /// Creates an empty store with the given terminal-status
    /// configuration, appending audit entries to the given log.
    #[must_use]
    pub fn new(terminal: TerminalStatus, audit_log: InMemoryAuditLog) -> Self {
        Self {
            state: Arc::new(RwLock::new(WorkflowState::default())),
            audit_log,
            terminal,
            clock: Arc::new(DefaultClock),
        }
    }

    /// Replaces the clock, for deterministic timestamps in tests.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns a handle to the audit log this store appends into.
    #[must_use]
    pub fn audit_log(&self) -> InMemoryAuditLog {
        self.audit_log.clone()
    }
}

#[async_trait]
impl TaskRepository for InMemoryWorkflowRepository {
    async fn store(&self, task: &Task, audit: &AuditEntry) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(task_poisoned)?;
        state.tasks.insert(task.id(), task.clone());
        self.audit_log
            .record(audit.clone())
            .map_err(TaskRepositoryError::persistence)
    }

    async fn update(&self, task: &Task, audit: &AuditEntry) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(task_poisoned)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        self.audit_log
            .record(audit.clone())
            .map_err(TaskRepositoryError::persistence)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(task_poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, filter: &TaskFilter, page: Page) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(task_poisoned)?;
        let mut matching: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| filter.status_id.is_none_or(|id| task.status_id() == id))
            .filter(|task| filter.client_id.is_none_or(|id| task.client_id() == id))
            .filter(|task| {
                filter
                    .assigned_to
                    .is_none_or(|id| task.assigned_to() == Some(id))
            })
            .filter(|task| filter.priority.is_none_or(|p| task.priority() == p))
            .cloned()
            .collect();
        matching.sort_by_key(|task| std::cmp::Reverse(task.created_at()));

        Ok(matching
            .into_iter()
            .skip(page.offset_usize())
            .take(page.limit_usize())
            .collect())
    }

    async fn delete(&self, id: TaskId, audit: &AuditEntry) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(task_poisoned)?;
        if state.tasks.remove(&id).is_none() {
            return Err(TaskRepositoryError::NotFound(id));
        }
        state.history.retain(|change| change.task_id != id);
        self.audit_log
            .record(audit.clone())
            .map_err(TaskRepositoryError::persistence)
    }

    async fn change_status(
        &self,
        request: StatusChangeRequest,
    ) -> TaskRepositoryResult<StatusChange> {
        let mut state = self.state.write().map_err(task_poisoned)?;

        let mut task = state
            .tasks
            .get(&request.task_id)
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(request.task_id))?;
        let to_status = state
            .statuses
            .get(&request.to_status_id)
            .cloned()
            .ok_or(TaskRepositoryError::StatusNotFound(request.to_status_id))?;

        let change = task
            .change_status(
                &to_status,
                request.changed_by,
                request.note,
                &self.terminal,
                &*self.clock,
            )
            .map_err(|err| match err {
                TaskDomainError::StatusUnchanged { task_id, status_id } => {
                    TaskRepositoryError::StatusUnchanged { task_id, status_id }
                }
                other => TaskRepositoryError::persistence(other),
            })?;

        state.tasks.insert(task.id(), task);
        state.history.push(change.clone());
        self.audit_log
            .record(change.audit_entry())
            .map_err(TaskRepositoryError::persistence)?;
        Ok(change)
    }

    async fn history_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<StatusChange>> {
        let state = self.state.read().map_err(task_poisoned)?;
        let mut changes: Vec<StatusChange> = state
            .history
            .iter()
            .filter(|change| change.task_id == task_id)
            .cloned()
            .collect();
        changes.sort_by_key(|change| change.changed_at);
        Ok(changes)
    }
}

#[async_trait]
impl StatusRepository for InMemoryWorkflowRepository {
    async fn store(&self, status: &Status, audit: &AuditEntry) -> StatusRepositoryResult<()> {
        let mut state = self.state.write().map_err(status_poisoned)?;
        let duplicate = state
            .statuses
            .values()
            .any(|existing| existing.name() == status.name());
        if duplicate {
            return Err(StatusRepositoryError::DuplicateName(
                status.name().to_owned(),
            ));
        }
        state.statuses.insert(status.id(), status.clone());
        self.audit_log
            .record(audit.clone())
            .map_err(StatusRepositoryError::persistence)
    }

    async fn list(&self) -> StatusRepositoryResult<Vec<Status>> {
        let state = self.state.read().map_err(status_poisoned)?;
        let mut statuses: Vec<Status> = state.statuses.values().cloned().collect();
        statuses.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(statuses)
    }

    async fn find_by_id(&self, id: StatusId) -> StatusRepositoryResult<Option<Status>> {
        let state = self.state.read().map_err(status_poisoned)?;
        Ok(state.statuses.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StatusRepositoryResult<Option<Status>> {
        let state = self.state.read().map_err(status_poisoned)?;
        Ok(state
            .statuses
            .values()
            .find(|status| status.name() == name)
            .cloned())
    }

    async fn update(&self, status: &Status, audit: &AuditEntry) -> StatusRepositoryResult<()> {
        let mut state = self.state.write().map_err(status_poisoned)?;
        if !state.statuses.contains_key(&status.id()) {
            return Err(StatusRepositoryError::NotFound(status.id()));
        }
        let duplicate = state
            .statuses
            .values()
            .any(|existing| existing.id() != status.id() && existing.name() == status.name());
        if duplicate {
            return Err(StatusRepositoryError::DuplicateName(
                status.name().to_owned(),
            ));
        }
        state.statuses.insert(status.id(), status.clone());
        self.audit_log
            .record(audit.clone())
            .map_err(StatusRepositoryError::persistence)
    }

    async fn delete(&self, id: StatusId, audit: &AuditEntry) -> StatusRepositoryResult<()> {
        let mut state = self.state.write().map_err(status_poisoned)?;
        if !state.statuses.contains_key(&id) {
            return Err(StatusRepositoryError::NotFound(id));
        }
        let referenced = state.tasks.values().any(|task| task.status_id() == id);
        if referenced {
            return Err(StatusRepositoryError::InUse(id));
        }
        state.statuses.remove(&id);
        self.audit_log
            .record(audit.clone())
            .map_err(StatusRepositoryError::persistence)
    }
}
