use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orgguard_core::{DomainError, DomainResult, Entity, OrganizationId, OrganizationScoped, TaskId, UserId};

pub const MAX_PRIORITY: u8 = 10;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskCategory {
    Work,
    Personal,
    Urgent,
    Other,
}

/// Task record, owned by one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub category: TaskCategory,
    pub priority: u8,
    pub due_date: Option<DateTime<Utc>>,
    pub created_by: UserId,
    pub organization_id: OrganizationId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Task {
    type Id = TaskId;

    fn id(&self) -> TaskId {
        self.id
    }
}

impl OrganizationScoped for Task {
    fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }
}

impl Task {
    pub fn apply(&mut self, changes: TaskChanges, now: DateTime<Utc>) -> DomainResult<()> {
        changes.validate()?;

        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = Some(due_date);
        }
        self.updated_at = now;
        Ok(())
    }
}

/// Input for creating a task.
///
/// `organization_id` defaults to the actor's own organization when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<TaskStatus>,
    pub category: TaskCategory,
    pub priority: Option<u8>,
    pub due_date: Option<DateTime<Utc>>,
    pub organization_id: Option<OrganizationId>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, category: TaskCategory) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: None,
            category,
            priority: None,
            due_date: None,
            organization_id: None,
        }
    }

    pub fn in_organization(mut self, organization_id: OrganizationId) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_title(&self.title)?;
        validate_priority(self.priority)
    }

    pub fn into_record(
        self,
        id: TaskId,
        created_by: UserId,
        organization_id: OrganizationId,
        now: DateTime<Utc>,
    ) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            status: self.status.unwrap_or_default(),
            category: self.category,
            priority: self.priority.unwrap_or(0),
            due_date: self.due_date,
            created_by,
            organization_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial task update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub category: Option<TaskCategory>,
    pub priority: Option<u8>,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskChanges {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        validate_priority(self.priority)
    }
}

fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("task title cannot be empty"));
    }
    Ok(())
}

fn validate_priority(priority: Option<u8>) -> DomainResult<()> {
    match priority {
        Some(p) if p > MAX_PRIORITY => Err(DomainError::validation(format!(
            "priority must be between 0 and {MAX_PRIORITY}"
        ))),
        _ => Ok(()),
    }
}
