use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use orgguard_audit::AuditAction;
use orgguard_core::TaskId;
use orgguard_directory::{NewTask, OrganizationRepository, Task, TaskChanges, TaskRepository};

use crate::{AccessError, AuditEvent, AuthorizationPipeline, Completed, Operation, Outcome, RequestContext};

const TASK: &str = "Task";
const ORGANIZATION: &str = "Organization";

#[derive(Clone)]
pub struct TaskService {
    pipeline: Arc<AuthorizationPipeline>,
    tasks: Arc<dyn TaskRepository>,
    organizations: Arc<dyn OrganizationRepository>,
}

impl TaskService {
    pub fn new(
        pipeline: Arc<AuthorizationPipeline>,
        tasks: Arc<dyn TaskRepository>,
        organizations: Arc<dyn OrganizationRepository>,
    ) -> Self {
        Self {
            pipeline,
            tasks,
            organizations,
        }
    }

    /// Create a task in the actor's organization, or in `input.organization_id`
    /// when the actor may access it.
    pub fn create(&self, ctx: &RequestContext, input: NewTask) -> Result<Completed<Task>, AccessError> {
        self.pipeline.run(ctx, Operation::CreateTask, |actor| {
            let target = input.organization_id.unwrap_or(actor.organization_id);
            let organization = self.organizations.find_by_id(target)?;
            self.pipeline.guard(actor, ORGANIZATION, target, organization)?;
            input.validate()?;

            let task = self.tasks.insert(input, actor.subject_id, target)?;
            info!(task_id = %task.id, organization_id = %target, "task created");

            let event = AuditEvent::new(AuditAction::Create, TASK)
                .resource(task.id)
                .details(format!("Created task: {}", task.title));
            Ok(Outcome::audited(task, event))
        })
    }

    /// Tasks across every organization the actor can access, newest first.
    pub fn list(&self, ctx: &RequestContext) -> Result<Completed<Vec<Task>>, AccessError> {
        self.pipeline.run(ctx, Operation::ListTasks, |actor| {
            let scope = self
                .pipeline
                .resolver()
                .accessible_organization_ids(actor.organization_id, actor.role)?;
            let tasks = self.tasks.find_by_organization_ids(&scope)?;

            let event = AuditEvent::new(AuditAction::Read, TASK)
                .details(format!("Fetched {} tasks", tasks.len()));
            Ok(Outcome::audited(tasks, event))
        })
    }

    pub fn get(&self, ctx: &RequestContext, id: TaskId) -> Result<Completed<Task>, AccessError> {
        self.pipeline.run(ctx, Operation::GetTask, |actor| {
            let task = self.pipeline.guard(actor, TASK, id, self.tasks.find_by_id(id)?)?;

            let event = AuditEvent::new(AuditAction::Read, TASK)
                .resource(task.id)
                .details(format!("Viewed task: {}", task.title));
            Ok(Outcome::audited(task, event))
        })
    }

    pub fn update(
        &self,
        ctx: &RequestContext,
        id: TaskId,
        changes: TaskChanges,
    ) -> Result<Completed<Task>, AccessError> {
        self.pipeline.run(ctx, Operation::UpdateTask, |actor| {
            let mut task = self.pipeline.guard(actor, TASK, id, self.tasks.find_by_id(id)?)?;
            task.apply(changes, Utc::now())?;
            let task = self.tasks.save(task)?;

            let event = AuditEvent::new(AuditAction::Update, TASK)
                .resource(task.id)
                .details(format!("Updated task: {}", task.title));
            Ok(Outcome::audited(task, event))
        })
    }

    pub fn delete(&self, ctx: &RequestContext, id: TaskId) -> Result<Completed<()>, AccessError> {
        self.pipeline.run(ctx, Operation::DeleteTask, |actor| {
            let task = self.pipeline.guard(actor, TASK, id, self.tasks.find_by_id(id)?)?;
            if !self.tasks.delete(id)? {
                // Removed by a concurrent request between lookup and delete.
                return Err(AccessError::not_found(TASK, id));
            }
            info!(task_id = %id, "task deleted");

            let event = AuditEvent::new(AuditAction::Delete, TASK)
                .resource(id)
                .details(format!("Deleted task: {}", task.title));
            Ok(Outcome::audited((), event))
        })
    }
}
