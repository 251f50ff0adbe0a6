use std::cmp::Reverse;
use std::collections::BTreeSet;

use chrono::Utc;

use orgguard_core::{OrganizationId, TaskId, UserId};
use orgguard_directory::{NewTask, RepositoryResult, Task, TaskRepository};

use super::table::Table;

#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    table: Table<Task>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        self.table.get(id)
    }

    fn find_by_organization_ids(
        &self,
        organization_ids: &BTreeSet<OrganizationId>,
    ) -> RepositoryResult<Vec<Task>> {
        let mut tasks = self
            .table
            .filter(|t| organization_ids.contains(&t.organization_id))?;
        // Ids break ties between tasks created within the same instant.
        tasks.sort_by_key(|t| Reverse((t.created_at, t.id)));
        Ok(tasks)
    }

    fn insert(
        &self,
        input: NewTask,
        created_by: UserId,
        organization_id: OrganizationId,
    ) -> RepositoryResult<Task> {
        let mut rows = self.table.write()?;
        let task = input.into_record(self.table.next_id(), created_by, organization_id, Utc::now());
        rows.insert(task.id, task.clone());
        Ok(task)
    }

    fn save(&self, task: Task) -> RepositoryResult<Task> {
        self.table.replace(task)
    }

    fn delete(&self, id: TaskId) -> RepositoryResult<bool> {
        Ok(self.table.write()?.remove(&id).is_some())
    }

    fn count_by_organization(&self, organization_id: OrganizationId) -> RepositoryResult<usize> {
        Ok(self
            .table
            .read()?
            .values()
            .filter(|t| t.organization_id == organization_id)
            .count())
    }
}
