//! Task flows: create, subtask editing, completion, location, deletion.

use std::fmt;

use crate::model::location::TaskLocation;
use crate::model::subtask::Subtask;
use crate::model::task::{Task, TaskValidationError};
use crate::repo::{RepoError, RepoResult, TaskId, TaskListQuery, TaskRecord, TaskRepository};

/// Default page size when the caller does not pick one (or picks 0).
const TASKS_DEFAULT_LIMIT: u32 = 10;
/// Hard cap; larger requests are clamped, not rejected.
const TASKS_LIMIT_MAX: u32 = 50;

/// Applies the tasks list contract to a raw limit.
pub fn normalize_task_limit(limit: Option<u32>) -> u32 {
    match limit {
        None | Some(0) => TASKS_DEFAULT_LIMIT,
        Some(value) if value > TASKS_LIMIT_MAX => TASKS_LIMIT_MAX,
        Some(value) => value,
    }
}

/// Error type for task service operations.
#[derive(Debug)]
pub enum TaskServiceError {
    /// No live task matched the given id.
    TaskNotFound(TaskId),
    /// A model rule was violated (blank title, bad subtask index).
    Model(TaskValidationError),
    /// Storage failed underneath the flow.
    Repo(RepoError),
    /// A write succeeded but the read-back did not find the row.
    InconsistentState(&'static str),
}

impl fmt::Display for TaskServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskServiceError::TaskNotFound(task_id) => write!(f, "task not found: {task_id}"),
            TaskServiceError::Model(err) => write!(f, "{err}"),
            TaskServiceError::Repo(err) => write!(f, "{err}"),
            TaskServiceError::InconsistentState(context) => {
                write!(f, "inconsistent state: {context}")
            }
        }
    }
}

impl std::error::Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TaskServiceError::Model(err) => Some(err),
            TaskServiceError::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(task_id) => TaskServiceError::TaskNotFound(task_id),
            RepoError::Validation(err) => TaskServiceError::Model(err),
            other => TaskServiceError::Repo(other),
        }
    }
}

impl From<TaskValidationError> for TaskServiceError {
    fn from(err: TaskValidationError) -> Self {
        TaskServiceError::Model(err)
    }
}

/// Input for [`TaskService::create_task`]. New tasks always start open.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateTaskRequest {
    pub title: String,
    pub note: Option<String>,
    pub due_epoch_ms: Option<i64>,
    /// Raw difficulty as the caller supplied it; negatives mean unset.
    pub difficulty: Option<f64>,
    pub location: Option<TaskLocation>,
}

/// One page of tasks plus the limit that actually applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TasksListResult {
    pub items: Vec<TaskRecord>,
    pub applied_limit: u32,
}

/// Task use cases over any [`TaskRepository`].
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a task and returns the stored record.
    pub fn create_task(&mut self, request: &CreateTaskRequest) -> Result<TaskRecord, TaskServiceError> {
        let task = Task::new(
            request.title.clone(),
            request.note.clone(),
            request.due_epoch_ms,
            request.difficulty,
            false,
            request.location,
        )?;
        let task_id = self.repo.create_task(&task)?;
        let record = self.read_back(task_id, "created task missing on read-back")?;
        log::info!(
            "event=create_task module=service status=ok task_id={task_id}"
        );
        Ok(record)
    }

    /// Fetches one live task; `Ok(None)` when the id is unknown or deleted.
    pub fn get_task(&self, task_id: TaskId) -> RepoResult<Option<TaskRecord>> {
        self.repo.get_task(task_id, false)
    }

    /// Lists live tasks, newest write first, under the list contract.
    pub fn list_tasks(
        &self,
        completed: Option<bool>,
        limit: Option<u32>,
        offset: u32,
    ) -> Result<TasksListResult, TaskServiceError> {
        let applied_limit = normalize_task_limit(limit);
        let query = TaskListQuery {
            completed,
            include_deleted: false,
            limit: Some(applied_limit),
            offset,
        };
        let items = self.repo.list_tasks(&query)?;
        Ok(TasksListResult {
            items,
            applied_limit,
        })
    }

    /// Replaces a task's scalars, location and whole subtask set.
    pub fn update_task(&mut self, task_id: TaskId, task: &Task) -> Result<TaskRecord, TaskServiceError> {
        self.repo.update_task(task_id, task)?;
        self.read_back(task_id, "updated task missing on read-back")
    }

    /// Appends a subtask, or inserts at `index` when one is given.
    pub fn add_subtask(
        &mut self,
        task_id: TaskId,
        title: impl Into<String>,
        index: Option<usize>,
    ) -> Result<TaskRecord, TaskServiceError> {
        let mut record = self.require_task(task_id)?;
        let subtask = Subtask::new(title);
        match index {
            Some(position) => record.task.insert_subtask(position, subtask)?,
            None => record.task.add_subtask(subtask),
        }
        self.repo.update_task(task_id, &record.task)?;
        self.read_back(task_id, "task missing after subtask insert")
    }

    /// Removes the subtask at `index` and returns it with the updated record.
    pub fn remove_subtask(
        &mut self,
        task_id: TaskId,
        index: usize,
    ) -> Result<(Subtask, TaskRecord), TaskServiceError> {
        let mut record = self.require_task(task_id)?;
        let removed = record.task.remove_subtask(index)?;
        self.repo.update_task(task_id, &record.task)?;
        let record = self.read_back(task_id, "task missing after subtask removal")?;
        Ok((removed, record))
    }

    /// Flips one subtask's completion flag.
    pub fn set_subtask_completed(
        &mut self,
        task_id: TaskId,
        index: usize,
        completed: bool,
    ) -> Result<TaskRecord, TaskServiceError> {
        let mut record = self.require_task(task_id)?;
        record.task.subtask_mut(index)?.set_completed(completed);
        self.repo.update_task(task_id, &record.task)?;
        self.read_back(task_id, "task missing after subtask completion change")
    }

    /// Sets the task-level completion flag.
    pub fn set_task_completed(
        &mut self,
        task_id: TaskId,
        completed: bool,
    ) -> Result<TaskRecord, TaskServiceError> {
        let record = self.require_task(task_id)?;
        let replacement = replace_completed(&record.task, completed)?;
        self.repo.update_task(task_id, &replacement)?;
        let record = self.read_back(task_id, "task missing after completion change")?;
        log::info!(
            "event=set_task_completed module=service status=ok task_id={task_id} completed={completed}"
        );
        Ok(record)
    }

    /// Attaches, replaces or clears (`None`) the task's location.
    pub fn set_task_location(
        &mut self,
        task_id: TaskId,
        location: Option<TaskLocation>,
    ) -> Result<TaskRecord, TaskServiceError> {
        let mut record = self.require_task(task_id)?;
        record.task.set_location(location);
        self.repo.update_task(task_id, &record.task)?;
        self.read_back(task_id, "task missing after location change")
    }

    /// Soft-deletes a task. Deleting an already-deleted task succeeds.
    pub fn delete_task(&mut self, task_id: TaskId) -> Result<(), TaskServiceError> {
        self.repo.soft_delete_task(task_id)?;
        log::info!("event=delete_task module=service status=ok task_id={task_id}");
        Ok(())
    }

    fn require_task(&self, task_id: TaskId) -> Result<TaskRecord, TaskServiceError> {
        self.repo
            .get_task(task_id, false)?
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }

    fn read_back(
        &self,
        task_id: TaskId,
        context: &'static str,
    ) -> Result<TaskRecord, TaskServiceError> {
        self.repo
            .get_task(task_id, false)?
            .ok_or(TaskServiceError::InconsistentState(context))
    }
}

/// Builds the replacement value for a completion change.
///
/// Task scalars are fixed at construction, so flipping `completed` means
/// constructing a new task with the flag swapped and everything else carried
/// over, subtasks included.
fn replace_completed(task: &Task, completed: bool) -> Result<Task, TaskValidationError> {
    let mut replacement = Task::new(
        task.title(),
        task.note().map(str::to_owned),
        task.due(),
        task.difficulty(),
        completed,
        task.location(),
    )?;
    for subtask in task.subtasks() {
        replacement.add_subtask(subtask.clone());
    }
    Ok(replacement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_to_ten() {
        assert_eq!(normalize_task_limit(None), 10);
        assert_eq!(normalize_task_limit(Some(0)), 10);
    }

    #[test]
    fn limit_clamps_to_fifty() {
        assert_eq!(normalize_task_limit(Some(51)), 50);
        assert_eq!(normalize_task_limit(Some(u32::MAX)), 50);
    }

    #[test]
    fn limit_passes_in_range_values() {
        assert_eq!(normalize_task_limit(Some(1)), 1);
        assert_eq!(normalize_task_limit(Some(50)), 50);
    }

    #[test]
    fn replace_completed_carries_everything_else() {
        let mut task = Task::new(
            "Pack bags",
            Some("passport first".to_string()),
            Some(1_700_000_000_000),
            Some(3.5),
            false,
            Some(TaskLocation::new(48.2, 16.4)),
        )
        .unwrap();
        task.add_subtask(Subtask::new("clothes"));
        task.add_subtask(Subtask::with_completed("documents", true));

        let done = replace_completed(&task, true).unwrap();

        assert!(done.is_completed());
        assert_eq!(done.title(), task.title());
        assert_eq!(done.note(), task.note());
        assert_eq!(done.due(), task.due());
        assert_eq!(done.difficulty(), task.difficulty());
        assert_eq!(done.location(), task.location());
        assert_eq!(done.subtasks(), task.subtasks());
    }
}
