use std::sync::Arc;

use super::types::Task;
use crate::error::TaskError;

/// Outcome of executing one task exactly once.
#[derive(Debug)]
pub struct TaskResult {
    task: Arc<Task>,
    error: Option<TaskError>,
}

impl TaskResult {
    /// A result bound to `task` with no error recorded yet.
    pub fn new(task: Arc<Task>) -> Self {
        Self { task, error: None }
    }

    pub fn set_error(&mut self, error: TaskError) {
        self.error = Some(error);
    }

    pub fn task(&self) -> &Arc<Task> {
        &self.task
    }

    /// `None` when the task completed successfully.
    pub fn error(&self) -> Option<&TaskError> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_parts(self) -> (Arc<Task>, Option<TaskError>) {
        (self.task, self.error)
    }
}
