use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::result::TaskResult;
use crate::alert::{Alerter, NoopAlerter};

/// Private configuration of an execution function, keyed by option name.
pub type TaskOptions = serde_json::Map<String, Value>;

/// Reserved post-completion hook. The executor does not invoke it.
pub type TaskCallback = Arc<dyn Fn(&TaskResult) + Send + Sync>;

pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(10);

/// A unit of work dispatched to exactly one worker.
///
/// Tasks are built by the workload loader (or tests) and shared read-only
/// with the executor as `Arc<Task>`.
#[derive(Clone)]
pub struct Task {
    execution_fn_name: String,
    options: TaskOptions,
    /// Bounds the execution function's own work; the executor does not enforce it.
    timeout: Duration,
    alerter: Arc<dyn Alerter>,
    callback: Option<TaskCallback>,
}

impl Task {
    pub fn new(
        execution_fn_name: impl Into<String>,
        options: TaskOptions,
        alerter: Arc<dyn Alerter>,
    ) -> Self {
        Self {
            execution_fn_name: execution_fn_name.into(),
            options,
            timeout: DEFAULT_TASK_TIMEOUT,
            alerter,
            callback: None,
        }
    }

    /// Task with empty options and a no-op alerter.
    pub fn named(execution_fn_name: impl Into<String>) -> Self {
        Self::new(
            execution_fn_name,
            TaskOptions::new(),
            Arc::new(NoopAlerter),
        )
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_alerter(mut self, alerter: Arc<dyn Alerter>) -> Self {
        self.alerter = alerter;
        self
    }

    pub fn execution_fn_name(&self) -> &str {
        &self.execution_fn_name
    }

    pub fn options(&self) -> &TaskOptions {
        &self.options
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(Value::as_str)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn alerter(&self) -> &Arc<dyn Alerter> {
        &self.alerter
    }

    pub fn callback(&self) -> Option<&TaskCallback> {
        self.callback.as_ref()
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("execution_fn_name", &self.execution_fn_name)
            .field("options", &self.options)
            .field("timeout", &self.timeout)
            .field("alerter", &self.alerter)
            .field("callback", &self.callback.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
