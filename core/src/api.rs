//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `sentinel_core::api` instead of reaching into internal modules.

pub use crate::alert::{Alerter, AlerterFactory, NoopAlerter};
pub use crate::config::{
    apply_env_overrides, load_default, load_from_path, AppConfig, LoggingConfig,
};
pub use crate::error::{
    CliError, ExecutorError, RegistryError, TaskError, TaskErrorKind, WorkloadError,
};
pub use crate::executor::{
    blocking_execution_fn, execute_tasks, execution_fn, ExecutionFn, ExecutionRegistry, Executor,
    ExecutorConfig, ExecutorState, ResultStream, RunSummary, TaskSender,
};
pub use crate::task::{Task, TaskCallback, TaskOptions, TaskResult, DEFAULT_TASK_TIMEOUT};
pub use crate::workload::{Workload, DEFAULT_EXECUTION_FN};
