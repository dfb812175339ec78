#![allow(dead_code)]

use std::sync::Arc;

use sentinel_core::api::{ExecutionRegistry, NoopAlerter, Task, TaskOptions, TaskResult};

/// Task for `function` tagged with a numeric `id` option.
pub fn tagged_task(function: &str, id: u64) -> Arc<Task> {
    let mut options = TaskOptions::new();
    options.insert("id".into(), id.into());
    Arc::new(Task::new(function, options, Arc::new(NoopAlerter)))
}

pub fn task_id(result: &TaskResult) -> u64 {
    result
        .task()
        .option("id")
        .and_then(|v| v.as_u64())
        .expect("tagged task")
}

pub fn shared(registry: ExecutionRegistry) -> Arc<ExecutionRegistry> {
    Arc::new(registry)
}

/// Route executor logs through the test harness' captured output.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("sentinel_core=debug")
        .with_test_writer()
        .try_init();
}
