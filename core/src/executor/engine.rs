//! Batch helper: run a known set of tasks through a fresh executor.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use super::pool::Executor;
use super::registry::ExecutionRegistry;
use super::types::ExecutorConfig;
use crate::error::ExecutorError;
use crate::task::{Task, TaskResult};

/// Outcome of a batch run.
#[derive(Debug)]
pub struct RunSummary {
    /// Number of tasks submitted
    pub total: usize,

    /// Tasks whose result carries no error
    pub succeeded: usize,

    /// Tasks whose result carries an error (lookup, panic or execution)
    pub failed: usize,

    /// Wall-clock duration of the batch in milliseconds
    pub duration_ms: u64,

    /// Results in completion order
    pub results: Vec<TaskResult>,
}

impl RunSummary {
    pub fn failures(&self) -> impl Iterator<Item = &TaskResult> {
        self.results.iter().filter(|r| !r.is_ok())
    }
}

/// Start an executor, submit every task, drain one result per task, shut down.
///
/// Submission runs on its own tokio task while results are drained here, so
/// batches larger than the queue capacity cannot stall on backpressure.
pub async fn execute_tasks(
    registry: Arc<ExecutionRegistry>,
    config: ExecutorConfig,
    tasks: Vec<Arc<Task>>,
) -> Result<RunSummary, ExecutorError> {
    let start = Instant::now();
    let total = tasks.len();

    let mut executor = Executor::new(registry, config)?;
    let mut stream = executor.start()?;
    let sender = executor.task_sender()?;

    let producer = tokio::spawn(async move {
        for task in tasks {
            sender.send(task).await?;
        }
        Ok::<(), ExecutorError>(())
    });

    let mut results = Vec::with_capacity(total);
    while results.len() < total {
        let Some(result) = stream.recv().await else {
            break;
        };
        if let Some(err) = result.error() {
            error!(
                function = result.task().execution_fn_name(),
                error = %err,
                "task failed"
            );
        }
        results.push(result);
    }

    let submitted = producer
        .await
        .map_err(|e| ExecutorError::WorkerJoin(e.to_string()));
    executor.shutdown().await?;
    submitted??;

    let failed = results.iter().filter(|r| !r.is_ok()).count();
    let summary = RunSummary {
        total,
        succeeded: results.len() - failed,
        failed,
        duration_ms: start.elapsed().as_millis() as u64,
        results,
    };
    info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        duration_ms = summary.duration_ms,
        "batch finished"
    );
    Ok(summary)
}
