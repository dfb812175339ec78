use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{mpsc, watch, Mutex};
use tracing::{debug, error, warn};

use super::panic::panic_message;
use super::registry::ExecutionRegistry;
use crate::error::TaskError;
use crate::task::{Task, TaskResult};

pub(crate) type SharedTaskQueue = Arc<Mutex<mpsc::Receiver<Arc<Task>>>>;

/// One pool member: pulls tasks until the stop signal wins the race.
pub(crate) struct Worker {
    pub id: usize,
    pub registry: Arc<ExecutionRegistry>,
    pub tasks: SharedTaskQueue,
    pub results: mpsc::Sender<TaskResult>,
    pub shutdown: watch::Receiver<bool>,
}

impl Worker {
    pub async fn run(mut self) {
        debug!(worker = self.id, "worker started");

        loop {
            let task = tokio::select! {
                biased;
                _ = stop_requested(&mut self.shutdown) => break,
                task = next_task(&self.tasks) => match task {
                    Some(task) => task,
                    None => break,
                },
            };

            let result = execute_task(&self.registry, task).await;

            // Waits for room in the result queue; stop is only honoured between tasks.
            if self.results.send(result).await.is_err() {
                debug!(worker = self.id, "result stream dropped, discarding result");
            }
        }

        debug!(worker = self.id, "worker stopped");
    }
}

async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    // A dropped sender counts as a stop request too.
    let _ = shutdown.wait_for(|stop| *stop).await;
}

async fn next_task(tasks: &Mutex<mpsc::Receiver<Arc<Task>>>) -> Option<Arc<Task>> {
    tasks.lock().await.recv().await
}

/// Resolve and run one task, converting every failure mode into the result.
pub(crate) async fn execute_task(registry: &ExecutionRegistry, task: Arc<Task>) -> TaskResult {
    let mut result = TaskResult::new(task.clone());
    let name = task.execution_fn_name().to_string();

    let Some(function) = registry.lookup(&name) else {
        let err = TaskError::Lookup(name);
        error!("{err}");
        result.set_error(err);
        return result;
    };

    // The call itself happens inside the guarded future, so a panic raised
    // before the first await is caught as well.
    let invocation = async move { function(task).await };
    match AssertUnwindSafe(invocation).catch_unwind().await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            debug!(function = %name, error = %err, "task returned an error");
            result.set_error(TaskError::Execution(err));
        }
        Err(payload) => {
            let message = panic_message(payload);
            warn!(function = %name, panic = %message, "task panicked");
            result.set_error(TaskError::Panic(message));
        }
    }

    result
}
