use std::fmt;
use std::sync::Arc;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::registry::ExecutionRegistry;
use super::stream::ResultStream;
use super::types::ExecutorConfig;
use super::worker::{SharedTaskQueue, Worker};
use crate::error::ExecutorError;
use crate::task::{Task, TaskResult};

/// Lifecycle of an [`Executor`]. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorState {
    Created,
    Running,
    ShuttingDown,
    Stopped,
}

impl fmt::Display for ExecutorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::ShuttingDown => "shutting_down",
            Self::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// Cloneable submission handle for producers running on other tasks.
#[derive(Debug, Clone)]
pub struct TaskSender {
    tx: mpsc::Sender<Arc<Task>>,
}

impl TaskSender {
    /// Waits while the task queue is full. Fails once the executor has shut down.
    pub async fn send(&self, task: impl Into<Arc<Task>>) -> Result<(), ExecutorError> {
        self.tx
            .send(task.into())
            .await
            .map_err(|_| ExecutorError::QueueClosed)
    }
}

/// Fixed-size worker pool executing tasks through an [`ExecutionRegistry`].
///
/// Tasks go through a bounded queue; results come back through a bounded
/// [`ResultStream`] in completion order. On shutdown, tasks still waiting in
/// the queue are discarded without producing a result.
///
/// `start` spawns onto the ambient tokio runtime.
pub struct Executor {
    config: ExecutorConfig,
    registry: Arc<ExecutionRegistry>,
    state: ExecutorState,
    task_tx: Option<mpsc::Sender<Arc<Task>>>,
    task_rx: SharedTaskQueue,
    result_tx: Option<mpsc::Sender<TaskResult>>,
    result_rx: Option<mpsc::Receiver<TaskResult>>,
    shutdown_tx: watch::Sender<bool>,
    workers: Vec<JoinHandle<()>>,
}

impl Executor {
    pub fn new(
        registry: Arc<ExecutionRegistry>,
        config: ExecutorConfig,
    ) -> Result<Self, ExecutorError> {
        config.validate()?;
        Ok(Self::build(registry, config))
    }

    /// Executor with the default pool size (5 workers, queues of 50).
    pub fn with_defaults(registry: Arc<ExecutionRegistry>) -> Self {
        Self::build(registry, ExecutorConfig::default())
    }

    fn build(registry: Arc<ExecutionRegistry>, config: ExecutorConfig) -> Self {
        let (task_tx, task_rx) = mpsc::channel(config.queue_capacity);
        let (result_tx, result_rx) = mpsc::channel(config.queue_capacity);
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            config,
            registry,
            state: ExecutorState::Created,
            task_tx: Some(task_tx),
            task_rx: Arc::new(Mutex::new(task_rx)),
            result_tx: Some(result_tx),
            result_rx: Some(result_rx),
            shutdown_tx,
            workers: Vec::with_capacity(config.workers),
        }
    }

    pub fn state(&self) -> ExecutorState {
        self.state
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn worker_count(&self) -> usize {
        self.config.workers
    }

    pub fn queue_capacity(&self) -> usize {
        self.config.queue_capacity
    }

    pub fn registry(&self) -> &Arc<ExecutionRegistry> {
        &self.registry
    }

    /// Spawn the workers and hand out the result stream. Valid once.
    pub fn start(&mut self) -> Result<ResultStream, ExecutorError> {
        if self.state != ExecutorState::Created {
            return Err(ExecutorError::AlreadyStarted);
        }
        let (Some(result_tx), Some(result_rx)) = (self.result_tx.as_ref(), self.result_rx.take())
        else {
            return Err(ExecutorError::AlreadyStarted);
        };

        for id in 0..self.config.workers {
            let worker = Worker {
                id,
                registry: self.registry.clone(),
                tasks: self.task_rx.clone(),
                results: result_tx.clone(),
                shutdown: self.shutdown_tx.subscribe(),
            };
            self.workers.push(tokio::spawn(worker.run()));
        }

        self.state = ExecutorState::Running;
        info!(
            workers = self.config.workers,
            queue_capacity = self.config.queue_capacity,
            "executor started"
        );
        Ok(ResultStream::new(result_rx))
    }

    /// Enqueue a task, waiting while the queue is full.
    ///
    /// Tasks added before `start` are buffered up to the queue capacity.
    pub async fn add_task(&self, task: impl Into<Arc<Task>>) -> Result<(), ExecutorError> {
        match self.state {
            ExecutorState::Created | ExecutorState::Running => {}
            ExecutorState::ShuttingDown | ExecutorState::Stopped => {
                return Err(ExecutorError::QueueClosed)
            }
        }
        let tx = self.task_tx.as_ref().ok_or(ExecutorError::QueueClosed)?;
        tx.send(task.into())
            .await
            .map_err(|_| ExecutorError::QueueClosed)
    }

    pub fn task_sender(&self) -> Result<TaskSender, ExecutorError> {
        self.task_tx
            .as_ref()
            .map(|tx| TaskSender { tx: tx.clone() })
            .ok_or(ExecutorError::QueueClosed)
    }

    /// Stop every worker, wait for them, then close both queues.
    ///
    /// In-flight tasks finish and their results are delivered; queued tasks
    /// are dropped. A worker holding a result waits for room in the result
    /// queue, so when the queue is full the [`ResultStream`] must be drained
    /// concurrently (or dropped) for this to return.
    pub async fn shutdown(&mut self) -> Result<(), ExecutorError> {
        if self.state != ExecutorState::Running {
            return Err(ExecutorError::NotRunning);
        }
        self.state = ExecutorState::ShuttingDown;
        debug!("executor shutting down");

        self.shutdown_tx.send_replace(true);

        let mut join_error = None;
        for handle in self.workers.drain(..) {
            if let Err(err) = handle.await {
                warn!(error = %err, "worker terminated abnormally");
                join_error.get_or_insert_with(|| err.to_string());
            }
        }

        self.task_tx = None;
        let discarded = {
            let mut rx = self.task_rx.lock().await;
            rx.close();
            let mut discarded = 0usize;
            while rx.try_recv().is_ok() {
                discarded += 1;
            }
            discarded
        };
        if discarded > 0 {
            warn!(discarded, "queued tasks discarded at shutdown");
        }
        self.result_tx = None;

        self.state = ExecutorState::Stopped;
        info!("executor stopped");

        match join_error {
            Some(err) => Err(ExecutorError::WorkerJoin(err)),
            None => Ok(()),
        }
    }
}

impl Drop for Executor {
    fn drop(&mut self) {
        if self.state == ExecutorState::Running {
            self.shutdown_tx.send_replace(true);
        }
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("registry", &self.registry)
            .finish()
    }
}
