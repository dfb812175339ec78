//! Bounded worker pool for task execution.
//!
//! ```text
//! Task ──add_task──▶ [task queue, cap C] ──▶ N workers ──▶ [result queue, cap C] ──▶ ResultStream
//!                                             │
//!                                             └─ registry lookup → catch_unwind(execution fn)
//! ```
//!
//! Workers race the next task against the stop signal; the stop signal wins,
//! so tasks still queued at shutdown never produce a result.

mod engine;
mod panic;
mod pool;
pub mod registry;
mod stream;
mod worker;
pub mod types;

pub use engine::{execute_tasks, RunSummary};
pub use pool::{Executor, ExecutorState, TaskSender};
pub use registry::{blocking_execution_fn, execution_fn, ExecutionFn, ExecutionRegistry};
pub use stream::ResultStream;
pub use types::ExecutorConfig;

pub use crate::error::ExecutorError;
