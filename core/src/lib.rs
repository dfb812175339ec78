//! Task execution engine for sentinel.
//!
//! Tasks name an execution function registered in an [`executor::ExecutionRegistry`];
//! a fixed pool of workers runs them and reports one [`task::TaskResult`] each.

pub mod alert;
pub mod api;
pub mod config;
pub mod error;
pub mod executor;
pub mod task;
pub mod workload;
