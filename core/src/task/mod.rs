pub mod result;
pub mod types;

pub use result::TaskResult;
pub use types::{Task, TaskCallback, TaskOptions, DEFAULT_TASK_TIMEOUT};
