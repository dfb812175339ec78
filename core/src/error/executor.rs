use thiserror::Error;

/// Registration failures of the execution function registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("execution function already exists: '{0}'")]
    DuplicateName(String),
}

/// Per-task failure carried on a `TaskResult`.
///
/// These never escape a worker; the caller inspects them on the result stream.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("invalid task execution function name: '{0}'")]
    Lookup(String),

    #[error("panic: {0}")]
    Panic(String),

    #[error(transparent)]
    Execution(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskErrorKind {
    Lookup,
    Panic,
    Execution,
}

impl TaskError {
    pub fn kind(&self) -> TaskErrorKind {
        match self {
            Self::Lookup(_) => TaskErrorKind::Lookup,
            Self::Panic(_) => TaskErrorKind::Panic,
            Self::Execution(_) => TaskErrorKind::Execution,
        }
    }
}

/// Lifecycle misuse of the executor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    #[error("executor already started")]
    AlreadyStarted,

    #[error("executor is not running")]
    NotRunning,

    #[error("task queue is closed")]
    QueueClosed,

    #[error("invalid executor config: {0}")]
    InvalidConfig(String),

    #[error("worker join failed: {0}")]
    WorkerJoin(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_message_names_the_function() {
        let err = TaskError::Lookup("does-not-exist".into());
        assert_eq!(
            err.to_string(),
            "invalid task execution function name: 'does-not-exist'"
        );
        assert_eq!(err.kind(), TaskErrorKind::Lookup);
    }

    #[test]
    fn execution_error_is_transparent() {
        let err = TaskError::from(anyhow::anyhow!("test"));
        assert_eq!(err.to_string(), "test");
        assert_eq!(err.kind(), TaskErrorKind::Execution);
    }

    #[test]
    fn panic_message_is_prefixed() {
        let err = TaskError::Panic("index out of bounds".into());
        assert_eq!(err.to_string(), "panic: index out of bounds");
    }
}
