use thiserror::Error;

use super::executor::ExecutorError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("workload error: {0}")]
    Workload(#[from] WorkloadError),
    #[error("executor error: {0}")]
    Executor(#[from] ExecutorError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Errors raised while turning a workload document into tasks.
#[derive(Error, Debug)]
pub enum WorkloadError {
    #[error("failed to unmarshal yaml contents: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("key '{0}' does not exist in workload")]
    MissingKey(&'static str),
    #[error("key '{key}' is not {expected}")]
    InvalidType {
        key: String,
        expected: &'static str,
    },
    #[error("alert section '{0}' is a duplicate")]
    DuplicateAlert(String),
    #[error("failed to build alerter '{name}': {source}")]
    Alerter {
        name: String,
        source: anyhow::Error,
    },
    #[error("tasks list is empty or parsing has failed")]
    NoTasks,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
