use serde::{Deserialize, Serialize};

use crate::error::ExecutorError;

/// Worker pool sizing, fixed for the lifetime of an executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Number of worker tasks spawned by `start`.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Capacity of both the task queue and the result queue.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_workers() -> usize {
    5
}

fn default_queue_capacity() -> usize {
    50
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl ExecutorConfig {
    pub fn new(workers: usize, queue_capacity: usize) -> Self {
        Self {
            workers,
            queue_capacity,
        }
    }

    pub fn validate(&self) -> Result<(), ExecutorError> {
        if self.workers == 0 {
            return Err(ExecutorError::InvalidConfig(
                "workers must be greater than zero".into(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(ExecutorError::InvalidConfig(
                "queue_capacity must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pool_constants() {
        let cfg = ExecutorConfig::default();
        assert_eq!(cfg.workers, 5);
        assert_eq!(cfg.queue_capacity, 50);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(matches!(
            ExecutorConfig::new(0, 10).validate(),
            Err(ExecutorError::InvalidConfig(_))
        ));
        assert!(matches!(
            ExecutorConfig::new(2, 0).validate(),
            Err(ExecutorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: ExecutorConfig = toml::from_str("workers = 2").unwrap();
        assert_eq!(cfg, ExecutorConfig::new(2, 50));
    }
}
