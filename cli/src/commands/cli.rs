use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentinel_core::api::{AppConfig, CliError};

#[derive(Parser, Debug)]
#[command(name = "sentinel", version, about = "Run web monitoring workloads")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Number of workers (overrides config).
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    /// Task and result queue capacity (overrides config).
    #[arg(long, global = true)]
    pub queue_capacity: Option<usize>,

    /// EnvFilter directive, e.g. "debug" (overrides config; RUST_LOG still wins).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a single workload file.
    File {
        path: PathBuf,
    },
    /// Run every *.yaml / *.yml workload in a directory.
    Directory {
        dir: PathBuf,
    },
}

impl Args {
    pub fn apply_overrides(&self, cfg: &mut AppConfig) {
        if let Some(workers) = self.workers {
            cfg.executor.workers = workers;
        }
        if let Some(capacity) = self.queue_capacity {
            cfg.executor.queue_capacity = capacity;
        }
        if let Some(level) = self.log_level.as_ref().filter(|l| !l.trim().is_empty()) {
            cfg.logging.level = level.clone();
        }
    }

    /// Apply the flags over a loaded config and validate the result once.
    pub fn resolve(&self, mut cfg: AppConfig) -> Result<AppConfig, CliError> {
        self.apply_overrides(&mut cfg);
        cfg.executor
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(cfg)
    }
}
