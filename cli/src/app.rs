//! Wires workloads, built-in functions and the executor together.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sentinel_core::api::{
    execute_tasks, CliError, ExecutionRegistry, ExecutorConfig, RunSummary, Task, Workload,
    WorkloadError,
};
use sentinel_plugins::factory::register_builtin_functions;
use sentinel_plugins::services::PluginAlerterFactory;

#[tracing::instrument(name = "cli.run_file", skip_all, fields(path = %path.display()))]
pub async fn run_file(path: &Path, config: ExecutorConfig) -> Result<RunSummary, CliError> {
    let workload = Workload::from_file(path, &PluginAlerterFactory)?;
    tracing::info!(
        tasks = workload.len(),
        alerters = workload.alerter_count(),
        "workload loaded"
    );
    run_tasks(workload.into_tasks(), config).await
}

#[tracing::instrument(name = "cli.run_directory", skip_all, fields(dir = %dir.display()))]
pub async fn run_directory(dir: &Path, config: ExecutorConfig) -> Result<RunSummary, CliError> {
    let tasks = load_directory(dir)?;
    run_tasks(tasks, config).await
}

async fn run_tasks(tasks: Vec<Arc<Task>>, config: ExecutorConfig) -> Result<RunSummary, CliError> {
    let registry = ExecutionRegistry::new();
    register_builtin_functions(&registry)?;

    let summary = execute_tasks(Arc::new(registry), config, tasks).await?;
    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "run complete"
    );
    Ok(summary)
}

/// Workload files directly under `dir`, sorted by path.
pub fn workload_files(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    if !dir.is_dir() {
        return Err(CliError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} is not a directory", dir.display()),
        )));
    }

    let base = glob::Pattern::escape(&dir.to_string_lossy());
    let mut files = Vec::new();
    for ext in ["yaml", "yml"] {
        let pattern = format!("{base}/*.{ext}");
        let paths = glob::glob(&pattern).map_err(|e| CliError::Config(e.to_string()))?;
        files.extend(paths.filter_map(Result::ok).filter(|p| p.is_file()));
    }
    files.sort();
    Ok(files)
}

/// Tasks of every loadable workload in `dir`. Broken files are logged and skipped.
pub fn load_directory(dir: &Path) -> Result<Vec<Arc<Task>>, CliError> {
    let mut tasks = Vec::new();
    let mut loaded = 0usize;
    for path in workload_files(dir)? {
        match Workload::from_file(&path, &PluginAlerterFactory) {
            Ok(workload) => {
                tracing::info!(path = %path.display(), tasks = workload.len(), "workload loaded");
                loaded += 1;
                tasks.extend(workload.into_tasks());
            }
            Err(e) => tracing::error!(path = %path.display(), error = %e, "skipping workload"),
        }
    }

    if loaded == 0 {
        return Err(WorkloadError::NoTasks.into());
    }
    Ok(tasks)
}
