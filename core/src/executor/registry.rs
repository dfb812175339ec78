//! Name → execution function table consulted by every worker.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::RegistryError;
use crate::task::Task;

/// Callable that performs a task's actual work.
pub type ExecutionFn =
    Arc<dyn Fn(Arc<Task>) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Wrap an async closure as an [`ExecutionFn`].
pub fn execution_fn<F, Fut>(f: F) -> ExecutionFn
where
    F: Fn(Arc<Task>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move |task| f(task).boxed())
}

/// Wrap a synchronous closure as an [`ExecutionFn`]. It runs on the worker's
/// runtime thread, so it should not block for long.
pub fn blocking_execution_fn<F>(f: F) -> ExecutionFn
where
    F: Fn(&Task) -> anyhow::Result<()> + Send + Sync + 'static,
{
    let f = Arc::new(f);
    Arc::new(move |task| {
        let f = f.clone();
        async move { f(task.as_ref()) }.boxed()
    })
}

/// Registered execution functions keyed by unique name.
///
/// Owned by the caller and injected into the executor. Registration is
/// expected to finish before `Executor::start`; the table is behind a
/// `RwLock`, so a late registration is still safe and becomes visible to
/// the next lookup.
#[derive(Default)]
pub struct ExecutionRegistry {
    functions: RwLock<HashMap<String, ExecutionFn>>,
}

impl ExecutionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding exactly one function, for single-purpose pools.
    pub fn single(name: impl Into<String>, function: ExecutionFn) -> Self {
        let mut functions = HashMap::new();
        functions.insert(name.into(), function);
        Self {
            functions: RwLock::new(functions),
        }
    }

    pub fn register(
        &self,
        name: impl Into<String>,
        function: ExecutionFn,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut functions = self
            .functions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if functions.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        tracing::debug!(function = %name, "registered execution function");
        functions.insert(name, function);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<ExecutionFn> {
        self.functions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .functions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for ExecutionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}
