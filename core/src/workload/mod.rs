//! Workload documents: alert definitions plus the tasks that use them.

mod parse;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::alert::{Alerter, AlerterFactory};
use crate::error::WorkloadError;
use crate::task::Task;

/// Execution function used when a task entry does not name one.
pub const DEFAULT_EXECUTION_FN: &str = "web_scrape";

/// Tasks and alerters parsed from one workload document.
#[derive(Debug, Default)]
pub struct Workload {
    tasks: Vec<Arc<Task>>,
    alerters: HashMap<String, Arc<dyn Alerter>>,
}

impl Workload {
    pub fn from_yaml(
        contents: &str,
        factory: &dyn AlerterFactory,
    ) -> Result<Self, WorkloadError> {
        let document: serde_json::Value = serde_yaml::from_str(contents)?;
        parse::build_workload(&document, factory)
    }

    pub fn from_file(
        path: impl AsRef<Path>,
        factory: &dyn AlerterFactory,
    ) -> Result<Self, WorkloadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents, factory)
    }

    pub fn tasks(&self) -> &[Arc<Task>] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn alerter(&self, name: &str) -> Option<&Arc<dyn Alerter>> {
        self.alerters.get(name)
    }

    pub fn alerter_count(&self) -> usize {
        self.alerters.len()
    }

    pub fn into_tasks(self) -> Vec<Arc<Task>> {
        self.tasks
    }
}
