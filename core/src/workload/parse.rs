use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::error;

use super::{Workload, DEFAULT_EXECUTION_FN};
use crate::alert::{Alerter, AlerterFactory};
use crate::error::WorkloadError;
use crate::task::Task;

pub(super) fn build_workload(
    document: &Value,
    factory: &dyn AlerterFactory,
) -> Result<Workload, WorkloadError> {
    let alerters = build_alerters(document, factory)?;
    let tasks = build_tasks(document, &alerters)?;
    Ok(Workload { tasks, alerters })
}

fn build_alerters(
    document: &Value,
    factory: &dyn AlerterFactory,
) -> Result<HashMap<String, Arc<dyn Alerter>>, WorkloadError> {
    let section = document
        .get("alerts")
        .ok_or(WorkloadError::MissingKey("alerts"))?
        .as_object()
        .ok_or_else(|| WorkloadError::InvalidType {
            key: "alerts".into(),
            expected: "a map",
        })?;

    let mut alerters: HashMap<String, Arc<dyn Alerter>> = HashMap::new();
    for (name, options) in section {
        let options = options
            .as_object()
            .ok_or_else(|| WorkloadError::InvalidType {
                key: format!("alerts.{name}"),
                expected: "a map",
            })?;
        if alerters.contains_key(name) {
            return Err(WorkloadError::DuplicateAlert(name.clone()));
        }
        let alerter = factory
            .build(name, options)
            .map_err(|source| WorkloadError::Alerter {
                name: name.clone(),
                source,
            })?;
        alerters.insert(name.clone(), alerter);
    }
    Ok(alerters)
}

fn build_tasks(
    document: &Value,
    alerters: &HashMap<String, Arc<dyn Alerter>>,
) -> Result<Vec<Arc<Task>>, WorkloadError> {
    let entries = document
        .get("tasks")
        .ok_or(WorkloadError::MissingKey("tasks"))?
        .as_array()
        .ok_or_else(|| WorkloadError::InvalidType {
            key: "tasks".into(),
            expected: "an array",
        })?;

    let mut tasks = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        match build_task(entry, alerters) {
            Ok(task) => tasks.push(Arc::new(task)),
            Err(reason) => error!("error parsing entry {i} in tasks array: {reason}"),
        }
    }

    if tasks.is_empty() {
        return Err(WorkloadError::NoTasks);
    }
    Ok(tasks)
}

/// Entries that fail here are skipped, not fatal.
fn build_task(
    entry: &Value,
    alerters: &HashMap<String, Arc<dyn Alerter>>,
) -> Result<Task, String> {
    let entry = entry.as_object().ok_or("not a valid map type")?;

    let options = entry
        .get("options")
        .and_then(Value::as_object)
        .ok_or("options is not a valid map type")?;

    let function = match entry.get("function") {
        None => DEFAULT_EXECUTION_FN,
        Some(value) => value.as_str().ok_or("function is not a string")?,
    };

    let alerter = entry
        .get("alerter")
        .and_then(Value::as_str)
        .and_then(|name| alerters.get(name))
        .ok_or("invalid alerter")?;

    let mut task = Task::new(function, options.clone(), alerter.clone());
    if let Some(seconds) = entry.get("timeout").and_then(Value::as_u64) {
        task = task.with_timeout(Duration::from_secs(seconds));
    }
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskOptions, DEFAULT_TASK_TIMEOUT};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug)]
    struct StubAlerter;

    #[async_trait]
    impl Alerter for StubAlerter {
        async fn post_alert(&self, _matched_keywords: &[String]) {}
    }

    struct TestFactory;

    impl AlerterFactory for TestFactory {
        fn build(
            &self,
            name: &str,
            options: &serde_json::Map<String, Value>,
        ) -> anyhow::Result<Arc<dyn Alerter>> {
            if name != "webhook_discord" {
                anyhow::bail!("invalid alerter name {name}");
            }
            options
                .get("webhook")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| anyhow::anyhow!("missing webhook"))?;
            Ok(Arc::new(StubAlerter))
        }
    }

    const WORKLOAD: &str = r#"
tasks:
  - options:
      url: https://jobs.eu
      keywords: ["Software Engineer, Backend"]
    timeout: 10
    alerter: "webhook_discord"
  - options:
      url: https://jobs.ro
      keywords: ["Software Engineer, Front-End", "Software Architect"]
      extra_int: 80
      extra_float: 80.2
      extra_bool: true
    timeout: 15
    alerter: "webhook_discord"
alerts:
  webhook_discord:
    webhook: https://webhook.url.com
    # $keywords is replaced with the matched keywords.
    message: "Hi, the keyword $keywords was found on page!"
"#;

    fn as_options(value: Value) -> TaskOptions {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn parses_tasks_and_alerts() {
        let workload = Workload::from_yaml(WORKLOAD, &TestFactory).unwrap();

        assert_eq!(workload.len(), 2);
        assert_eq!(workload.alerter_count(), 1);

        let alerter = workload.alerter("webhook_discord").unwrap();
        for task in workload.tasks() {
            assert!(Arc::ptr_eq(task.alerter(), alerter));
            assert_eq!(task.execution_fn_name(), DEFAULT_EXECUTION_FN);
        }

        let tasks = workload.tasks();
        assert_eq!(tasks[0].timeout(), Duration::from_secs(10));
        assert_eq!(tasks[1].timeout(), Duration::from_secs(15));
        assert_eq!(
            tasks[0].options(),
            &as_options(json!({
                "url": "https://jobs.eu",
                "keywords": ["Software Engineer, Backend"],
            }))
        );
        assert_eq!(
            tasks[1].options(),
            &as_options(json!({
                "url": "https://jobs.ro",
                "keywords": ["Software Engineer, Front-End", "Software Architect"],
                "extra_int": 80,
                "extra_float": 80.2,
                "extra_bool": true,
            }))
        );
    }

    #[test]
    fn missing_timeout_uses_default_and_function_can_be_named() {
        let doc = r#"
tasks:
  - function: echo
    options: { url: https://example.com }
    alerter: webhook_discord
alerts:
  webhook_discord: { webhook: https://hook, message: m }
"#;
        let workload = Workload::from_yaml(doc, &TestFactory).unwrap();
        let task = &workload.tasks()[0];
        assert_eq!(task.timeout(), DEFAULT_TASK_TIMEOUT);
        assert_eq!(task.execution_fn_name(), "echo");
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let doc = r#"
tasks:
  - "not a map"
  - options: [1, 2]
    alerter: webhook_discord
  - options: { url: https://a }
    alerter: unknown
  - options: { url: https://a }
  - options: { url: https://b }
    alerter: webhook_discord
alerts:
  webhook_discord: { webhook: https://hook, message: m }
"#;
        let workload = Workload::from_yaml(doc, &TestFactory).unwrap();
        assert_eq!(workload.len(), 1);
        assert_eq!(workload.tasks()[0].option_str("url"), Some("https://b"));
    }

    #[test]
    fn all_entries_invalid_is_an_error() {
        let doc = r#"
tasks:
  - options: { url: https://a }
alerts:
  webhook_discord: { webhook: https://hook, message: m }
"#;
        let err = Workload::from_yaml(doc, &TestFactory).unwrap_err();
        assert!(matches!(err, WorkloadError::NoTasks));
    }

    #[test]
    fn missing_sections_are_errors() {
        let err = Workload::from_yaml("tasks: []", &TestFactory).unwrap_err();
        assert!(matches!(err, WorkloadError::MissingKey("alerts")));

        let err = Workload::from_yaml("alerts: {}", &TestFactory).unwrap_err();
        assert!(matches!(err, WorkloadError::MissingKey("tasks")));

        let err = Workload::from_yaml("alerts: []\ntasks: []", &TestFactory).unwrap_err();
        assert!(matches!(err, WorkloadError::InvalidType { .. }));

        let err = Workload::from_yaml("alerts: {}\ntasks: {}", &TestFactory).unwrap_err();
        assert!(matches!(err, WorkloadError::InvalidType { .. }));
    }

    #[test]
    fn alerter_build_failure_aborts_load() {
        let doc = r#"
tasks:
  - options: { url: https://a }
    alerter: webhook_discord
alerts:
  webhook_discord: { webhook: "", message: m }
"#;
        let err = Workload::from_yaml(doc, &TestFactory).unwrap_err();
        assert!(matches!(err, WorkloadError::Alerter { ref name, .. } if name == "webhook_discord"));
    }

    #[test]
    fn invalid_yaml_is_reported() {
        let err = Workload::from_yaml("tasks: [", &TestFactory).unwrap_err();
        assert!(matches!(err, WorkloadError::Yaml(_)));
        assert!(err.to_string().starts_with("failed to unmarshal yaml contents"));
    }
}
