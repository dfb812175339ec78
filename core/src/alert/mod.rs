//! Notification capability handed to execution functions through their task.
//!
//! The executor never calls an alerter; execution functions decide when a
//! task's condition is met and post the matched keywords themselves.

use std::fmt;

use async_trait::async_trait;

#[async_trait]
pub trait Alerter: Send + Sync + fmt::Debug {
    /// Fire-and-forget: delivery failures are logged by the implementation.
    async fn post_alert(&self, matched_keywords: &[String]);
}

/// Alerter used when a task has nothing better configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopAlerter;

#[async_trait]
impl Alerter for NoopAlerter {
    async fn post_alert(&self, matched_keywords: &[String]) {
        tracing::debug!(keywords = ?matched_keywords, "noop alert");
    }
}

/// Builds alerters from the `alerts` section of a workload.
pub trait AlerterFactory: Send + Sync {
    fn build(
        &self,
        name: &str,
        options: &serde_json::Map<String, serde_json::Value>,
    ) -> anyhow::Result<std::sync::Arc<dyn Alerter>>;
}
