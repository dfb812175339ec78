//! Alerter factory handed to the workload loader.
use std::sync::Arc;

use serde_json::{Map, Value};
use sentinel_core::api::{Alerter, AlerterFactory};

use crate::factory;

#[derive(Debug, Clone, Copy, Default)]
pub struct PluginAlerterFactory;

impl AlerterFactory for PluginAlerterFactory {
    fn build(&self, name: &str, options: &Map<String, Value>) -> anyhow::Result<Arc<dyn Alerter>> {
        factory::build_alerter(name, options)
    }
}
