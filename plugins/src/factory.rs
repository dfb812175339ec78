use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

use sentinel_core::api::{execution_fn, Alerter, ExecutionRegistry};

use crate::alert::{DiscordWebhookAlerter, DiscordWebhookOptions};
use crate::functions::{WebScraper, WEB_SCRAPE};

pub const WEBHOOK_DISCORD: &str = "webhook_discord";

/// Build the alerter named by a workload `alerts` entry.
pub fn build_alerter(name: &str, options: &Map<String, Value>) -> Result<Arc<dyn Alerter>> {
    match name {
        WEBHOOK_DISCORD => {
            let options: DiscordWebhookOptions =
                serde_json::from_value(Value::Object(options.clone()))
                    .with_context(|| format!("invalid configuration for {name}"))?;
            Ok(Arc::new(DiscordWebhookAlerter::new(options)?))
        }
        other => bail!("invalid alerter name {other}"),
    }
}

/// Register every built-in execution function under its workload name.
pub fn register_builtin_functions(registry: &ExecutionRegistry) -> Result<()> {
    let scraper = WebScraper::new();
    registry.register(
        WEB_SCRAPE,
        execution_fn(move |task| {
            let scraper = scraper.clone();
            async move { scraper.run(task).await }
        }),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn builds_discord_alerter() {
        let alerter = build_alerter(
            WEBHOOK_DISCORD,
            &map(json!({"webhook": "https://discord.test/hook", "message": "hit $keywords"})),
        );
        assert!(alerter.is_ok());
    }

    #[test]
    fn unknown_alerter_is_rejected() {
        let err = build_alerter("pager", &Map::new()).unwrap_err();
        assert_eq!(err.to_string(), "invalid alerter name pager");
    }

    #[test]
    fn discord_options_must_be_strings() {
        assert!(build_alerter(WEBHOOK_DISCORD, &map(json!({"webhook": "https://x"}))).is_err());
        assert!(build_alerter(
            WEBHOOK_DISCORD,
            &map(json!({"webhook": 5, "message": "m"}))
        )
        .is_err());
        assert!(build_alerter(
            WEBHOOK_DISCORD,
            &map(json!({"webhook": "not-a-url", "message": "m"}))
        )
        .is_err());
    }

    #[test]
    fn builtins_register_once() {
        let registry = ExecutionRegistry::new();
        register_builtin_functions(&registry).unwrap();
        assert_eq!(registry.names(), vec![WEB_SCRAPE.to_string()]);
        assert!(register_builtin_functions(&registry).is_err());
    }
}
