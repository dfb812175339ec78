//! `web_scrape`: fetch a page and alert on keywords found in its body.

use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use reqwest::StatusCode;
use serde_json::Value;
use sentinel_core::api::Task;

pub const WEB_SCRAPE: &str = "web_scrape";

/// Shares one HTTP connection pool across every scrape task.
#[derive(Debug, Clone, Default)]
pub struct WebScraper {
    http: reqwest::Client,
}

impl WebScraper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Options: `url` (string) and `keywords` (list of strings).
    ///
    /// The request is bounded by the task timeout. Anything but `200 OK`
    /// fails the task; no alert is posted in that case.
    pub async fn run(&self, task: Arc<Task>) -> anyhow::Result<()> {
        let url = task
            .option_str("url")
            .ok_or_else(|| anyhow!("invalid task parameter url {}", describe(task.option("url"))))?;
        let keywords = keywords_option(task.option("keywords"))?;

        tracing::debug!(url, timeout_ms = task.timeout().as_millis() as u64, "scraping");
        let resp = self
            .http
            .get(url)
            .timeout(task.timeout())
            .send()
            .await
            .with_context(|| format!("failed to query website {url}"))?;

        let status = resp.status();
        if status != StatusCode::OK {
            bail!("failed to query website, status code {}", status.as_u16());
        }

        let body = resp
            .text()
            .await
            .with_context(|| format!("failed to read response body from {url}"))?;

        let matched = match_keywords(&body, &keywords);
        if matched.is_empty() {
            tracing::debug!(url, "no keyword matched");
            return Ok(());
        }
        tracing::info!(url, keywords = ?matched, "keywords matched");
        task.alerter().post_alert(&matched).await;
        Ok(())
    }
}

/// Keywords contained in `body`, in the order they were configured.
pub fn match_keywords(body: &str, keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .filter(|kw| body.contains(kw.as_str()))
        .cloned()
        .collect()
}

fn keywords_option(value: Option<&Value>) -> anyhow::Result<Vec<String>> {
    let Some(Value::Array(items)) = value else {
        bail!("invalid task parameter keywords {}", describe(value));
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(anyhow!("invalid task parameter keyword {other}")),
        })
        .collect()
}

fn describe(value: Option<&Value>) -> String {
    value.map_or_else(|| "<missing>".to_string(), Value::to_string)
}
