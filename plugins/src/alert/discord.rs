use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use sentinel_core::api::Alerter;

/// Placeholder replaced with the comma-joined matched keywords.
pub const KEYWORDS_PLACEHOLDER: &str = "$keywords";

/// Options of the `webhook_discord` alert section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiscordWebhookOptions {
    pub webhook: String,
    #[serde(rename = "message")]
    pub message_template: String,
}

impl DiscordWebhookOptions {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.webhook.is_empty() || self.message_template.is_empty() {
            anyhow::bail!("invalid configuration for webhook_discord");
        }
        if !self.webhook.starts_with("http://") && !self.webhook.starts_with("https://") {
            anyhow::bail!("invalid webhook schema for {}", self.webhook);
        }
        Ok(())
    }
}

/// Posts alerts to a Discord channel through an incoming webhook.
#[derive(Debug, Clone)]
pub struct DiscordWebhookAlerter {
    webhook: String,
    message_template: String,
    http: reqwest::Client,
}

impl DiscordWebhookAlerter {
    pub fn new(options: DiscordWebhookOptions) -> anyhow::Result<Self> {
        options.validate()?;
        Ok(Self {
            webhook: options.webhook,
            message_template: options.message_template,
            http: reqwest::Client::new(),
        })
    }

    pub fn with_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn webhook(&self) -> &str {
        &self.webhook
    }

    pub fn render_message(&self, matched_keywords: &[String]) -> String {
        self.message_template
            .replace(KEYWORDS_PLACEHOLDER, &matched_keywords.join(","))
    }
}

#[async_trait]
impl Alerter for DiscordWebhookAlerter {
    async fn post_alert(&self, matched_keywords: &[String]) {
        let message = self.render_message(matched_keywords);
        let body = json!({
            "content": message,
            "embeds": null,
            "attachments": null,
        });

        let resp = match self.http.post(&self.webhook).json(&body).send().await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::error!(error = %err, "failed to post alert to discord");
                return;
            }
        };

        let status = resp.status();
        if !status.is_success() {
            tracing::error!(status = %status, "discord rejected alert");
            return;
        }
        tracing::info!("alert posted:\nBEGIN\n{message}\nEND");
    }
}
