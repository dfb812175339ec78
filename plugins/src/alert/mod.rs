pub mod discord;

pub use discord::{DiscordWebhookAlerter, DiscordWebhookOptions};
