//! Telegram lead-notification client
//!
//! New service inquiries ping the operator's Telegram channel. Sends are
//! fire-and-forget: a delivery failure is logged and never fails the
//! inquiry submission.

use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;

#[derive(Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    bot_token: String,
    chat_id: String,
}

#[derive(Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

impl TelegramClient {
    pub fn new(bot_token: &str, chat_id: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build Telegram HTTP client")?;

        Ok(Self {
            client,
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }

    pub async fn send_message(&self, text: &str) -> Result<()> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);

        let response = self
            .client
            .post(&url)
            .json(&SendMessageBody {
                chat_id: &self.chat_id,
                text,
                parse_mode: "HTML",
            })
            .send()
            .await
            .context("Telegram request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Telegram API returned {}: {}", status, body);
        }

        Ok(())
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Bot token stays out of logs
        f.debug_struct("TelegramClient")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}
