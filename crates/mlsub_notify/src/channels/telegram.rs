use std::time::Duration;

use async_trait::async_trait;
use mlsub_core::{Article, Error, Notifier};
use reqwest::Client;
use serde::Serialize;
use tracing::warn;

use crate::render::{Format, Markup, MessageRenderer, Style};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Telegram keeps messages under 4096 characters; headroom for the heading
/// and markup overhead.
pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 3500;
pub const DEFAULT_MAX_ITEMS_PER_MESSAGE: usize = 5;

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Bot API channel. Long batches are split into several messages, each
/// re-prefixed with the heading.
pub struct TelegramNotifier {
    client: Client,
    bot_token: String,
    chat_id: String,
    api_base: String,
    renderer: MessageRenderer,
    pub max_items_per_message: usize,
    pub max_message_chars: usize,
}

impl TelegramNotifier {
    const API_BASE: &'static str = "https://api.telegram.org";

    pub fn new(
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        style: Style,
        format: Format,
    ) -> Self {
        let markup = match format {
            Format::Text => Markup::Html,
            Format::Markdown => Markup::MarkdownV2,
        };
        Self {
            client: Client::new(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_base: Self::API_BASE.to_string(),
            renderer: MessageRenderer::new(style, markup),
            max_items_per_message: DEFAULT_MAX_ITEMS_PER_MESSAGE,
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
        }
    }

    #[cfg(test)]
    fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn parse_mode(&self) -> &'static str {
        match self.renderer.markup {
            Markup::MarkdownV2 => "MarkdownV2",
            _ => "HTML",
        }
    }

    fn split_messages(&self, heading: &str, blocks: &[String]) -> Vec<String> {
        let mut messages = Vec::new();
        let mut current = heading.to_string();
        let mut count = 0;
        for block in blocks {
            let over_items = count >= self.max_items_per_message;
            let over_chars = current.len() + block.len() + 2 > self.max_message_chars;
            if count > 0 && (over_items || over_chars) {
                messages.push(current);
                current = heading.to_string();
                count = 0;
            }
            current.push_str("\n\n");
            current.push_str(block);
            count += 1;
        }
        if count > 0 {
            messages.push(current);
        }
        messages
    }

    async fn post(&self, text: &str) -> mlsub_core::Result<()> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: self.parse_mode(),
        };
        self.client
            .post(format!("{}/bot{}/sendMessage", self.api_base, self.bot_token))
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, articles: &[Article]) -> mlsub_core::Result<()> {
        let messages = if articles.is_empty() {
            vec![self.renderer.reminder()]
        } else {
            let heading = self.renderer.heading(articles);
            let blocks = self.renderer.render_batch(articles);
            self.split_messages(&heading, &blocks)
        };

        let mut failures = 0;
        for message in &messages {
            if let Err(e) = self.post(message).await {
                warn!("Telegram send failed: {}", e);
                failures += 1;
            }
        }
        if failures > 0 {
            return Err(Error::Notification(format!(
                "{} of {} Telegram messages failed",
                failures,
                messages.len()
            )));
        }
        Ok(())
    }
}
