use clap::ValueEnum;
use mlsub_core::{Article, Notifier};
use tracing::{error, info, warn};

use crate::channels::{TelegramNotifier, WebhookNotifier};
use crate::render::{Format, Style};

/// Which channels a run should deliver to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ChannelSelector {
    Telegram,
    Webhook,
    /// Every channel with credentials present.
    #[default]
    All,
}

/// Channel credentials, usually read from the environment.
#[derive(Debug, Clone, Default)]
pub struct NotifyConfig {
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub webhook_url: Option<String>,
}

impl NotifyConfig {
    /// Reads `TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID` and `WEBHOOK_URL`.
    /// Missing credentials leave the channel unconfigured rather than
    /// failing.
    pub fn from_env() -> Self {
        Self {
            telegram_bot_token: non_empty_env("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: non_empty_env("TELEGRAM_CHAT_ID"),
            webhook_url: non_empty_env("WEBHOOK_URL"),
        }
    }

    pub fn telegram_configured(&self) -> bool {
        self.telegram_bot_token.is_some() && self.telegram_chat_id.is_some()
    }

    pub fn webhook_configured(&self) -> bool {
        self.webhook_url.is_some()
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Builds the notifiers a selector asks for, skipping channels without
/// credentials. An invalid webhook URL also just drops that channel.
pub fn resolve_notifiers(
    selector: ChannelSelector,
    config: &NotifyConfig,
    style: Style,
    format: Format,
) -> Vec<Box<dyn Notifier>> {
    let want_telegram = matches!(selector, ChannelSelector::Telegram | ChannelSelector::All);
    let want_webhook = matches!(selector, ChannelSelector::Webhook | ChannelSelector::All);
    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();

    if want_telegram {
        match (&config.telegram_bot_token, &config.telegram_chat_id) {
            (Some(token), Some(chat_id)) => {
                notifiers.push(Box::new(TelegramNotifier::new(
                    token.clone(),
                    chat_id.clone(),
                    style,
                    format,
                )));
            }
            _ if selector == ChannelSelector::Telegram => {
                warn!("Telegram credentials not found in environment variables.");
            }
            _ => {}
        }
    }

    if want_webhook {
        match &config.webhook_url {
            Some(url) => match WebhookNotifier::new(url, style, format) {
                Ok(notifier) => notifiers.push(Box::new(notifier)),
                Err(e) => warn!("{}", e),
            },
            None if selector == ChannelSelector::Webhook => {
                warn!("Webhook URL not provided.");
            }
            None => {}
        }
    }

    if notifiers.is_empty() {
        warn!("no notification channel configured, nothing will be delivered");
    }
    notifiers
}

/// Per-channel delivery results for one batch.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub delivered: Vec<&'static str>,
    pub failed: Vec<&'static str>,
}

/// Sends the batch through every channel in turn. One channel failing
/// never stops the others.
pub async fn dispatch(notifiers: &[Box<dyn Notifier>], articles: &[Article]) -> DispatchOutcome {
    let mut outcome = DispatchOutcome::default();
    for notifier in notifiers {
        match notifier.send(articles).await {
            Ok(()) => {
                info!("📨 delivered {} article(s) via {}", articles.len(), notifier.name());
                outcome.delivered.push(notifier.name());
            }
            Err(e) => {
                error!("{} delivery failed: {}", notifier.name(), e);
                outcome.failed.push(notifier.name());
            }
        }
    }
    outcome
}
