use std::time::Duration;

use async_trait::async_trait;
use mlsub_core::{Article, Error, Notifier};
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::render::{Format, Markup, MessageRenderer, Style};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Feishu-compatible bot payload, discriminated by `msg_type`.
#[derive(Debug, Serialize)]
#[serde(tag = "msg_type", rename_all = "snake_case")]
enum WebhookPayload {
    Text { content: TextContent },
    Interactive { card: Card },
}

#[derive(Debug, Serialize)]
struct TextContent {
    text: String,
}

#[derive(Debug, Serialize)]
struct Card {
    header: CardHeader,
    elements: Vec<CardElement>,
}

#[derive(Debug, Serialize)]
struct CardHeader {
    title: CardTitle,
}

#[derive(Debug, Serialize)]
struct CardTitle {
    tag: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
enum CardElement {
    Markdown { content: String },
}

/// Incoming-webhook channel. Text format posts a plain `text` message;
/// markdown format posts an interactive card with one element per article.
#[derive(Debug)]
pub struct WebhookNotifier {
    client: Client,
    url: Url,
    renderer: MessageRenderer,
}

impl WebhookNotifier {
    pub fn new(url: &str, style: Style, format: Format) -> mlsub_core::Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| Error::Notification(format!("invalid webhook URL {:?}: {}", url, e)))?;
        let markup = match format {
            Format::Text => Markup::Plain,
            Format::Markdown => Markup::Markdown,
        };
        Ok(Self {
            client: Client::new(),
            url,
            renderer: MessageRenderer::new(style, markup),
        })
    }

    fn payload(&self, articles: &[Article]) -> WebhookPayload {
        let header = MessageRenderer::heading_text(articles).to_string();
        let blocks = if articles.is_empty() {
            vec![self.renderer.reminder()]
        } else {
            self.renderer.render_batch(articles)
        };

        match self.renderer.markup {
            Markup::Markdown => WebhookPayload::Interactive {
                card: Card {
                    header: CardHeader {
                        title: CardTitle {
                            tag: "plain_text",
                            content: header,
                        },
                    },
                    elements: blocks
                        .into_iter()
                        .map(|content| CardElement::Markdown { content })
                        .collect(),
                },
            },
            _ => {
                let body = blocks.join("\n\n");
                let text = if articles.is_empty() {
                    body
                } else {
                    format!("{}\n\n{}", header, body)
                };
                WebhookPayload::Text {
                    content: TextContent { text },
                }
            }
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn send(&self, articles: &[Article]) -> mlsub_core::Result<()> {
        let payload = self.payload(articles);
        self.client
            .post(self.url.clone())
            .timeout(REQUEST_TIMEOUT)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
