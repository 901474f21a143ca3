use std::time::Duration;

use async_trait::async_trait;
use mlsub_core::{Error, Translator};
use reqwest::Client;
use tracing::warn;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_TARGET_LANG: &str = "zh-CN";

/// Keyless translation backend over the public Google endpoint. Default
/// when no DeepL key is configured and translation is enabled.
#[derive(Debug)]
pub struct GoogleFreeTranslator {
    client: Client,
    base_url: String,
    target_lang: String,
}

impl GoogleFreeTranslator {
    const BASE_URL: &'static str = "https://translate.googleapis.com/translate_a/single";

    pub fn new(target_lang: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Self::BASE_URL.to_string(),
            target_lang: target_lang.unwrap_or_else(|| DEFAULT_TARGET_LANG.to_string()),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn request(&self, text: &str) -> mlsub_core::Result<String> {
        let params = [
            ("client", "gtx"),
            ("sl", "auto"),
            ("tl", self.target_lang.as_str()),
            ("dt", "t"),
            ("q", text),
        ];

        let payload: serde_json::Value = self
            .client
            .get(&self.base_url)
            .query(&params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        concat_segments(&payload)
            .ok_or_else(|| Error::Translation("unexpected response shape".to_string()))
    }
}

/// The endpoint answers with nested arrays, one `[translated, original, ...]`
/// segment per sentence; the full translation is their concatenation.
fn concat_segments(payload: &serde_json::Value) -> Option<String> {
    let segments = payload.get(0)?.as_array()?;
    let mut out = String::new();
    for segment in segments {
        if let Some(text) = segment.get(0).and_then(|v| v.as_str()) {
            out.push_str(text);
        }
    }
    (!out.is_empty()).then_some(out)
}

#[async_trait]
impl Translator for GoogleFreeTranslator {
    fn name(&self) -> &'static str {
        "google-free"
    }

    async fn translate(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }
        match self.request(text).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!("free translation error: {}", e);
                text.to_string()
            }
        }
    }
}
