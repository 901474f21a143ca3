use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use mlsub_core::{Error, Translator};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_TARGET_LANG: &str = "ZH";

#[derive(Serialize)]
struct TranslateRequest {
    text: Vec<String>,
    target_lang: String,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    text: String,
}

/// Paid translation backend over the DeepL REST API.
pub struct DeepLTranslator {
    client: Client,
    api_key: String,
    base_url: String,
    target_lang: String,
}

impl DeepLTranslator {
    const BASE_URL: &'static str = "https://api-free.deepl.com/v2";

    pub fn new(api_key: impl Into<String>, target_lang: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
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
        let request = TranslateRequest {
            text: vec![text.to_string()],
            target_lang: self.target_lang.clone(),
        };

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<TranslateResponse>()
            .await?;

        response
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| Error::Translation("empty DeepL response".to_string()))
    }
}

impl fmt::Debug for DeepLTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepLTranslator")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("target_lang", &self.target_lang)
            .finish()
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    fn name(&self) -> &'static str {
        "deepl"
    }

    async fn translate(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }
        match self.request(text).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!("DeepL translation error: {}", e);
                text.to_string()
            }
        }
    }
}
