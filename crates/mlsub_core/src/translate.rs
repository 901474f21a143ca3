use async_trait::async_trait;

/// Best-effort text translation.
#[async_trait]
pub trait Translator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Translate `text`, returning the input unchanged on any backend
    /// failure. Never fails the caller.
    async fn translate(&self, text: &str) -> String;
}
