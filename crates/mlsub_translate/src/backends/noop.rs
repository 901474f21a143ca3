use async_trait::async_trait;
use mlsub_core::Translator;

/// Identity backend used when translation is disabled.
#[derive(Debug, Default, Clone)]
pub struct NoOpTranslator;

#[async_trait]
impl Translator for NoOpTranslator {
    fn name(&self) -> &'static str {
        "noop"
    }

    async fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_input_unchanged() {
        let translator = NoOpTranslator;
        assert_eq!(translator.translate("Hello, world!").await, "Hello, world!");
        assert_eq!(translator.translate("").await, "");
    }
}
