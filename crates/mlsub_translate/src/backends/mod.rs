use mlsub_core::Translator;

pub mod deepl;
pub mod google_free;
pub mod noop;

pub use deepl::DeepLTranslator;
pub use google_free::GoogleFreeTranslator;
pub use noop::NoOpTranslator;

/// Translation backend selection inputs.
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub enabled: bool,
    pub deepl_api_key: Option<String>,
    pub target_lang: Option<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            deepl_api_key: None,
            target_lang: None,
        }
    }
}

impl TranslatorConfig {
    /// Reads `TRANSLATION_ENABLED` (anything but "true" disables, default
    /// true), `DEEPL_API_KEY` and `TRANSLATION_TARGET_LANG`. Absent
    /// credentials are a valid, degraded state.
    pub fn from_env() -> Self {
        let enabled = std::env::var("TRANSLATION_ENABLED")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(true);
        Self {
            enabled,
            deepl_api_key: non_empty_env("DEEPL_API_KEY"),
            target_lang: non_empty_env("TRANSLATION_TARGET_LANG"),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Pick a backend from the configuration. Disabled wins over everything,
/// then a DeepL key, then the keyless free backend.
pub fn create_translator(config: &TranslatorConfig) -> Box<dyn Translator> {
    if !config.enabled {
        return Box::new(NoOpTranslator);
    }
    match &config.deepl_api_key {
        Some(key) => Box::new(DeepLTranslator::new(key.clone(), config.target_lang.clone())),
        None => Box::new(GoogleFreeTranslator::new(config.target_lang.clone())),
    }
}
