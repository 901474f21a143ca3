pub mod backends;

pub use backends::{create_translator, TranslatorConfig};
pub use backends::deepl::DeepLTranslator;
pub use backends::google_free::GoogleFreeTranslator;
pub use backends::noop::NoOpTranslator;

pub mod prelude {
    pub use super::backends::{create_translator, TranslatorConfig};
    pub use mlsub_core::{Result, Translator};
}
