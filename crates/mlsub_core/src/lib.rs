pub mod article;
pub mod error;
pub mod notify;
pub mod source;
pub mod store;
pub mod translate;

pub use article::{Article, MetaValue, META_SOURCE, META_SUMMARY_TRANSLATED, META_TITLE_TRANSLATED};
pub use error::Error;
pub use notify::Notifier;
pub use source::ContentSource;
pub use store::ArticleStore;
pub use translate::Translator;

pub type Result<T> = std::result::Result<T, Error>;
