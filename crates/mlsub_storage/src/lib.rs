pub mod backends;

pub use backends::json::JsonStore;

pub mod prelude {
    pub use super::backends::json::JsonStore;
    pub use mlsub_core::{Article, ArticleStore, Result};
}
