pub mod diff;
pub mod pipeline;
pub mod sources;

pub use pipeline::{RunReport, SubscriptionPipeline};
pub use sources::{create_source, SourceKind, DEFAULT_ARXIV_QUERY};

pub mod prelude {
    pub use super::pipeline::{RunReport, SubscriptionPipeline};
    pub use super::sources::{create_source, SourceKind};
    pub use mlsub_core::{Article, ContentSource, Error, Result};
}
