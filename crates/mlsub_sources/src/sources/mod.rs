use clap::ValueEnum;
use mlsub_core::ContentSource;

pub mod arxiv;
pub mod hn;

pub use arxiv::ArxivSource;
pub use hn::HackerNewsSource;

/// Query used for arXiv when the caller does not supply one.
pub const DEFAULT_ARXIV_QUERY: &str = "cat:cs.LG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SourceKind {
    #[default]
    Arxiv,
    Hn,
}

/// Build a content source. `days` is the arXiv recency window; Hacker News
/// keeps its own age filter and ignores it.
pub fn create_source(kind: SourceKind, days: Option<i64>) -> Box<dyn ContentSource> {
    match kind {
        SourceKind::Arxiv => Box::new(ArxivSource::new(days)),
        SourceKind::Hn => Box::new(HackerNewsSource::new(hn::DEFAULT_MAX_AGE_DAYS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_maps_kind_to_source_name() {
        assert_eq!(create_source(SourceKind::Arxiv, Some(1)).name(), "arxiv");
        assert_eq!(create_source(SourceKind::Hn, None).name(), "hn");
    }
}
