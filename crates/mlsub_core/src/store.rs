use std::path::Path;

use crate::{Article, Result};

/// Load/save the last-known article set for a logical feed.
///
/// Synchronous by design: the only backend is a local file.
pub trait ArticleStore: Send + Sync {
    /// Load the persisted set. An absent, unreadable or unparseable file
    /// degrades to an empty baseline, never an error.
    fn load(&self, path: &Path) -> Vec<Article>;

    /// Replace the persisted set atomically. Save failures are the one
    /// storage error that propagates to the caller.
    fn save(&self, path: &Path, articles: &[Article]) -> Result<()>;
}
