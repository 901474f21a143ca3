use async_trait::async_trait;

use crate::Article;

/// A content source turns an upstream API's data into articles.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short identifier used in logs and `metadata.source`.
    fn name(&self) -> &'static str;

    /// Fetch up to `max_results` articles matching `search_query`.
    ///
    /// Fail-open: a source-wide failure yields an empty batch and a single
    /// malformed item is skipped, both logged inside the source. `max_results`
    /// bounds what is requested upstream; a source may fetch a superset and
    /// filter locally before truncating.
    async fn fetch_articles(&self, search_query: &str, max_results: usize) -> Vec<Article>;
}
