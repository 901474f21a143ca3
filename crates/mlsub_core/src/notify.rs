use async_trait::async_trait;

use crate::{Article, Result};

/// Renders articles into a channel-specific message and delivers it.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Channel name used in logs and run reports.
    fn name(&self) -> &'static str;

    /// Deliver the batch. A delivery failure returns `Err`; the dispatch
    /// layer logs it and continues with the remaining channels.
    async fn send(&self, articles: &[Article]) -> Result<()>;
}
