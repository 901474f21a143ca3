use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use mlsub_core::{Article, ArticleStore, ContentSource, Notifier, Result, Translator};
use mlsub_notify::dispatch;
use tracing::{debug, info};

use crate::diff;

/// Articles passed to the notifiers per run unless overridden.
pub const DEFAULT_NOTIFY_LIMIT: usize = 5;

/// Outcome of one pipeline run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub fetched: usize,
    pub new: usize,
    pub delivered: Vec<&'static str>,
    pub failed: Vec<&'static str>,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fetched {}, {} new", self.fetched, self.new)?;
        if !self.delivered.is_empty() {
            write!(f, ", notified via {}", self.delivered.join(", "))?;
        }
        for name in &self.failed {
            write!(f, ", {} failed", name)?;
        }
        Ok(())
    }
}

/// Ties the capabilities together: fetch, diff against the stored set,
/// translate, notify, persist. Steps run strictly in that order.
pub struct SubscriptionPipeline {
    source: Box<dyn ContentSource>,
    store: Box<dyn ArticleStore>,
    store_path: PathBuf,
    translator: Box<dyn Translator>,
    notifiers: Vec<Box<dyn Notifier>>,
    notify_limit: usize,
}

impl SubscriptionPipeline {
    pub fn new(
        source: Box<dyn ContentSource>,
        store: Box<dyn ArticleStore>,
        store_path: impl Into<PathBuf>,
        translator: Box<dyn Translator>,
        notifiers: Vec<Box<dyn Notifier>>,
    ) -> Self {
        Self {
            source,
            store,
            store_path: store_path.into(),
            translator,
            notifiers,
            notify_limit: DEFAULT_NOTIFY_LIMIT,
        }
    }

    /// Cap on how many new articles are handed to the notifiers;
    /// 0 disables the cap. Persistence always covers the full fetched set.
    pub fn with_notify_limit(mut self, limit: usize) -> Self {
        self.notify_limit = limit;
        self
    }

    /// One full run. The only error that propagates is a failed save;
    /// everything else degrades per component and is logged there.
    pub async fn run(&self, query: &str, max_results: usize) -> Result<RunReport> {
        let stored = self.store.load(&self.store_path);
        info!("📚 loaded {} stored articles", stored.len());

        let fetched: Vec<Article> = self
            .source
            .fetch_articles(query, max_results)
            .await
            .into_iter()
            .filter(|a| a.is_storable())
            .collect();
        let mut fetched = diff::dedup_by_link(fetched);
        info!("🔎 {} returned {} articles", self.source.name(), fetched.len());

        let stored_links: HashSet<String> = stored.iter().map(|a| a.link.clone()).collect();
        if !self.notifiers.is_empty() {
            for article in fetched
                .iter_mut()
                .filter(|a| !stored_links.contains(&a.link))
            {
                self.translate_article(article).await;
            }
        }

        let new = diff::new_articles(&stored, &fetched);
        info!("🆕 {} new articles", new.len());

        let mut report = RunReport {
            fetched: fetched.len(),
            new: new.len(),
            ..RunReport::default()
        };

        if !new.is_empty() {
            if self.notifiers.is_empty() {
                debug!("no notifier configured, skipping notification");
            } else {
                let cap = if self.notify_limit == 0 {
                    new.len()
                } else {
                    self.notify_limit.min(new.len())
                };
                let outcome = dispatch(&self.notifiers, &new[..cap]).await;
                report.delivered = outcome.delivered;
                report.failed = outcome.failed;
            }
        }

        let merged = diff::merge(&stored, &fetched);
        self.store.save(&self.store_path, &merged)?;
        info!("💾 saved {} articles to {}", merged.len(), self.store_path.display());

        Ok(report)
    }

    /// Title and summary are translated independently; a failed field
    /// falls back to the original text and never drops the article.
    async fn translate_article(&self, article: &mut Article) {
        let title = self.translator.translate(&article.title).await;
        if !title.is_empty() && title != article.title {
            article.set_translated_title(title);
        }

        if !article.summary.is_empty() {
            let summary = self.translator.translate(&article.summary).await;
            if !summary.is_empty() && summary != article.summary {
                article.set_translated_summary(summary);
            }
        }
    }
}
