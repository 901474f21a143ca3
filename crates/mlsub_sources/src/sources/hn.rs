use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mlsub_core::{Article, ContentSource, MetaValue, META_SOURCE};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Stories older than this are skipped; 0 disables the filter.
pub const DEFAULT_MAX_AGE_DAYS: i64 = 7;

#[derive(Debug, Deserialize)]
struct HnItem {
    #[serde(rename = "type")]
    kind: Option<String>,
    title: Option<String>,
    text: Option<String>,
    url: Option<String>,
    by: Option<String>,
    time: Option<i64>,
    score: Option<i64>,
    descendants: Option<i64>,
}

/// Fetches top stories from Hacker News and maps them to articles.
///
/// Resolves a superset of `max_results * 2` story IDs one by one and stops
/// once `max_results` articles are collected. The search query is ignored.
pub struct HackerNewsSource {
    client: Client,
    base_url: String,
    max_item_age_secs: i64,
}

impl HackerNewsSource {
    const BASE_URL: &'static str = "https://hacker-news.firebaseio.com/v0";

    pub fn new(max_item_age_days: i64) -> Self {
        Self {
            client: Client::new(),
            base_url: Self::BASE_URL.to_string(),
            max_item_age_secs: max_item_age_days * 24 * 60 * 60,
        }
    }

    async fn top_story_ids(&self) -> reqwest::Result<Vec<u64>> {
        self.client
            .get(format!("{}/topstories.json", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    async fn fetch_item(&self, id: u64) -> reqwest::Result<Option<HnItem>> {
        self.client
            .get(format!("{}/item/{}.json", self.base_url, id))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    fn article_from_item(id: u64, item: HnItem) -> Option<Article> {
        if item.kind.as_deref() != Some("story") {
            return None;
        }

        let title = item
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "(no title)".to_string());
        let summary = item
            .text
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Hacker News story".to_string());
        let link = item
            .url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| format!("https://news.ycombinator.com/item?id={}", id));
        let author = item
            .by
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        let timestamp = item.time.unwrap_or(0);
        let published_date = (timestamp > 0)
            .then(|| Utc.timestamp_opt(timestamp, 0).single())
            .flatten();

        let mut metadata = BTreeMap::new();
        metadata.insert(META_SOURCE.to_string(), MetaValue::from("hn"));
        metadata.insert("hn_id".to_string(), MetaValue::Int(id as i64));
        metadata.insert(
            "hn_score".to_string(),
            MetaValue::Int(item.score.unwrap_or(0)),
        );
        metadata.insert(
            "hn_descendants".to_string(),
            MetaValue::Int(item.descendants.unwrap_or(0)),
        );
        metadata.insert("hn_timestamp".to_string(), MetaValue::Int(timestamp));
        metadata.insert("hn_url".to_string(), MetaValue::Text(link.clone()));

        Some(Article {
            title,
            authors: vec![author],
            summary,
            link,
            published_date,
            pdf_link: None,
            metadata,
        })
    }
}

#[async_trait]
impl ContentSource for HackerNewsSource {
    fn name(&self) -> &'static str {
        "hn"
    }

    async fn fetch_articles(&self, _search_query: &str, max_results: usize) -> Vec<Article> {
        let story_ids = match self.top_story_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                warn!("error fetching top stories from Hacker News: {}", e);
                return Vec::new();
            }
        };

        let now = Utc::now().timestamp();
        let mut articles = Vec::new();

        for id in story_ids.into_iter().take(max_results * 2) {
            if articles.len() >= max_results {
                break;
            }

            let item = match self.fetch_item(id).await {
                Ok(Some(item)) => item,
                Ok(None) => continue,
                Err(e) => {
                    debug!("skipping HN item {}: {}", id, e);
                    continue;
                }
            };

            let Some(article) = Self::article_from_item(id, item) else {
                continue;
            };

            let published_ts = article
                .metadata
                .get("hn_timestamp")
                .and_then(MetaValue::as_int)
                .unwrap_or(0);
            if self.max_item_age_secs > 0
                && published_ts > 0
                && now - published_ts > self.max_item_age_secs
            {
                debug!("skipping stale HN item {}", id);
                continue;
            }

            articles.push(article);
        }

        articles
    }
}
