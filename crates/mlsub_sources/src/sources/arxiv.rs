use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use feed_rs::model::Entry;
use feed_rs::parser;
use mlsub_core::{Article, ContentSource, MetaValue, META_SOURCE};
use reqwest::Client;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Queries the arXiv export API and maps Atom entries to articles.
pub struct ArxivSource {
    client: Client,
    base_url: String,
    days: Option<i64>,
}

impl ArxivSource {
    const BASE_URL: &'static str = "http://export.arxiv.org/api/query";

    /// `days` keeps only entries published within the last N days,
    /// applied client-side after fetching.
    pub fn new(days: Option<i64>) -> Self {
        Self {
            client: Client::new(),
            base_url: Self::BASE_URL.to_string(),
            days,
        }
    }

    fn parse_payload(&self, payload: &str) -> Vec<Article> {
        let feed = match parser::parse(payload.as_bytes()) {
            Ok(feed) => feed,
            Err(e) => {
                warn!("failed to parse arXiv feed: {}", e);
                return Vec::new();
            }
        };

        let mut articles: Vec<Article> = feed
            .entries
            .into_iter()
            .filter_map(Self::article_from_entry)
            .collect();

        if let Some(days) = self.days {
            let cutoff = Utc::now() - chrono::Duration::days(days);
            // Entries without a parseable date fall out of the window.
            articles.retain(|a| a.published_date.map_or(false, |d| d >= cutoff));
        }

        articles
    }

    fn article_from_entry(entry: Entry) -> Option<Article> {
        let title = entry
            .title
            .as_ref()
            .map(|t| normalize_whitespace(&t.content))
            .filter(|t| !t.is_empty());
        let link = Some(entry.id.trim().to_string()).filter(|l| !l.is_empty());

        let (title, link) = match (title, link) {
            (Some(title), Some(link)) => (title, link),
            _ => {
                debug!("skipping arXiv entry with missing title or id");
                return None;
            }
        };

        let summary = entry
            .summary
            .as_ref()
            .map(|s| normalize_whitespace(&s.content))
            .unwrap_or_default();

        let authors = entry
            .authors
            .into_iter()
            .map(|person| person.name)
            .filter(|name| !name.is_empty())
            .collect();

        let pdf_link = entry
            .links
            .iter()
            .find(|l| l.title.as_deref() == Some("pdf"))
            .map(|l| l.href.clone());

        let mut metadata = BTreeMap::new();
        metadata.insert(META_SOURCE.to_string(), MetaValue::from("arxiv"));

        Some(Article {
            title,
            authors,
            summary,
            link,
            published_date: entry.published,
            pdf_link,
            metadata,
        })
    }
}

#[async_trait]
impl ContentSource for ArxivSource {
    fn name(&self) -> &'static str {
        "arxiv"
    }

    async fn fetch_articles(&self, search_query: &str, max_results: usize) -> Vec<Article> {
        let max_results = max_results.to_string();
        let params = [
            ("search_query", search_query),
            ("start", "0"),
            ("max_results", max_results.as_str()),
            ("sortBy", "submittedDate"),
            ("sortOrder", "descending"),
        ];

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .and_then(|r| r.error_for_status());

        let payload = match response {
            Ok(response) => match response.text().await {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("failed to read arXiv response: {}", e);
                    return Vec::new();
                }
            },
            Err(e) => {
                warn!("error fetching data from arXiv: {}", e);
                return Vec::new();
            }
        };

        self.parse_payload(&payload)
    }
}

fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query Results</title>
  <id>http://arxiv.org/api/query</id>
  <updated>2024-01-16T00:00:00Z</updated>
  <entry>
    <id>http://arxiv.org/abs/2401.00001v1</id>
    <title>Deep   Learning
      for  Everything</title>
    <summary>A survey
      of everything.</summary>
    <published>2024-01-15T12:00:00Z</published>
    <author><name>Ada Lovelace</name></author>
    <author><name>Alan Turing</name></author>
    <link href="http://arxiv.org/abs/2401.00001v1" rel="alternate" type="text/html"/>
    <link href="http://arxiv.org/pdf/2401.00001v1" rel="related" type="application/pdf" title="pdf"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2401.00002v1</id>
    <published>2024-01-14T09:00:00Z</published>
  </entry>
</feed>"#;

    #[test]
    fn parses_entries_and_normalizes_whitespace() {
        let source = ArxivSource::new(None);
        let articles = source.parse_payload(FEED);
        assert_eq!(articles.len(), 1);

        let article = &articles[0];
        assert_eq!(article.title, "Deep Learning for Everything");
        assert_eq!(article.summary, "A survey of everything.");
        assert_eq!(article.link, "http://arxiv.org/abs/2401.00001v1");
        assert_eq!(article.authors, vec!["Ada Lovelace", "Alan Turing"]);
        assert_eq!(
            article.pdf_link.as_deref(),
            Some("http://arxiv.org/pdf/2401.00001v1")
        );
        assert_eq!(article.source(), Some("arxiv"));
        assert!(article.published_date.is_some());
    }

    #[test]
    fn entry_without_title_is_skipped() {
        let source = ArxivSource::new(None);
        let articles = source.parse_payload(FEED);
        assert!(articles
            .iter()
            .all(|a| a.link != "http://arxiv.org/abs/2401.00002v1"));
    }

    #[test]
    fn days_filter_drops_old_and_undated_entries() {
        let source = ArxivSource::new(Some(1));
        let articles = source.parse_payload(FEED);
        // The remaining entry was published in 2024, far outside the window.
        assert!(articles.is_empty());
    }

    #[test]
    fn garbage_payload_yields_empty_batch() {
        let source = ArxivSource::new(None);
        assert!(source.parse_payload("not xml at all").is_empty());
    }
}
