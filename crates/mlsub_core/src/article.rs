use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata key identifying the origin of an article ("arxiv", "hn", ...).
pub const META_SOURCE: &str = "source";
/// Metadata key for the translated title.
pub const META_TITLE_TRANSLATED: &str = "title_translated";
/// Metadata key for the translated summary.
pub const META_SUMMARY_TRANSLATED: &str = "summary_translated";

/// A single metadata value. Untagged so persisted documents carry the
/// natural JSON representation of each kind and round-trip exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl MetaValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            MetaValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Text(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Int(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

/// The canonical content record flowing through the pipeline.
///
/// `link` is the identity of an article: two articles with the same link are
/// the same item no matter what the other fields say. After construction the
/// only mutation is metadata augmentation by the translation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub summary: String,
    pub link: String,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pdf_link: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, MetaValue>,
}

impl Article {
    /// Articles without a title or link never enter the store.
    pub fn is_storable(&self) -> bool {
        !self.title.is_empty() && !self.link.is_empty()
    }

    pub fn source(&self) -> Option<&str> {
        self.metadata.get(META_SOURCE).and_then(MetaValue::as_text)
    }

    pub fn title_translated(&self) -> Option<&str> {
        self.metadata
            .get(META_TITLE_TRANSLATED)
            .and_then(MetaValue::as_text)
    }

    pub fn summary_translated(&self) -> Option<&str> {
        self.metadata
            .get(META_SUMMARY_TRANSLATED)
            .and_then(MetaValue::as_text)
    }

    pub fn set_translated_title(&mut self, text: impl Into<String>) {
        self.metadata
            .insert(META_TITLE_TRANSLATED.to_string(), MetaValue::Text(text.into()));
    }

    pub fn set_translated_summary(&mut self, text: impl Into<String>) {
        self.metadata
            .insert(META_SUMMARY_TRANSLATED.to_string(), MetaValue::Text(text.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        let mut metadata = BTreeMap::new();
        metadata.insert(META_SOURCE.to_string(), MetaValue::from("arxiv"));
        metadata.insert("hn_score".to_string(), MetaValue::Int(42));
        metadata.insert("weight".to_string(), MetaValue::Float(0.5));
        metadata.insert("pinned".to_string(), MetaValue::Bool(true));
        Article {
            title: "Attention Is All You Need".to_string(),
            authors: vec!["Vaswani".to_string(), "Shazeer".to_string()],
            summary: "Transformers.".to_string(),
            link: "https://arxiv.org/abs/1706.03762".to_string(),
            published_date: Some("2017-06-12T00:00:00Z".parse().unwrap()),
            pdf_link: Some("https://arxiv.org/pdf/1706.03762".to_string()),
            metadata,
        }
    }

    #[test]
    fn json_round_trip_preserves_all_fields() {
        let article = sample();
        let json = serde_json::to_string_pretty(&article).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back, article);
    }

    #[test]
    fn metadata_value_kinds_survive_round_trip() {
        let article = sample();
        let json = serde_json::to_string(&article).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back.metadata.get("hn_score"), Some(&MetaValue::Int(42)));
        assert_eq!(back.metadata.get("weight"), Some(&MetaValue::Float(0.5)));
        assert_eq!(back.metadata.get("pinned"), Some(&MetaValue::Bool(true)));
        assert_eq!(back.source(), Some("arxiv"));
    }

    #[test]
    fn storable_requires_title_and_link() {
        let mut article = sample();
        assert!(article.is_storable());
        article.title.clear();
        assert!(!article.is_storable());
        article.title = "t".to_string();
        article.link.clear();
        assert!(!article.is_storable());
    }

    #[test]
    fn translated_fields_land_under_reserved_keys() {
        let mut article = sample();
        assert_eq!(article.title_translated(), None);
        article.set_translated_title("注意力就是一切");
        article.set_translated_summary("变换器。");
        assert_eq!(article.title_translated(), Some("注意力就是一切"));
        assert_eq!(article.summary_translated(), Some("变换器。"));
    }

    #[test]
    fn missing_optional_fields_deserialize_with_defaults() {
        let json = r#"{"title": "T", "link": "https://x"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert!(article.authors.is_empty());
        assert!(article.summary.is_empty());
        assert!(article.published_date.is_none());
        assert!(article.pdf_link.is_none());
        assert!(article.metadata.is_empty());
    }
}
