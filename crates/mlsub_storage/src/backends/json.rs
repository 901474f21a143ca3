use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use mlsub_core::{Article, ArticleStore, Result};
use tracing::{debug, warn};

/// File-backed store persisting one pretty-printed JSON document per feed.
///
/// Saves go through a temp file in the target directory followed by a
/// rename, so a crash mid-write leaves the previous document intact.
#[derive(Debug, Default, Clone)]
pub struct JsonStore;

impl JsonStore {
    pub fn new() -> Self {
        Self
    }

    fn tmp_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl ArticleStore for JsonStore {
    fn load(&self, path: &Path) -> Vec<Article> {
        let payload = match fs::read_to_string(path) {
            Ok(payload) => payload,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no stored articles at {}", path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("failed to read {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&payload) {
            Ok(articles) => articles,
            Err(e) => {
                warn!("failed to parse {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    fn save(&self, path: &Path, articles: &[Article]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let payload = serde_json::to_string_pretty(articles)?;
        // Same directory as the target so the rename never crosses filesystems.
        let tmp = Self::tmp_path(path);
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use mlsub_core::{MetaValue, META_SOURCE};

    use super::*;

    fn sample() -> Vec<Article> {
        let mut metadata = BTreeMap::new();
        metadata.insert(META_SOURCE.to_string(), MetaValue::from("arxiv"));
        metadata.insert("hn_score".to_string(), MetaValue::Int(10));
        metadata.insert("pinned".to_string(), MetaValue::Bool(false));
        vec![Article {
            title: "Title".to_string(),
            authors: vec!["A. Author".to_string()],
            summary: "Summary".to_string(),
            link: "https://example.com/1".to_string(),
            published_date: Some("2024-01-15T12:00:00Z".parse().unwrap()),
            pdf_link: None,
            metadata,
        }]
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.json");
        let store = JsonStore::new();
        let articles = sample();

        store.save(&path, &articles).unwrap();
        assert_eq!(store.load(&path), articles);
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new();
        assert!(store.load(&dir.path().join("absent.json")).is_empty());
    }

    #[test]
    fn unparseable_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(JsonStore::new().load(&path).is_empty());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deep/articles.json");
        JsonStore::new().save(&path, &sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_replaces_previous_document_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.json");
        let store = JsonStore::new();

        store.save(&path, &sample()).unwrap();
        store.save(&path, &[]).unwrap();

        assert!(store.load(&path).is_empty());
        assert!(!JsonStore::tmp_path(&path).exists());
    }
}
