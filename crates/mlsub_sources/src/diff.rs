//! Pure diff and merge helpers over article batches. Identity is the link
//! alone, never full equality.

use std::collections::{HashMap, HashSet};

use mlsub_core::Article;

/// Collapse duplicate links within a single batch. The first occurrence
/// keeps its position; the last occurrence keeps its value.
pub fn dedup_by_link(articles: Vec<Article>) -> Vec<Article> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<Article> = Vec::with_capacity(articles.len());

    for article in articles {
        match seen.get(&article.link) {
            Some(&i) => out[i] = article,
            None => {
                seen.insert(article.link.clone(), out.len());
                out.push(article);
            }
        }
    }

    out
}

/// Articles in `fetched` whose link is absent from `stored`. A stored
/// article with the same link but an updated body is not new.
pub fn new_articles(stored: &[Article], fetched: &[Article]) -> Vec<Article> {
    let known: HashSet<&str> = stored.iter().map(|a| a.link.as_str()).collect();
    fetched
        .iter()
        .filter(|a| !known.contains(a.link.as_str()))
        .cloned()
        .collect()
}

/// Merge for persistence: stored order first with fetched values winning on
/// a shared link, then genuinely new articles appended in fetch order.
pub fn merge(stored: &[Article], fetched: &[Article]) -> Vec<Article> {
    let mut fresh: HashMap<&str, &Article> =
        fetched.iter().map(|a| (a.link.as_str(), a)).collect();
    let mut out = Vec::with_capacity(stored.len() + fetched.len());

    for article in stored {
        match fresh.remove(article.link.as_str()) {
            Some(updated) => out.push(updated.clone()),
            None => out.push(article.clone()),
        }
    }
    for article in fetched {
        if fresh.remove(article.link.as_str()).is_some() {
            out.push(article.clone());
        }
    }

    out
}
