use std::fs;
use std::path::Path;

use mlsub_core::{Article, Result};
use tracing::info;

/// Renders a stored article set as a standalone HTML page.
#[derive(Debug, Default, Clone)]
pub struct ArticleVisualizer;

impl ArticleVisualizer {
    pub fn generate_html(&self, articles: &[Article], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, render_page(articles))?;
        info!("📊 wrote {} article(s) to {}", articles.len(), path.display());
        Ok(())
    }
}

fn render_page(articles: &[Article]) -> String {
    let mut html = String::from(
        "<html><head><meta charset=\"utf-8\"><title>ML/DL Articles</title></head><body>",
    );
    html.push_str("<h1>ML/DL Articles</h1>");
    for article in articles {
        html.push_str(&format!("<h2>{}</h2>", escape(&article.title)));
        let authors = if article.authors.is_empty() {
            "Unknown".to_string()
        } else {
            escape(&article.authors.join(", "))
        };
        html.push_str(&format!("<p><strong>Authors:</strong> {}</p>", authors));
        html.push_str(&format!("<p>{}</p>", escape(&article.summary)));
        if let Some(pdf_link) = &article.pdf_link {
            html.push_str(&format!(
                "<p><a href=\"{}\">Read More</a></p>",
                escape(pdf_link)
            ));
        }
        html.push_str("<hr>");
    }
    html.push_str("</body></html>");
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

pub mod prelude {
    pub use crate::ArticleVisualizer;
}
