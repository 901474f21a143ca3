use clap::ValueEnum;
use mlsub_core::Article;

use crate::escape::{escape_html, escape_markdown_v2, sanitize_link};

pub const DEFAULT_SUMMARY_LIMIT: usize = 300;

const ARXIV_HEADING: &str = "✨ New ML/DL Papers Found! ✨";
const HN_HEADING: &str = "🚀 Hacker News 热门讨论";
const GENERIC_HEADING: &str = "📢 New Articles";
const REMINDER: &str = "😴 No new articles this time.";

/// How much of each article a message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Style {
    /// Title, translations, summary, date and link.
    #[default]
    Detailed,
    /// A single linked-title line per article.
    Compact,
}

/// User-facing format selection. Channels map this onto a concrete markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Markdown,
}

/// Concrete markup dialect a channel renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Html,
    MarkdownV2,
    Markdown,
    Plain,
}

impl Markup {
    fn escape(self, text: &str) -> String {
        match self {
            Markup::Html => escape_html(text),
            Markup::MarkdownV2 => escape_markdown_v2(text),
            // Card markdown only needs link syntax defused.
            Markup::Markdown => text.replace('[', "\\[").replace(']', "\\]"),
            Markup::Plain => text.to_string(),
        }
    }
}

/// Turns article batches into channel-ready message blocks.
#[derive(Debug, Clone)]
pub struct MessageRenderer {
    pub style: Style,
    pub markup: Markup,
    pub summary_limit: usize,
}

impl MessageRenderer {
    pub fn new(style: Style, markup: Markup) -> Self {
        Self {
            style,
            markup,
            summary_limit: DEFAULT_SUMMARY_LIMIT,
        }
    }

    /// Heading line for a batch, bolded where the markup supports it.
    pub fn heading(&self, articles: &[Article]) -> String {
        let text = Self::heading_text(articles);
        match self.markup {
            Markup::Html => format!("<b>{}</b>", escape_html(text)),
            Markup::MarkdownV2 => format!("*{}*", escape_markdown_v2(text)),
            Markup::Markdown => format!("**{}**", text),
            Markup::Plain => text.to_string(),
        }
    }

    /// Plain heading, chosen by the batch's source. Used directly for card
    /// headers which take no markup.
    pub fn heading_text(articles: &[Article]) -> &'static str {
        match articles.first().and_then(Article::source) {
            Some("arxiv") => ARXIV_HEADING,
            Some("hn") => HN_HEADING,
            _ => GENERIC_HEADING,
        }
    }

    /// Body sent when a run produced nothing new.
    pub fn reminder(&self) -> String {
        self.markup.escape(REMINDER)
    }

    pub fn render_batch(&self, articles: &[Article]) -> Vec<String> {
        articles.iter().map(|a| self.render_article(a)).collect()
    }

    pub fn render_article(&self, article: &Article) -> String {
        match self.style {
            Style::Compact => self.render_compact(article),
            Style::Detailed => self.render_detailed(article),
        }
    }

    fn render_compact(&self, article: &Article) -> String {
        let mut line = format!("📄 {}", self.linked_title(article));
        if let Some(translated) = article.title_translated() {
            line.push_str(" / ");
            line.push_str(&self.markup.escape(translated));
        }
        if self.markup == Markup::Plain {
            line.push('\n');
            line.push_str(&article.link);
        }
        line
    }

    fn render_detailed(&self, article: &Article) -> String {
        let mut lines = vec![format!("📄 {}", self.bold(&article.title))];
        if let Some(translated) = article.title_translated() {
            lines.push(format!("🌐 {}", self.markup.escape(translated)));
        }
        if !article.summary.is_empty() {
            lines.push(self.markup.escape(&self.truncate(&article.summary)));
        }
        if let Some(translated) = article.summary_translated() {
            lines.push(format!("🌐 {}", self.markup.escape(&self.truncate(translated))));
        }
        if let Some(date) = article.published_date {
            lines.push(format!("🗓 {}", date.format("%Y-%m-%d")));
        }
        lines.push(self.link_line(article));
        lines.join("\n")
    }

    fn bold(&self, text: &str) -> String {
        match self.markup {
            Markup::Html => format!("<b>{}</b>", escape_html(text)),
            Markup::MarkdownV2 => format!("*{}*", escape_markdown_v2(text)),
            Markup::Markdown => format!("**{}**", self.markup.escape(text)),
            Markup::Plain => text.to_string(),
        }
    }

    fn linked_title(&self, article: &Article) -> String {
        let url = sanitize_link(&article.link);
        match self.markup {
            Markup::Html => format!(
                "<b><a href=\"{}\">{}</a></b>",
                url,
                escape_html(&article.title)
            ),
            Markup::MarkdownV2 => {
                format!("[{}]({})", escape_markdown_v2(&article.title), url)
            }
            Markup::Markdown => {
                format!("[**{}**]({})", self.markup.escape(&article.title), url)
            }
            Markup::Plain => article.title.clone(),
        }
    }

    fn link_line(&self, article: &Article) -> String {
        let url = sanitize_link(&article.link);
        match self.markup {
            Markup::Html => format!("🔗 <a href=\"{}\">link</a>", url),
            Markup::MarkdownV2 => format!("🔗 [link]({})", url),
            Markup::Markdown => format!("🔗 [link]({})", url),
            Markup::Plain => format!("🔗 {}", article.link),
        }
    }

    fn truncate(&self, text: &str) -> String {
        if text.chars().count() <= self.summary_limit {
            return text.to_string();
        }
        let mut out: String = text.chars().take(self.summary_limit).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use mlsub_core::{MetaValue, META_SOURCE};

    use super::*;

    fn article(title: &str, link: &str, source: &str) -> Article {
        let mut a = Article {
            title: title.to_string(),
            authors: vec!["Ada Lovelace".to_string()],
            summary: "A short summary.".to_string(),
            link: link.to_string(),
            published_date: None,
            pdf_link: None,
            metadata: Default::default(),
        };
        a.metadata
            .insert(META_SOURCE.to_string(), MetaValue::from(source));
        a
    }

    #[test]
    fn heading_follows_the_batch_source() {
        let arxiv = [article("t", "https://arxiv.org/abs/1", "arxiv")];
        let hn = [article("t", "https://example.com", "hn")];
        assert_eq!(MessageRenderer::heading_text(&arxiv), ARXIV_HEADING);
        assert_eq!(MessageRenderer::heading_text(&hn), HN_HEADING);
        assert_eq!(MessageRenderer::heading_text(&[]), GENERIC_HEADING);
    }

    #[test]
    fn html_titles_are_escaped_inside_the_anchor() {
        let renderer = MessageRenderer::new(Style::Compact, Markup::Html);
        let a = article("<script>alert(1)</script>", "https://example.com/a", "arxiv");
        let rendered = renderer.render_article(&a);
        assert!(rendered.contains("&lt;script&gt;"));
        assert!(!rendered.contains("<script>"));
        assert!(rendered.contains("<a href=\"https://example.com/a\">"));
    }

    #[test]
    fn detailed_includes_translations_and_link() {
        let renderer = MessageRenderer::new(Style::Detailed, Markup::Html);
        let mut a = article("Attention", "https://arxiv.org/abs/1706.03762", "arxiv");
        a.set_translated_title("注意力");
        a.set_translated_summary("摘要");
        let rendered = renderer.render_article(&a);
        assert!(rendered.contains("<b>Attention</b>"));
        assert!(rendered.contains("🌐 注意力"));
        assert!(rendered.contains("🌐 摘要"));
        assert!(rendered.contains("🔗 <a href="));
    }

    #[test]
    fn long_summaries_are_truncated() {
        let mut renderer = MessageRenderer::new(Style::Detailed, Markup::Plain);
        renderer.summary_limit = 10;
        let mut a = article("t", "https://example.com", "arxiv");
        a.summary = "x".repeat(40);
        let rendered = renderer.render_article(&a);
        assert!(rendered.contains(&format!("{}…", "x".repeat(10))));
        assert!(!rendered.contains(&"x".repeat(11)));
    }

    #[test]
    fn markdown_v2_reserved_characters_are_escaped() {
        let renderer = MessageRenderer::new(Style::Compact, Markup::MarkdownV2);
        let a = article("a_b [c]", "https://example.com/x", "arxiv");
        let rendered = renderer.render_article(&a);
        assert!(rendered.contains(r"a\_b \[c\]"));
    }

    #[test]
    fn plain_compact_appends_the_raw_link() {
        let renderer = MessageRenderer::new(Style::Compact, Markup::Plain);
        let a = article("Title", "https://example.com/x", "hn");
        let rendered = renderer.render_article(&a);
        assert!(rendered.ends_with("https://example.com/x"));
    }
}
