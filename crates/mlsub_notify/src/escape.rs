/// Escapes the characters Telegram's HTML parse mode treats as markup.
pub fn escape_html(text: &str) -> String {
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

/// Escapes every character MarkdownV2 reserves. Backslash goes first so
/// the escapes themselves survive.
pub fn escape_markdown_v2(text: &str) -> String {
    const RESERVED: &[char] = &[
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    ];
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Percent-encodes link characters that break out of markup attributes or
/// inline link syntax. Already-encoded links pass through unchanged because
/// `%` itself is left alone.
pub fn sanitize_link(link: &str) -> String {
    let mut out = String::with_capacity(link.len());
    for c in link.chars() {
        let needs_encoding = matches!(c, '\'' | '"' | '<' | '>' | '(' | ')' | '\\' | '`' | ' ')
            || c.is_control();
        if needs_encoding {
            out.push_str(&urlencoding::encode(&c.to_string()));
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_entities_are_replaced() {
        assert_eq!(
            escape_html(r#"<b>A & B</b> "quoted" 'single'"#),
            "&lt;b&gt;A &amp; B&lt;/b&gt; &quot;quoted&quot; &#x27;single&#x27;"
        );
    }

    #[test]
    fn html_leaves_plain_text_alone() {
        assert_eq!(escape_html("Attention Is All You Need"), "Attention Is All You Need");
    }

    #[test]
    fn markdown_v2_escapes_reserved_characters() {
        assert_eq!(
            escape_markdown_v2("a_b*c[d](e)!"),
            r"a\_b\*c\[d\]\(e\)\!"
        );
    }

    #[test]
    fn markdown_v2_escapes_backslash_first() {
        assert_eq!(escape_markdown_v2(r"a\_b"), r"a\\\_b");
    }

    #[test]
    fn link_quotes_and_parens_are_encoded() {
        assert_eq!(
            sanitize_link("https://example.com/a(1)'x\" y"),
            "https://example.com/a%281%29%27x%22%20y"
        );
    }

    #[test]
    fn clean_links_pass_through() {
        let link = "https://arxiv.org/abs/2406.01234v1";
        assert_eq!(sanitize_link(link), link);
    }
}
