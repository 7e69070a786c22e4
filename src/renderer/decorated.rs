use super::theme::{STYLESHEET, THEME_TOGGLE_SCRIPT};
use super::{OutputMode, Renderer};
use crate::schema_analyzer::{Token, TokenKind};

/// Wraps tokens in `<span>` elements carrying a semantic class
#[derive(Debug, Clone, Copy, Default)]
pub struct DecoratedRenderer;

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl Renderer for DecoratedRenderer {
    fn mode(&self) -> OutputMode {
        OutputMode::Decorated
    }

    fn token(&self, token: &Token) -> String {
        let text = escape_html(&token.text);
        if token.kind == TokenKind::Text {
            return text;
        }
        match &token.title {
            Some(title) => format!(
                "<span class=\"{}\" title=\"{}\">{}</span>",
                token.kind.class_name(),
                escape_html(title),
                text
            ),
            None => format!("<span class=\"{}\">{}</span>", token.kind.class_name(), text),
        }
    }

    fn document_open(&self, title: &str) -> String {
        let mut doc = String::new();
        doc.push_str("<!DOCTYPE html>\n");
        doc.push_str("<html lang=\"en\" data-theme=\"light\">\n");
        doc.push_str("<head>\n");
        doc.push_str("<meta charset=\"utf-8\">\n");
        doc.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        doc.push_str(&format!("<style>\n{}</style>\n", STYLESHEET));
        doc.push_str("</head>\n");
        doc.push_str("<body>\n");
        doc.push_str("<pre class=\"schema\">\n");
        doc
    }

    fn legend(&self) -> Vec<String> {
        Vec::new()
    }

    fn document_close(&self) -> String {
        let mut doc = String::new();
        doc.push_str("</pre>\n");
        doc.push_str("<button id=\"theme-toggle\" type=\"button\" title=\"Toggle light/dark theme\">Toggle theme</button>\n");
        doc.push_str(&format!("<script>\n{}</script>\n", THEME_TOGGLE_SCRIPT));
        doc.push_str("</body>\n");
        doc.push_str("</html>\n");
        doc
    }
}
