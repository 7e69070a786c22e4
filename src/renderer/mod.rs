// Renderer module: turns layout tokens into plain text or HTML markup
pub mod decorated;
pub mod plain;
pub mod theme;
pub mod wrap;


pub use decorated::DecoratedRenderer;
pub use plain::PlainRenderer;
pub use wrap::wrap_words;

use crate::error::SchemaDocError;
use crate::schema_analyzer::{text_width, Segment, Token, TokenKind, INDENT};
use std::fmt;
use std::str::FromStr;

/// Maximum width of a wrapped comment line
pub const MAX_PRINT_WIDTH: usize = 80;
/// Prefix of every comment line
pub const COMMENT_MARKER: &str = "// ";

/// Output mode of the rendered document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Markup-free text
    Plain,
    /// Self-contained HTML document
    Decorated,
}

impl OutputMode {
    /// Extension of the file the document is written to
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Plain => "txt",
            Self::Decorated => "html",
        }
    }

    /// The renderer used for this mode, selected once per run
    pub fn renderer(&self) -> Box<dyn Renderer> {
        match self {
            Self::Plain => Box::new(PlainRenderer),
            Self::Decorated => Box::new(DecoratedRenderer),
        }
    }
}

impl FromStr for OutputMode {
    type Err = SchemaDocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" | "txt" => Ok(Self::Plain),
            "decorated" | "html" => Ok(Self::Decorated),
            _ => Err(SchemaDocError::invalid_output_mode(s)),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("plain"),
            Self::Decorated => f.write_str("decorated"),
        }
    }
}

/// Formats lexical tokens for one output mode.
///
/// Only [`Renderer::token`] and the document framing differ between modes;
/// padding, line assembly and comment wrapping are shared so that both modes
/// align identically once markup is stripped.
pub trait Renderer {
    fn mode(&self) -> OutputMode;

    /// Format a single token
    fn token(&self, token: &Token) -> String;

    /// Text emitted before the header comments
    fn document_open(&self, title: &str) -> String;

    /// Explanatory lines placed after the header comments
    fn legend(&self) -> Vec<String>;

    /// Text emitted after the body
    fn document_close(&self) -> String;

    fn comment(&self, text: &str) -> String {
        self.token(&Token::new(TokenKind::Comment, format!("{COMMENT_MARKER}{text}")))
    }

    /// Tokens followed by the segment's padding
    fn segment(&self, segment: &Segment) -> String {
        let mut out: String = segment.tokens.iter().map(|t| self.token(t)).collect();
        out.push_str(&" ".repeat(segment.padding()));
        out
    }

    fn line(&self, segments: &[Segment]) -> String {
        let mut out = String::new();
        for (i, segment) in segments.iter().enumerate() {
            out.push_str(&self.segment(segment));
            if segment.width.is_none() && i + 1 < segments.len() {
                out.push(' ');
            }
        }
        out
    }

    /// Wrap `text` into comment lines that fit [`MAX_PRINT_WIDTH`] once
    /// indented by `depth` levels
    fn comment_lines(&self, text: &str, depth: usize) -> Vec<String> {
        let indent = INDENT.repeat(depth);
        let available = MAX_PRINT_WIDTH.saturating_sub(text_width(&indent) + text_width(COMMENT_MARKER));
        wrap_words(text, available)
            .iter()
            .map(|segment| format!("{indent}{}", self.comment(segment)))
            .collect()
    }
}
