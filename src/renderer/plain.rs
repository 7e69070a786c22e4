use super::{OutputMode, Renderer, COMMENT_MARKER};
use crate::schema_analyzer::{Token, NULLABLE_MARKER};

/// Emits tokens verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn mode(&self) -> OutputMode {
        OutputMode::Plain
    }

    fn token(&self, token: &Token) -> String {
        token.text.clone()
    }

    fn document_open(&self, _title: &str) -> String {
        String::new()
    }

    fn legend(&self) -> Vec<String> {
        vec![format!(
            "{COMMENT_MARKER}A \"{NULLABLE_MARKER}\" after a column name marks the column as nullable"
        )]
    }

    fn document_close(&self) -> String {
        String::new()
    }
}
