use crate::renderer::Renderer;
use crate::schema_analyzer::{Block, LayoutEngine, Line, INDENT};
use crate::types::Schema;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

/// Title of decorated documents
const DEFAULT_TITLE: &str = "Database schema";

/// Assembles header, sorted blocks and footer into one document
pub struct DocumentComposer<'a> {
    renderer: &'a dyn Renderer,
    generated_at: DateTime<Utc>,
    title: String,
}

impl<'a> DocumentComposer<'a> {
    /// Create a composer stamped with the current time
    pub fn new(renderer: &'a dyn Renderer) -> Self {
        Self {
            renderer,
            generated_at: Utc::now(),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Render the complete document
    pub fn compose(&self, schema: &Schema) -> String {
        let mut doc = String::new();
        doc.push_str(&self.renderer.document_open(&self.title));
        doc.push_str(&self.header());
        doc.push_str(&self.body(schema));
        doc.push_str(&self.renderer.document_close());
        doc
    }

    /// Timestamp and attribution comments, the renderer's legend and a
    /// blank separator line
    pub fn header(&self) -> String {
        let mut header = String::new();
        let timestamp = self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        header.push_str(&self.renderer.comment(&format!("Generated at {}", timestamp)));
        header.push('\n');
        header.push_str(&self.renderer.comment(&format!(
            "Generated by {} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )));
        header.push('\n');
        for line in self.renderer.legend() {
            header.push_str(&line);
            header.push('\n');
        }
        header.push('\n');
        header
    }

    /// Enums then tables, each group sorted by name, separated by blank lines
    pub fn body(&self, schema: &Schema) -> String {
        let engine = LayoutEngine::new(schema);
        debug!("Layout metrics: {:?}", engine.metrics());

        let blocks: Vec<Block> = schema
            .sorted_enums()
            .into_iter()
            .map(|e| engine.enum_block(e))
            .chain(schema.sorted_tables().into_iter().map(|t| engine.table_block(t)))
            .collect();

        blocks
            .iter()
            .map(|block| self.block(block))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn block(&self, block: &Block) -> String {
        let mut out = String::new();
        out.push_str(&self.renderer.line(&block.header));
        out.push('\n');

        for line in &block.lines {
            match line {
                Line::Segments(segments) => {
                    out.push_str(INDENT);
                    out.push_str(&self.renderer.line(segments));
                    out.push('\n');
                }
                Line::Comment(text) => {
                    for comment in self.renderer.comment_lines(text, 1) {
                        out.push_str(&comment);
                        out.push('\n');
                    }
                }
            }
        }

        out.push_str(&self.renderer.line(&block.footer));
        out.push('\n');
        out
    }
}
