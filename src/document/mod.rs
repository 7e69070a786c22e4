// Document composition and the pure rendering entry points
pub mod composer;


pub use composer::DocumentComposer;

use crate::renderer::OutputMode;
use crate::schema_analyzer::NormalizationEngine;
use crate::types::{ColumnRow, EnumRow, Schema};
use chrono::{DateTime, Utc};

/// Render the two row sets into a document stamped with the current time
pub fn render(columns: &[ColumnRow], enums: &[EnumRow], mode: OutputMode) -> String {
    render_at(columns, enums, mode, Utc::now())
}

/// Render the two row sets into a document stamped with `generated_at`
pub fn render_at(
    columns: &[ColumnRow],
    enums: &[EnumRow],
    mode: OutputMode,
    generated_at: DateTime<Utc>,
) -> String {
    let schema = NormalizationEngine::new().normalize(columns, enums);
    render_schema(&schema, mode, generated_at)
}

/// Render an already normalized schema
pub fn render_schema(schema: &Schema, mode: OutputMode, generated_at: DateTime<Utc>) -> String {
    let renderer = mode.renderer();
    DocumentComposer::new(renderer.as_ref())
        .generated_at(generated_at)
        .compose(schema)
}
