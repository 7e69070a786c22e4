pub mod config;
pub mod document;
pub mod error;
pub mod inspector;
pub mod renderer;
pub mod schema_analyzer;
pub mod snapshot;
pub mod types;

pub use document::{render, render_at, render_schema};
pub use error::{SchemaDocError, SchemaDocResult};
pub use renderer::OutputMode;
pub use types::{ColumnRow, EnumRow, Schema};
