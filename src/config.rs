use crate::renderer::OutputMode;
use crate::schema_analyzer::NormalizationConfig;
use std::path::PathBuf;

/// Namespace introspected when none is given
pub const DEFAULT_SCHEMA: &str = "public";
/// Output file name (without extension) when none is given
pub const DEFAULT_OUTPUT_NAME: &str = "schema";

/// Where the raw metadata comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    /// Live database; the connection string is passed through untouched
    Database { url: String },
    /// Previously saved JSON snapshot
    Snapshot { path: PathBuf },
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: MetadataSource,
    /// Namespace to introspect
    pub schema: String,
    pub mode: OutputMode,
    /// Output file name without extension
    pub output_name: String,
    /// Tables left out of the document
    pub exclude_tables: Vec<String>,
    /// Where to save the fetched metadata, if anywhere
    pub save_snapshot: Option<PathBuf>,
    /// Print the document instead of writing it
    pub to_stdout: bool,
}

impl AppConfig {
    pub fn new(source: MetadataSource, mode: OutputMode) -> Self {
        Self {
            source,
            schema: DEFAULT_SCHEMA.to_string(),
            mode,
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            exclude_tables: Vec::new(),
            save_snapshot: None,
            to_stdout: false,
        }
    }

    /// `<output_name>.<txt|html>`
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.output_name, self.mode.extension()))
    }

    pub fn normalization_config(&self) -> NormalizationConfig {
        NormalizationConfig {
            excluded_tables: self.exclude_tables.clone(),
        }
    }
}
