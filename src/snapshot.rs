use crate::error::{SchemaDocError, SchemaDocResult};
use crate::types::{ColumnRow, EnumRow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Raw metadata captured from a database, renderable without a connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    #[serde(default)]
    pub columns: Vec<ColumnRow>,
    #[serde(default)]
    pub enums: Vec<EnumRow>,
}

impl MetadataSnapshot {
    pub fn new(columns: Vec<ColumnRow>, enums: Vec<EnumRow>) -> Self {
        Self { columns, enums }
    }

    pub fn load(path: impl AsRef<Path>) -> SchemaDocResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaDocError::snapshot(format!("cannot read {}: {}", path.display(), e))
        })?;
        let snapshot: Self = serde_json::from_str(&content)?;
        info!(
            "Loaded snapshot {} ({} columns, {} enums)",
            path.display(),
            snapshot.columns.len(),
            snapshot.enums.len()
        );
        Ok(snapshot)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> SchemaDocResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Snapshot written to {}", path.display());
        Ok(())
    }
}
