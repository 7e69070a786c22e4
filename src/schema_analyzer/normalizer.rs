use crate::types::{Column, ColumnRow, EnumRow, EnumType, ForeignKey, ReferentialAction, Schema, Table};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

/// Configuration for schema normalization
#[derive(Debug, Clone, Default)]
pub struct NormalizationConfig {
    /// Tables whose rows are dropped before normalization
    pub excluded_tables: Vec<String>,
}

/// Reshapes raw column and enum rows into a [`Schema`]
pub struct NormalizationEngine {
    config: NormalizationConfig,
}

impl Default for NormalizationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizationEngine {
    /// Create a new normalization engine with default configuration
    pub fn new() -> Self {
        Self {
            config: NormalizationConfig::default(),
        }
    }

    /// Create a new normalization engine with custom configuration
    pub fn with_config(config: NormalizationConfig) -> Self {
        Self { config }
    }

    /// Build the schema from the two row sets in one pass.
    ///
    /// Tables keep first-seen order and each table's nullable columns are
    /// moved after its non-nullable ones, preserving relative order within
    /// both groups. Referential integrity is not checked.
    pub fn normalize(&self, columns: &[ColumnRow], enums: &[EnumRow]) -> Schema {
        let mut enum_types = Self::collect_enums(enums);
        let mut tables: IndexMap<String, Table> = IndexMap::new();

        for row in columns {
            if self.is_excluded(&row.table_name) {
                continue;
            }

            let column = Self::build_column(row, &mut enum_types);
            tables
                .entry(row.table_name.clone())
                .or_insert_with(|| Table {
                    name: row.table_name.clone(),
                    columns: Vec::new(),
                })
                .columns
                .push(column);
        }

        for table in tables.values_mut() {
            Self::partition_nullable_last(&mut table.columns);
        }

        debug!(
            "Normalized {} tables and {} enums",
            tables.len(),
            enum_types.len()
        );

        Schema {
            tables,
            enums: enum_types,
        }
    }

    fn is_excluded(&self, table_name: &str) -> bool {
        self.config.excluded_tables.iter().any(|t| t == table_name)
    }

    fn collect_enums(rows: &[EnumRow]) -> IndexMap<String, EnumType> {
        let mut enums = IndexMap::new();
        for row in rows {
            if enums.contains_key(&row.enum_name) {
                warn!("Duplicate enum '{}' ignored", row.enum_name);
                continue;
            }
            enums.insert(
                row.enum_name.clone(),
                EnumType {
                    name: row.enum_name.clone(),
                    labels: row.labels.clone(),
                    referenced_by: IndexSet::new(),
                },
            );
        }
        enums
    }

    fn build_column(row: &ColumnRow, enums: &mut IndexMap<String, EnumType>) -> Column {
        let mut is_enum = false;
        let data_type = if row.is_user_defined() {
            match enums.get_mut(&row.udt_name) {
                Some(enum_type) => {
                    enum_type.referenced_by.insert(row.table_name.clone());
                    is_enum = true;
                }
                None => debug!(
                    "Column {}.{} uses unknown user-defined type '{}'",
                    row.table_name, row.column_name, row.udt_name
                ),
            }
            row.udt_name.clone()
        } else {
            row.data_type.clone()
        };

        let foreign_key = match (&row.foreign_table_name, &row.foreign_column_name) {
            (Some(table), Some(column)) => Some(ForeignKey {
                table: table.clone(),
                column: column.clone(),
                on_delete: ReferentialAction::parse(row.delete_rule.as_deref()),
                on_update: ReferentialAction::parse(row.update_rule.as_deref()),
            }),
            _ => None,
        };

        Column {
            table_name: row.table_name.clone(),
            name: row.column_name.clone(),
            data_type,
            is_enum,
            nullable: row.is_nullable,
            default_value: row.column_default.clone(),
            foreign_key,
        }
    }

    /// Stable partition: non-nullable columns first
    fn partition_nullable_last(columns: &mut Vec<Column>) {
        let (required, nullable): (Vec<Column>, Vec<Column>) =
            columns.drain(..).partition(|c| !c.nullable);
        columns.extend(required);
        columns.extend(nullable);
    }
}
