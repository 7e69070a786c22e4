use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of `information_schema.columns.data_type` for user-defined types
pub const USER_DEFINED_TYPE: &str = "USER-DEFINED";

/// One row of column metadata as retrieved from the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRow {
    /// Owning table name
    pub table_name: String,
    /// Column name
    pub column_name: String,
    /// Declared data type (`USER-DEFINED` for enums and other custom types)
    pub data_type: String,
    /// Underlying type name, meaningful when `data_type` is user-defined
    pub udt_name: String,
    /// Default expression, if any
    #[serde(default)]
    pub column_default: Option<String>,
    /// Whether the column accepts NULL
    pub is_nullable: bool,
    /// Referenced table of a foreign key constraint
    #[serde(default)]
    pub foreign_table_name: Option<String>,
    /// Referenced column of a foreign key constraint
    #[serde(default)]
    pub foreign_column_name: Option<String>,
    /// `ON DELETE` rule as reported by the database
    #[serde(default)]
    pub delete_rule: Option<String>,
    /// `ON UPDATE` rule as reported by the database
    #[serde(default)]
    pub update_rule: Option<String>,
}

impl ColumnRow {
    /// Create a non-nullable column row of a built-in type
    pub fn new(table_name: impl Into<String>, column_name: impl Into<String>, data_type: impl Into<String>) -> Self {
        let data_type = data_type.into();
        Self {
            table_name: table_name.into(),
            column_name: column_name.into(),
            udt_name: data_type.clone(),
            data_type,
            column_default: None,
            is_nullable: false,
            foreign_table_name: None,
            foreign_column_name: None,
            delete_rule: None,
            update_rule: None,
        }
    }

    /// Create a column row whose type is the user-defined type `udt_name`
    pub fn user_defined(table_name: impl Into<String>, column_name: impl Into<String>, udt_name: impl Into<String>) -> Self {
        let mut row = Self::new(table_name, column_name, USER_DEFINED_TYPE);
        row.udt_name = udt_name.into();
        row
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.column_default = Some(default.into());
        self
    }

    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.foreign_table_name = Some(table.into());
        self.foreign_column_name = Some(column.into());
        self
    }

    pub fn on_delete(mut self, rule: impl Into<String>) -> Self {
        self.delete_rule = Some(rule.into());
        self
    }

    pub fn on_update(mut self, rule: impl Into<String>) -> Self {
        self.update_rule = Some(rule.into());
        self
    }

    /// Whether the declared type marks this column as user-defined
    pub fn is_user_defined(&self) -> bool {
        self.data_type == USER_DEFINED_TYPE
    }
}

/// One enumerated type with its labels in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumRow {
    pub enum_name: String,
    pub labels: Vec<String>,
}

impl EnumRow {
    pub fn new<I, S>(enum_name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enum_name: enum_name.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }
}

/// Referential action of a foreign key (`ON DELETE` / `ON UPDATE`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferentialAction {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
    /// Anything the database reports that we don't know by name
    Other(String),
}

impl ReferentialAction {
    /// Parse a rule as reported by `information_schema.referential_constraints`.
    /// A missing rule is the no-op default.
    pub fn parse(rule: Option<&str>) -> Self {
        let Some(rule) = rule else {
            return Self::NoAction;
        };
        match rule.trim().to_ascii_uppercase().as_str() {
            "" | "NO ACTION" => Self::NoAction,
            "RESTRICT" => Self::Restrict,
            "CASCADE" => Self::Cascade,
            "SET NULL" => Self::SetNull,
            "SET DEFAULT" => Self::SetDefault,
            _ => Self::Other(rule.trim().to_string()),
        }
    }

    pub fn is_no_op(&self) -> bool {
        matches!(self, Self::NoAction)
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAction => f.write_str("no action"),
            Self::Restrict => f.write_str("restrict"),
            Self::Cascade => f.write_str("cascade"),
            Self::SetNull => f.write_str("set null"),
            Self::SetDefault => f.write_str("set default"),
            Self::Other(rule) => f.write_str(&rule.to_lowercase()),
        }
    }
}

/// Foreign key reference carried by a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: String,
    pub column: String,
    pub on_delete: ReferentialAction,
    pub on_update: ReferentialAction,
}

/// Normalized column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Owning table name
    pub table_name: String,
    /// Column name
    pub name: String,
    /// Type name as displayed (the enum name for user-defined columns)
    pub data_type: String,
    /// Whether `data_type` names a known enum
    pub is_enum: bool,
    pub nullable: bool,
    pub default_value: Option<String>,
    pub foreign_key: Option<ForeignKey>,
}

/// Normalized table with its columns in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

/// Normalized enum type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    /// Labels in declaration order
    pub labels: Vec<String>,
    /// Tables with at least one column of this type, in first-seen order
    pub referenced_by: IndexSet<String>,
}

/// The normalized schema of one namespace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Tables keyed by name, in first-seen order
    pub tables: IndexMap<String, Table>,
    /// Enums keyed by name, in input order
    pub enums: IndexMap<String, EnumType>,
}

impl Schema {
    /// Tables sorted lexicographically by name
    pub fn sorted_tables(&self) -> Vec<&Table> {
        let mut tables: Vec<&Table> = self.tables.values().collect();
        tables.sort_by(|a, b| a.name.cmp(&b.name));
        tables
    }

    /// Enums sorted lexicographically by name
    pub fn sorted_enums(&self) -> Vec<&EnumType> {
        let mut enums: Vec<&EnumType> = self.enums.values().collect();
        enums.sort_by(|a, b| a.name.cmp(&b.name));
        enums
    }

    /// Every column of every table
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.tables.values().flat_map(|t| t.columns.iter())
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn column_count(&self) -> usize {
        self.tables.values().map(|t| t.columns.len()).sum()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }
}
