use crate::error::{SchemaDocError, SchemaDocResult};
use crate::types::{ColumnRow, EnumRow};
use tokio_postgres::{Client, NoTls, Row};
use tracing::{debug, error, info};

// information_schema exposes domain types; everything is cast to text so
// the client can decode it as String.
const COLUMNS_QUERY: &str = r#"
SELECT
    c.table_name::text AS table_name,
    c.column_name::text AS column_name,
    c.data_type::text AS data_type,
    c.udt_name::text AS udt_name,
    c.column_default::text AS column_default,
    c.is_nullable = 'YES' AS is_nullable,
    fk.foreign_table_name,
    fk.foreign_column_name,
    fk.delete_rule,
    fk.update_rule
FROM information_schema.columns AS c
JOIN information_schema.tables AS t
    ON t.table_schema = c.table_schema
    AND t.table_name = c.table_name
    AND t.table_type = 'BASE TABLE'
LEFT JOIN LATERAL (
    SELECT
        ref.table_name::text AS foreign_table_name,
        ref.column_name::text AS foreign_column_name,
        rc.delete_rule::text AS delete_rule,
        rc.update_rule::text AS update_rule
    FROM information_schema.key_column_usage AS kcu
    JOIN information_schema.referential_constraints AS rc
        ON rc.constraint_schema = kcu.constraint_schema
        AND rc.constraint_name = kcu.constraint_name
    -- composite keys pair columns by position in the referenced key
    JOIN information_schema.key_column_usage AS ref
        ON ref.constraint_schema = rc.unique_constraint_schema
        AND ref.constraint_name = rc.unique_constraint_name
        AND ref.ordinal_position = kcu.position_in_unique_constraint
    WHERE kcu.table_schema = c.table_schema
        AND kcu.table_name = c.table_name
        AND kcu.column_name = c.column_name
    ORDER BY kcu.constraint_name
    LIMIT 1
) AS fk ON true
WHERE c.table_schema::text = $1
ORDER BY c.table_name, c.ordinal_position
"#;

const ENUMS_QUERY: &str = r#"
SELECT
    t.typname::text AS enum_name,
    array_agg(e.enumlabel::text ORDER BY e.enumsortorder) AS labels
FROM pg_catalog.pg_type AS t
JOIN pg_catalog.pg_enum AS e ON e.enumtypid = t.oid
JOIN pg_catalog.pg_namespace AS n ON n.oid = t.typnamespace
WHERE n.nspname::text = $1
GROUP BY t.typname
ORDER BY t.typname
"#;

/// Open a connection and drive it on the tokio runtime
pub async fn connect(database_url: &str) -> SchemaDocResult<Client> {
    let (client, connection) = tokio_postgres::connect(database_url, NoTls)
        .await
        .map_err(|e| SchemaDocError::introspection(format!("failed to connect: {}", e)))?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            error!("Database connection error: {}", e);
        }
    });

    Ok(client)
}

/// Reads column and enum metadata of one namespace
pub struct SchemaInspector<'a> {
    client: &'a Client,
    schema: String,
}

impl<'a> SchemaInspector<'a> {
    pub fn new(client: &'a Client, schema: impl Into<String>) -> Self {
        Self {
            client,
            schema: schema.into(),
        }
    }

    /// One row per (table, column) of every base table in the namespace
    pub async fn fetch_columns(&self) -> SchemaDocResult<Vec<ColumnRow>> {
        debug!("Fetching columns of schema '{}'", self.schema);
        let rows = self.client.query(COLUMNS_QUERY, &[&self.schema]).await?;
        let columns = rows
            .iter()
            .map(column_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        info!("Fetched {} columns", columns.len());
        Ok(columns)
    }

    /// One row per enum type in the namespace, labels in declaration order
    pub async fn fetch_enums(&self) -> SchemaDocResult<Vec<EnumRow>> {
        debug!("Fetching enums of schema '{}'", self.schema);
        let rows = self.client.query(ENUMS_QUERY, &[&self.schema]).await?;
        let enums = rows
            .iter()
            .map(enum_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        info!("Fetched {} enums", enums.len());
        Ok(enums)
    }
}

fn column_from_row(row: &Row) -> Result<ColumnRow, tokio_postgres::Error> {
    Ok(ColumnRow {
        table_name: row.try_get("table_name")?,
        column_name: row.try_get("column_name")?,
        data_type: row.try_get("data_type")?,
        udt_name: row.try_get("udt_name")?,
        column_default: row.try_get("column_default")?,
        is_nullable: row.try_get("is_nullable")?,
        foreign_table_name: row.try_get("foreign_table_name")?,
        foreign_column_name: row.try_get("foreign_column_name")?,
        delete_rule: row.try_get("delete_rule")?,
        update_rule: row.try_get("update_rule")?,
    })
}

fn enum_from_row(row: &Row) -> Result<EnumRow, tokio_postgres::Error> {
    Ok(EnumRow {
        enum_name: row.try_get("enum_name")?,
        labels: row.try_get("labels")?,
    })
}
