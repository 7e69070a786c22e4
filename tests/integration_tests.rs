use anyhow::Result;
use schemadoc::inspector::{self, SchemaInspector};
use schemadoc::schema_analyzer::NormalizationEngine;
use schemadoc::{render, ColumnRow, EnumRow, OutputMode};
use tokio_postgres::Client;

/// Test fixture owning a throwaway schema in the test database.
///
/// Each test uses its own schema name so tests can run in parallel.
/// Tests are skipped when `TEST_DATABASE_URL` is not set.
struct TestDatabase {
    client: Client,
    schema: String,
}

impl TestDatabase {
    async fn connect(schema: &str) -> Result<Option<Self>> {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            println!("TEST_DATABASE_URL not set - skipping PostgreSQL integration test");
            return Ok(None);
        };

        let client = inspector::connect(&url).await?;
        let db = Self {
            client,
            schema: schema.to_string(),
        };
        db.setup().await?;
        Ok(Some(db))
    }

    async fn setup(&self) -> Result<()> {
        let ddl = format!(
            r#"
            DROP SCHEMA IF EXISTS {schema} CASCADE;
            CREATE SCHEMA {schema};
            CREATE TYPE {schema}.order_state AS ENUM ('open', 'paid', 'shipped');
            CREATE TYPE {schema}.unused_kind AS ENUM ('a', 'b');
            CREATE TABLE {schema}.customers (
                id serial PRIMARY KEY,
                nickname text,
                email text NOT NULL
            );
            CREATE TABLE {schema}.orders (
                id serial PRIMARY KEY,
                note text,
                customer_id integer NOT NULL REFERENCES {schema}.customers (id) ON DELETE CASCADE,
                state {schema}.order_state NOT NULL DEFAULT 'open'
            );
            CREATE TABLE {schema}.warehouses (
                region text,
                code text,
                PRIMARY KEY (region, code)
            );
            CREATE TABLE {schema}.shipments (
                id serial PRIMARY KEY,
                wh_code text,
                wh_region text,
                FOREIGN KEY (wh_code, wh_region) REFERENCES {schema}.warehouses (code, region)
            );
            CREATE VIEW {schema}.order_view AS SELECT id FROM {schema}.orders;
            "#,
            schema = self.schema
        );
        self.client.batch_execute(&ddl).await?;
        Ok(())
    }

    async fn teardown(&self) -> Result<()> {
        self.client
            .batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
            .await?;
        Ok(())
    }

    async fn fetch_rows(&self) -> Result<(Vec<ColumnRow>, Vec<EnumRow>)> {
        let inspector = SchemaInspector::new(&self.client, self.schema.as_str());
        let columns = inspector.fetch_columns().await?;
        let enums = inspector.fetch_enums().await?;
        Ok((columns, enums))
    }
}

fn find_column<'a>(columns: &'a [ColumnRow], table: &str, column: &str) -> &'a ColumnRow {
    columns
        .iter()
        .find(|c| c.table_name == table && c.column_name == column)
        .unwrap_or_else(|| panic!("{}.{} column", table, column))
}

#[tokio::test]
async fn test_fetch_and_render_live_schema() -> Result<()> {
    let Some(db) = TestDatabase::connect("schemadoc_it_render").await? else {
        return Ok(());
    };

    // schema is dropped before any assertion can fail
    let fetched = db.fetch_rows().await;
    db.teardown().await?;
    let (columns, enums) = fetched?;

    // views are not base tables
    assert!(columns.iter().all(|c| c.table_name != "order_view"));
    assert_eq!(columns.len(), 12);

    let state = enums.iter().find(|e| e.enum_name == "order_state").expect("order_state enum");
    assert_eq!(state.labels, vec!["open", "paid", "shipped"]);
    assert_eq!(enums.len(), 2);

    let customer_id = find_column(&columns, "orders", "customer_id");
    assert_eq!(customer_id.foreign_table_name.as_deref(), Some("customers"));
    assert_eq!(customer_id.foreign_column_name.as_deref(), Some("id"));
    assert_eq!(customer_id.delete_rule.as_deref(), Some("CASCADE"));
    assert!(!customer_id.is_nullable);

    let schema = NormalizationEngine::new().normalize(&columns, &enums);
    let referrers: Vec<&str> = schema.enums["order_state"]
        .referenced_by
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(referrers, vec!["orders"]);

    let output = render(&columns, &enums, OutputMode::Plain);
    assert!(output.contains("enum order_state {"));
    assert!(output.contains("// Referenced by: orders"));
    assert!(output.contains("// Not referenced by any table"));
    assert!(output.contains("references customers(id) on delete cascade"));
    assert!(output.contains("default 'open'::"));
    assert!(output.find("table customers {") < output.find("table orders {"));

    Ok(())
}

#[tokio::test]
async fn test_composite_foreign_key_pairs_columns_by_position() -> Result<()> {
    let Some(db) = TestDatabase::connect("schemadoc_it_composite").await? else {
        return Ok(());
    };

    let fetched = db.fetch_rows().await;
    db.teardown().await?;
    let (columns, _) = fetched?;

    let wh_code = find_column(&columns, "shipments", "wh_code");
    assert_eq!(wh_code.foreign_table_name.as_deref(), Some("warehouses"));
    assert_eq!(wh_code.foreign_column_name.as_deref(), Some("code"));

    let wh_region = find_column(&columns, "shipments", "wh_region");
    assert_eq!(wh_region.foreign_table_name.as_deref(), Some("warehouses"));
    assert_eq!(wh_region.foreign_column_name.as_deref(), Some("region"));

    let output = render(&columns, &[], OutputMode::Plain);
    assert!(output.lines().any(|l| l.contains("wh_code?") && l.ends_with("references warehouses(code)")));
    assert!(output.lines().any(|l| l.contains("wh_region?") && l.ends_with("references warehouses(region)")));

    Ok(())
}
