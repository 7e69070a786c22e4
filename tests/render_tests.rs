use chrono::{DateTime, TimeZone, Utc};
use schemadoc::config::{AppConfig, MetadataSource};
use schemadoc::snapshot::MetadataSnapshot;
use schemadoc::{render, render_at, ColumnRow, EnumRow, OutputMode, SchemaDocError};
use std::path::PathBuf;
use tempfile::TempDir;

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
}

/// Lines between `header` and the closing brace of its block
fn block_lines<'a>(output: &'a str, header: &str) -> Vec<&'a str> {
    output
        .lines()
        .skip_while(|l| *l != header)
        .skip(1)
        .take_while(|l| *l != "}")
        .collect()
}

fn create_shop_columns() -> Vec<ColumnRow> {
    vec![
        ColumnRow::new("customers", "id", "bigint").with_default("nextval('customers_id_seq'::regclass)"),
        ColumnRow::new("customers", "display_name", "character varying").nullable(),
        ColumnRow::new("customers", "created_at", "timestamp with time zone").with_default("now()"),
        ColumnRow::new("orders", "id", "bigint"),
        ColumnRow::new("orders", "customer_id", "bigint")
            .references("customers", "id")
            .on_delete("RESTRICT")
            .on_update("CASCADE"),
        ColumnRow::new("orders", "coupon_id", "bigint").nullable().references("coupons", "id"),
        ColumnRow::user_defined("orders", "state", "order_state"),
        ColumnRow::new("coupons", "id", "bigint"),
        ColumnRow::new("coupons", "code", "text"),
    ]
}

#[test]
fn test_users_round_trip_scenario() {
    let columns = vec![
        ColumnRow::new("users", "id", "integer"),
        ColumnRow::new("users", "email", "text").nullable(),
    ];
    let output = render(&columns, &[], OutputMode::Plain);

    let lines = block_lines(&output, "table users {");
    assert_eq!(lines.len(), 2);
    assert!(lines[0].trim_start().starts_with("id "));
    assert!(!lines[0].contains('?'));
    assert!(lines[1].trim_start().starts_with("email? "));
}

#[test]
fn test_enum_scenario() {
    let columns = vec![ColumnRow::user_defined("orders", "status", "status")];
    let enums = vec![EnumRow::new("status", ["active", "inactive"])];
    let output = render_at(&columns, &enums, OutputMode::Plain, fixed_time());

    let lines = block_lines(&output, "enum status {");
    assert_eq!(lines, vec!["  // Referenced by: orders", "  active", "  inactive"]);
}

#[test]
fn test_quoted_table_name_keeps_inner_spaces() {
    let columns = vec![ColumnRow::user_defined("my  table", "status", "status")];
    let enums = vec![EnumRow::new("status", ["active"])];
    let output = render_at(&columns, &enums, OutputMode::Plain, fixed_time());

    assert!(output.contains("table my  table {"));
    let lines = block_lines(&output, "enum status {");
    assert_eq!(lines[0], "  // Referenced by: my  table");
}

#[test]
fn test_each_table_appears_once_sorted() {
    let output = render_at(&create_shop_columns(), &[], OutputMode::Plain, fixed_time());

    let tables: Vec<&str> = output.lines().filter(|l| l.starts_with("table ")).collect();
    assert_eq!(tables, vec!["table coupons {", "table customers {", "table orders {"]);
}

#[test]
fn test_nullable_columns_print_last() {
    let output = render_at(&create_shop_columns(), &[], OutputMode::Plain, fixed_time());

    let names: Vec<&str> = block_lines(&output, "table orders {")
        .iter()
        .map(|l| l.split_whitespace().next().unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["id", "customer_id", "state", "coupon_id?"]);
}

#[test]
fn test_columns_align_across_tables() {
    let output = render_at(&create_shop_columns(), &[], OutputMode::Plain, fixed_time());

    // the longest name is "display_name?" (13) and the longest type
    // "timestamp with time zone" (24)
    let type_column = 2 + 13 + 2;
    let default_column = type_column + 24 + 2;

    let column_lines: Vec<&str> = ["table coupons {", "table customers {", "table orders {"]
        .iter()
        .flat_map(|h| block_lines(&output, h))
        .collect();
    assert_eq!(column_lines.len(), 9);

    for line in &column_lines {
        assert!(line.len() >= default_column, "line too short: {:?}", line);
        assert_eq!(&line[type_column - 2..type_column], "  ", "misaligned: {:?}", line);
        assert_ne!(&line[type_column..type_column + 1], " ", "misaligned: {:?}", line);
        assert_eq!(&line[default_column - 2..default_column], "  ", "misaligned: {:?}", line);
    }

    let created_at = column_lines
        .iter()
        .find(|l| l.trim_start().starts_with("created_at"))
        .expect("created_at line");
    assert_eq!(&created_at[default_column..default_column + 13], "default now()");
}

#[test]
fn test_foreign_key_clauses() {
    let output = render_at(&create_shop_columns(), &[], OutputMode::Plain, fixed_time());
    let lines = block_lines(&output, "table orders {");

    let customer = lines.iter().find(|l| l.contains("customer_id")).expect("customer_id line");
    assert!(customer.ends_with("references customers(id) on delete restrict on update cascade"));

    let coupon = lines.iter().find(|l| l.contains("coupon_id")).expect("coupon_id line");
    assert!(coupon.ends_with("references coupons(id)"));

    let state = lines.iter().find(|l| l.contains("state")).expect("state line");
    assert!(!state.contains("references"));
}

#[test]
fn test_unknown_enum_reference_is_not_fatal() {
    let output = render_at(&create_shop_columns(), &[], OutputMode::Decorated, fixed_time());
    assert!(output.contains("<span class=\"data-type\">order_state</span>"));
}

#[test]
fn test_invalid_output_mode() {
    let result: Result<OutputMode, SchemaDocError> = "pdf".parse();
    assert!(matches!(result, Err(SchemaDocError::InvalidOutputMode { .. })));
}

#[test]
fn test_snapshot_round_trip_renders_identically() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("meta.json");

    let enums = vec![EnumRow::new("order_state", ["open", "paid", "shipped"])];
    let snapshot = MetadataSnapshot::new(create_shop_columns(), enums);
    snapshot.save(&path).unwrap();

    let loaded = MetadataSnapshot::load(&path).unwrap();
    assert_eq!(loaded, snapshot);

    let before = render_at(&snapshot.columns, &snapshot.enums, OutputMode::Plain, fixed_time());
    let after = render_at(&loaded.columns, &loaded.enums, OutputMode::Plain, fixed_time());
    assert_eq!(before, after);
}

#[test]
fn test_snapshot_optional_fields_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("minimal.json");
    std::fs::write(
        &path,
        r#"{"columns": [{"table_name": "t", "column_name": "c", "data_type": "text", "udt_name": "text", "is_nullable": true}]}"#,
    )
    .unwrap();

    let snapshot = MetadataSnapshot::load(&path).unwrap();
    assert_eq!(snapshot.columns, vec![ColumnRow::new("t", "c", "text").nullable()]);
    assert!(snapshot.enums.is_empty());
}

#[test]
fn test_missing_snapshot_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = MetadataSnapshot::load(temp_dir.path().join("absent.json"));
    assert!(matches!(result, Err(SchemaDocError::Snapshot { .. })));
}

#[test]
fn test_output_path_extension_follows_mode() {
    let source = MetadataSource::Database {
        url: "postgresql://localhost/db".to_string(),
    };

    let mut config = AppConfig::new(source, OutputMode::Plain);
    assert_eq!(config.output_path(), PathBuf::from("schema.txt"));

    config.output_name = "billing".to_string();
    config.mode = OutputMode::Decorated;
    assert_eq!(config.output_path(), PathBuf::from("billing.html"));
    assert_eq!(config.schema, "public");
}
