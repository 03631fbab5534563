#![cfg(feature = "sqlite")]

/// Integration tests for the SQLite datasource
use pretty_assertions::assert_eq;
use sqlds_core::{FieldMode, SqlDatasource, TableTarget};
use sqlds_drivers::SqliteDatasource;
use sqlds_schema::{ColumnIcon, classify_columns};
use tempfile::NamedTempFile;

/// Helper to create a test database with sample tables
fn setup_test_database() -> (NamedTempFile, SqliteDatasource) {
    let file = NamedTempFile::new().expect("Failed to create temp file");
    let ds = SqliteDatasource::open(file.path().to_str().unwrap())
        .expect("Failed to open test database");

    ds.execute_batch(
        r#"
        CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username STRING NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            is_active boolean DEFAULT 1,
            bio TEXT,
            avatar BLOB,
            extra
        );
        CREATE TABLE orders (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            total NUMERIC NOT NULL
        );
        CREATE VIEW active_users AS SELECT id, username FROM users WHERE is_active = 1;
        "#,
    )
    .expect("Failed to setup schema");

    (file, ds)
}

#[tokio::test]
async fn test_fields_in_declaration_order() {
    let (_file, ds) = setup_test_database();
    let users = TableTarget::new("users");

    let fields = ds.fields(&users, false).await.unwrap();
    assert_eq!(
        fields,
        vec!["id", "username", "created_at", "is_active", "bio", "avatar", "extra"]
    );

    let orderable = ds.fields(&users, true).await.unwrap();
    assert!(!orderable.contains(&"avatar".to_string()));
    assert_eq!(orderable.len(), 6);
}

#[tokio::test]
async fn test_table_schema_types_and_modes() {
    let (_file, ds) = setup_test_database();
    let schema = ds
        .table_schema(&TableTarget::new("users").with_dataset("main"))
        .await
        .unwrap();
    let fields = schema.fields().expect("schema should be described");

    let is_active = fields.iter().find(|f| f.name == "is_active").unwrap();
    assert_eq!(is_active.data_type.as_deref(), Some("BOOLEAN"));

    let username = fields.iter().find(|f| f.name == "username").unwrap();
    assert_eq!(username.mode, Some(FieldMode::Required));

    let extra = fields.iter().find(|f| f.name == "extra").unwrap();
    assert!(extra.data_type.is_none());
}

#[tokio::test]
async fn test_missing_table_has_no_descriptor() {
    let (_file, ds) = setup_test_database();
    let target = TableTarget::new("does_not_exist");
    assert!(ds.fields(&target, false).await.unwrap().is_empty());
    assert!(ds.table_schema(&target).await.unwrap().fields().is_none());
}

#[tokio::test]
async fn test_classify_sqlite_columns() {
    let (_file, ds) = setup_test_database();
    let users = TableTarget::new("users");
    let fields = ds.fields(&users, false).await.unwrap();
    let schema = ds.table_schema(&users).await.unwrap();

    let classified = classify_columns(&fields, Some(&schema));
    let summary: Vec<(&str, Option<ColumnIcon>)> = classified
        .iter()
        .map(|c| (c.value.as_str(), c.icon))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("id", Some(ColumnIcon::CalculatorAlt)),
            ("username", Some(ColumnIcon::Text)),
            ("created_at", Some(ColumnIcon::ClockNine)),
            ("is_active", Some(ColumnIcon::ToggleOff)),
            ("bio", None),
            ("avatar", None),
        ]
    );
}

#[tokio::test]
async fn test_lookup_lists_tables_and_views() {
    let (_file, ds) = setup_test_database();
    let items = ds.lookup(None).await.unwrap();
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["active_users", "orders", "users"]);
    assert_eq!(items[1].completion.as_deref(), Some("main.orders"));

    let datasets = ds.datasets().await.unwrap();
    assert!(datasets.contains(&"main".to_string()));
}

#[test]
fn test_open_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.db");
    assert!(SqliteDatasource::open(path.to_str().unwrap()).is_err());
}
