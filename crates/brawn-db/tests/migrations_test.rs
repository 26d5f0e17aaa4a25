//! Integration tests for database migrations and connection pooling.
//!
//! Each test works against its own SQLite file in a temporary directory, so
//! tests are fully isolated and idempotent.

use sqlx::Row;

use brawn_db::pool;
use brawn_test_utils::{create_test_db, empty_db_config};

/// Expected tables created by the initial migration.
const EXPECTED_TABLES: &[&str] = &["training_programs", "workout_components", "workouts"];

#[tokio::test]
async fn migrations_create_all_tables() {
    let db = create_test_db().await;

    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
         ORDER BY name",
    )
    .fetch_all(&db.pool)
    .await
    .expect("should list tables");

    let user_tables: Vec<&str> = rows
        .iter()
        .map(|(name,)| name.as_str())
        .filter(|t| !t.starts_with("_sqlx"))
        .collect();

    assert_eq!(
        user_tables, EXPECTED_TABLES,
        "migration should create exactly the expected tables"
    );

    db.close().await;
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = create_test_db().await;

    // create_test_db already ran them once; a second run is a no-op.
    pool::run_migrations(&db.pool)
        .await
        .expect("second migration run should succeed (idempotent)");

    for table in EXPECTED_TABLES {
        let query = format!("SELECT COUNT(*) AS cnt FROM {table}");
        let row = sqlx::query(&query)
            .fetch_one(&db.pool)
            .await
            .unwrap_or_else(|e| panic!("failed to count {table}: {e}"));
        let count: i64 = row.get("cnt");
        assert_eq!(count, 0, "table {table} should be empty after migrations");
    }

    db.close().await;
}

#[tokio::test]
async fn pool_creates_missing_directory_and_file() {
    let (config, _dir) = empty_db_config();
    let path = config.database_path().expect("file-backed config has a path");
    assert!(!path.exists());

    pool::ensure_database_dir(&config)
        .await
        .expect("ensure_database_dir should succeed");
    let pool = pool::create_pool(&config)
        .await
        .expect("create_pool should succeed");
    pool::run_migrations(&pool)
        .await
        .expect("migrations should succeed");

    let one: (i64,) = sqlx::query_as("SELECT 1")
        .fetch_one(&pool)
        .await
        .expect("simple query should work");
    assert_eq!(one.0, 1);
    assert!(path.exists(), "database file should be created");

    pool.close().await;
}

#[tokio::test]
async fn foreign_keys_are_enforced() {
    let db = create_test_db().await;

    let result = sqlx::query(
        "INSERT INTO workouts (program_id, day_number, name, created_at) \
         VALUES (9999, 1, 'Day 1', '2026-01-01T00:00:00Z')",
    )
    .execute(&db.pool)
    .await;

    assert!(result.is_err(), "orphan workout should violate the foreign key");

    db.close().await;
}

#[tokio::test]
async fn table_counts_returns_expected_tables() {
    let db = create_test_db().await;

    let counts = pool::table_counts(&db.pool)
        .await
        .expect("table_counts should succeed");

    let names: Vec<&str> = counts.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, EXPECTED_TABLES);
    assert!(counts.iter().all(|(_, count)| *count == 0));

    db.close().await;
}
