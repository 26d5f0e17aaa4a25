//! Shared test utilities for brawn integration tests.
//!
//! Each test gets its own SQLite file inside a temporary directory with all
//! migrations applied. The directory is removed when the returned
//! [`TestDb`] is dropped, so keep it alive for the duration of the test.

use sqlx::SqlitePool;
use tempfile::TempDir;

use brawn_db::config::DbConfig;
use brawn_db::pool;

/// A migrated, file-backed test database.
pub struct TestDb {
    pub pool: SqlitePool,
    pub config: DbConfig,
    /// Held to keep the database file alive.
    _dir: TempDir,
}

impl TestDb {
    /// Close the pool. The file disappears when `self` is dropped.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// Create a temporary database with migrations applied.
pub async fn create_test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("failed to create temp dir for test database");
    let config = DbConfig::for_path(&dir.path().join("brawn-test.db"));

    let pool = pool::create_pool(&config)
        .await
        .unwrap_or_else(|e| panic!("failed to open test database {}: {e}", config.database_url));

    pool::run_migrations(&pool)
        .await
        .expect("migrations should succeed");

    TestDb {
        pool,
        config,
        _dir: dir,
    }
}

/// Create an empty temporary database without running migrations.
///
/// Returns the config so callers can exercise `create_pool` and
/// `run_migrations` themselves.
pub fn empty_db_config() -> (DbConfig, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir for test database");
    let config = DbConfig::for_path(&dir.path().join("nested").join("brawn-empty.db"));
    (config, dir)
}
