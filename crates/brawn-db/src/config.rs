use std::env;
use std::path::{Path, PathBuf};

/// Database configuration.
///
/// Reads from the `BRAWN_DATABASE_URL` environment variable, falling back to
/// a SQLite file in the per-user data directory when unset.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Full SQLite connection URL (e.g. `sqlite:///home/me/brawn.db`).
    pub database_url: String,
}

impl DbConfig {
    /// Environment variable consulted by [`DbConfig::from_env`].
    pub const ENV_VAR: &str = "BRAWN_DATABASE_URL";

    /// File name of the default database inside the data directory.
    pub const DEFAULT_FILE_NAME: &str = "brawn.db";

    /// Build a config from the environment.
    ///
    /// Priority: `BRAWN_DATABASE_URL` env var, then [`DbConfig::default_url`].
    pub fn from_env() -> Self {
        let database_url = env::var(Self::ENV_VAR).unwrap_or_else(|_| Self::default_url());
        Self { database_url }
    }

    /// Build a config from an explicit URL (useful for tests and CLI flags).
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Build a config pointing at a database file on disk.
    pub fn for_path(path: &Path) -> Self {
        Self::new(format!("sqlite://{}", path.display()))
    }

    /// The URL used when nothing else is configured:
    /// `<data dir>/brawn/brawn.db`, or `./brawn.db` when the platform has no
    /// data directory.
    pub fn default_url() -> String {
        let path = dirs::data_dir()
            .map(|d| d.join("brawn").join(Self::DEFAULT_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_FILE_NAME));
        format!("sqlite://{}", path.display())
    }

    /// Extract the database file path from the URL.
    ///
    /// Returns `None` for in-memory databases or URLs without a path.
    pub fn database_path(&self) -> Option<PathBuf> {
        // URLs look like: sqlite://path/to/file.db?mode=rwc or sqlite:file.db
        let rest = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or_default();
        if path.is_empty() || path == ":memory:" {
            return None;
        }
        Some(PathBuf::from(path))
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
